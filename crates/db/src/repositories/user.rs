//! User repository for database operations.
//!
//! Implements the check-in `UserStore` on top of the `users` table.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::users;
use checkin_core::checkin::{CheckinError, UserSnapshot, UserStore};
use checkin_shared::types::UserId;

/// User repository implementation.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        username: &str,
        group_name: &str,
        created_time: i64,
    ) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(username.to_string()),
            group_name: Set(group_name.to_string()),
            quota: Set(0),
            created_time: Set(created_time),
            created_at: Set(Utc::now().into()),
        };

        user.insert(&*self.db).await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&*self.db).await
    }
}

impl UserStore for UserRepository {
    async fn find_user(&self, id: UserId) -> Result<Option<UserSnapshot>, CheckinError> {
        let model = self
            .find_by_id(id.into_inner())
            .await
            .map_err(|e| CheckinError::storage(e.to_string()))?;

        Ok(model.map(to_snapshot))
    }

    async fn find_username(&self, id: UserId) -> Result<Option<String>, CheckinError> {
        users::Entity::find_by_id(id.into_inner())
            .select_only()
            .column(users::Column::Username)
            .into_tuple::<String>()
            .one(&*self.db)
            .await
            .map_err(|e| CheckinError::storage(e.to_string()))
    }

    async fn increase_quota(&self, id: UserId, amount: i64) -> Result<(), CheckinError> {
        // Single statement so concurrent writers never lose an increment.
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Quota,
                Expr::col(users::Column::Quota).add(amount),
            )
            .filter(users::Column::Id.eq(id.into_inner()))
            .exec(&*self.db)
            .await
            .map_err(|e| CheckinError::storage(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(CheckinError::UserNotFound(id));
        }
        Ok(())
    }
}

fn to_snapshot(model: users::Model) -> UserSnapshot {
    UserSnapshot {
        id: UserId::from_uuid(model.id),
        group: model.group_name,
        created_time: model.created_time,
        quota: model.quota,
    }
}
