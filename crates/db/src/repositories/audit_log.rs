//! Audit log repository for database operations.
//!
//! Implements the check-in `AuditLog` on top of the `audit_logs` table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::audit_logs;
use checkin_core::checkin::{
    AuditKind, AuditLog, AuditRecord, CheckinError, NewAuditRecord, TimeRange,
};
use checkin_shared::types::{AuditRecordId, UserId};

/// Audit log repository implementation.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    db: Arc<DatabaseConnection>,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl AuditLog for AuditLogRepository {
    async fn count_records(
        &self,
        user_id: UserId,
        kind: AuditKind,
        range: Option<TimeRange>,
    ) -> Result<u64, CheckinError> {
        let mut query = audit_logs::Entity::find()
            .filter(audit_logs::Column::UserId.eq(user_id.into_inner()))
            .filter(audit_logs::Column::Kind.eq(kind.as_str()));

        if let Some(range) = range {
            // BETWEEN is inclusive on both ends.
            query = query.filter(audit_logs::Column::CreatedAt.between(range.start, range.end));
        }

        query
            .count(&*self.db)
            .await
            .map_err(|e| CheckinError::storage(e.to_string()))
    }

    async fn find_records(
        &self,
        user_id: UserId,
        kind: AuditKind,
    ) -> Result<Vec<AuditRecord>, CheckinError> {
        let models = audit_logs::Entity::find()
            .filter(audit_logs::Column::UserId.eq(user_id.into_inner()))
            .filter(audit_logs::Column::Kind.eq(kind.as_str()))
            .order_by_asc(audit_logs::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| CheckinError::storage(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn append_record(&self, record: NewAuditRecord) -> Result<AuditRecord, CheckinError> {
        let active_model = audit_logs::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(record.user_id.into_inner()),
            username: Set(record.username),
            kind: Set(record.kind.as_str().to_string()),
            content: Set(record.content),
            quota: Set(record.quota),
            created_at: Set(record.created_at),
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| CheckinError::storage(e.to_string()))?;

        to_domain(model)
    }
}

fn to_domain(model: audit_logs::Model) -> Result<AuditRecord, CheckinError> {
    let kind = AuditKind::parse(&model.kind)
        .ok_or_else(|| CheckinError::storage(format!("Unknown audit kind: {}", model.kind)))?;

    Ok(AuditRecord {
        id: AuditRecordId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        username: model.username,
        kind,
        content: model.content,
        quota: model.quota,
        created_at: model.created_at,
    })
}
