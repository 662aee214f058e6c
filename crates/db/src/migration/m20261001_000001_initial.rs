//! Initial schema: users and the audit log.
//!
//! Check-in state is derived from `audit_logs`, so the composite index below
//! backs every "signed today" lookup.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS audit_logs CASCADE; DROP TABLE IF EXISTS users CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(64) NOT NULL UNIQUE,
    group_name VARCHAR(64) NOT NULL DEFAULT 'default',
    quota BIGINT NOT NULL DEFAULT 0,
    -- Registration time in epoch seconds; 0 means unknown
    created_time BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE audit_logs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    username VARCHAR(64) NOT NULL DEFAULT '',
    kind VARCHAR(32) NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    quota BIGINT NOT NULL DEFAULT 0,
    -- Epoch seconds, compared against local day bounds
    created_at BIGINT NOT NULL
);

-- Per-user, per-kind range counts (signed today, total days)
CREATE INDEX idx_audit_logs_user_kind_time ON audit_logs(user_id, kind, created_at);
";
