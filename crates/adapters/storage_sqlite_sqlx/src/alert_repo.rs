//! `SQLite` implementation of [`AlertRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careops_app::ports::AlertRepository;
use careops_domain::alert::{Alert, AlertStatus};
use careops_domain::error::CareOpsError;
use careops_domain::id::{AlertId, WorkspaceId};

use crate::error::StorageError;
use crate::row::{optional_timestamp, parse, parse_optional_timestamp, parse_timestamp, timestamp};

struct Wrapper(Alert);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let priority: String = row.try_get("priority")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;
        let acknowledged_at: Option<String> = row.try_get("acknowledged_at")?;
        let resolved_at: Option<String> = row.try_get("resolved_at")?;

        Ok(Self(Alert {
            id: parse(&id)?,
            workspace_id: parse(&workspace_id)?,
            alert_type: row.try_get("alert_type")?,
            priority: parse(&priority)?,
            status: parse(&status)?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            entity_type: row.try_get("entity_type")?,
            entity_id: row.try_get("entity_id")?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
            acknowledged_at: parse_optional_timestamp(acknowledged_at)?,
            resolved_at: parse_optional_timestamp(resolved_at)?,
        }))
    }
}

/// `SQLite`-backed alert repository.
#[derive(Clone)]
pub struct SqliteAlertRepository {
    pool: SqlitePool,
}

impl SqliteAlertRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AlertRepository for SqliteAlertRepository {
    async fn create(&self, alert: Alert) -> Result<Alert, CareOpsError> {
        sqlx::query(
            "INSERT INTO alerts (id, workspace_id, alert_type, priority, status, title, message, entity_type, entity_id, created_at, updated_at, acknowledged_at, resolved_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(alert.id.to_string())
        .bind(alert.workspace_id.to_string())
        .bind(&alert.alert_type)
        .bind(alert.priority.to_string())
        .bind(alert.status.to_string())
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(&alert.entity_type)
        .bind(&alert.entity_id)
        .bind(timestamp(alert.created_at))
        .bind(timestamp(alert.updated_at))
        .bind(optional_timestamp(alert.acknowledged_at))
        .bind(optional_timestamp(alert.resolved_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(alert)
    }

    async fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: AlertId,
    ) -> Result<Option<Alert>, CareOpsError> {
        let row: Option<Wrapper> =
            sqlx::query_as("SELECT * FROM alerts WHERE id = ? AND workspace_id = ?")
                .bind(id.to_string())
                .bind(workspace_id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
        status: Option<AlertStatus>,
    ) -> Result<Vec<Alert>, CareOpsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM alerts WHERE workspace_id = ? AND (? IS NULL OR status = ?) ORDER BY created_at DESC, rowid DESC",
        )
        .bind(workspace_id.to_string())
        .bind(status.map(|s| s.to_string()))
        .bind(status.map(|s| s.to_string()))
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, alert: Alert) -> Result<Alert, CareOpsError> {
        sqlx::query(
            "UPDATE alerts SET status = ?, updated_at = ?, acknowledged_at = ?, resolved_at = ? WHERE id = ? AND workspace_id = ?",
        )
        .bind(alert.status.to_string())
        .bind(timestamp(alert.updated_at))
        .bind(optional_timestamp(alert.acknowledged_at))
        .bind(optional_timestamp(alert.resolved_at))
        .bind(alert.id.to_string())
        .bind(alert.workspace_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(alert)
    }
}
