//! `SQLite` implementation of [`ContactRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careops_app::ports::ContactRepository;
use careops_domain::contact::{Contact, ContactStatus};
use careops_domain::error::CareOpsError;
use careops_domain::id::{ContactId, WorkspaceId};
use careops_domain::time::Timestamp;

use crate::error::StorageError;
use crate::row::{parse, parse_timestamp, timestamp};

struct Wrapper(Contact);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Contact {
            id: parse(&id)?,
            workspace_id: parse(&workspace_id)?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            status: parse(&status)?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }
}

/// `SQLite`-backed contact repository.
#[derive(Clone)]
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for SqliteContactRepository {
    async fn create(&self, contact: Contact) -> Result<Contact, CareOpsError> {
        sqlx::query(
            "INSERT INTO contacts (id, workspace_id, first_name, last_name, email, phone, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(contact.id.to_string())
        .bind(contact.workspace_id.to_string())
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.status.as_str())
        .bind(timestamp(contact.created_at))
        .bind(timestamp(contact.updated_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(contact)
    }

    async fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
    ) -> Result<Option<Contact>, CareOpsError> {
        let row: Option<Wrapper> =
            sqlx::query_as("SELECT * FROM contacts WHERE id = ? AND workspace_id = ?")
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
    ) -> Result<Vec<Contact>, CareOpsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM contacts WHERE workspace_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(workspace_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update_status(
        &self,
        workspace_id: WorkspaceId,
        id: ContactId,
        status: ContactStatus,
        at: Timestamp,
    ) -> Result<Option<Contact>, CareOpsError> {
        let result = sqlx::query(
            "UPDATE contacts SET status = ?, updated_at = ? WHERE id = ? AND workspace_id = ?",
        )
        .bind(status.as_str())
        .bind(timestamp(at))
        .bind(id.to_string())
        .bind(workspace_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(workspace_id, id).await
    }
}
