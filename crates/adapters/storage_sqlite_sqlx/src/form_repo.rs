//! `SQLite` implementation of [`FormRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careops_app::ports::FormRepository;
use careops_domain::error::CareOpsError;
use careops_domain::form::FormSubmission;
use careops_domain::id::{FormSubmissionId, WorkspaceId};

use crate::error::StorageError;
use crate::row::{optional_timestamp, parse, parse_optional_timestamp, parse_timestamp, timestamp};

struct Wrapper(FormSubmission);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let contact_id: Option<String> = row.try_get("contact_id")?;
        let status: String = row.try_get("status")?;
        let due_at: Option<String> = row.try_get("due_at")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(FormSubmission {
            id: parse(&id)?,
            workspace_id: parse(&workspace_id)?,
            contact_id: contact_id.as_deref().map(parse).transpose()?,
            form_name: row.try_get("form_name")?,
            status: parse(&status)?,
            due_at: parse_optional_timestamp(due_at)?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }
}

/// `SQLite`-backed form submission repository.
#[derive(Clone)]
pub struct SqliteFormRepository {
    pool: SqlitePool,
}

impl SqliteFormRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FormRepository for SqliteFormRepository {
    async fn create(&self, submission: FormSubmission) -> Result<FormSubmission, CareOpsError> {
        sqlx::query(
            "INSERT INTO form_submissions (id, workspace_id, contact_id, form_name, status, due_at, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(submission.id.to_string())
        .bind(submission.workspace_id.to_string())
        .bind(submission.contact_id.map(|id| id.to_string()))
        .bind(&submission.form_name)
        .bind(submission.status.to_string())
        .bind(optional_timestamp(submission.due_at))
        .bind(timestamp(submission.created_at))
        .bind(timestamp(submission.updated_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(submission)
    }

    async fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: FormSubmissionId,
    ) -> Result<Option<FormSubmission>, CareOpsError> {
        let row: Option<Wrapper> =
            sqlx::query_as("SELECT * FROM form_submissions WHERE id = ? AND workspace_id = ?")
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
    ) -> Result<Vec<FormSubmission>, CareOpsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM form_submissions WHERE workspace_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(workspace_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, submission: FormSubmission) -> Result<FormSubmission, CareOpsError> {
        sqlx::query(
            "UPDATE form_submissions SET status = ?, due_at = ?, updated_at = ? WHERE id = ? AND workspace_id = ?",
        )
        .bind(submission.status.to_string())
        .bind(optional_timestamp(submission.due_at))
        .bind(timestamp(submission.updated_at))
        .bind(submission.id.to_string())
        .bind(submission.workspace_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(submission)
    }
}
