//! `SQLite` implementation of [`WorkspaceRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careops_app::ports::WorkspaceRepository;
use careops_domain::error::CareOpsError;
use careops_domain::id::WorkspaceId;
use careops_domain::workspace::Workspace;

use crate::error::StorageError;
use crate::row::{parse, parse_timestamp, timestamp};

struct Wrapper(Workspace);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Workspace {
            id: parse(&id)?,
            business_name: row.try_get("business_name")?,
            owner_email: row.try_get("owner_email")?,
            created_at: parse_timestamp(&created_at)?,
        }))
    }
}

/// `SQLite`-backed workspace repository.
#[derive(Clone)]
pub struct SqliteWorkspaceRepository {
    pool: SqlitePool,
}

impl SqliteWorkspaceRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl WorkspaceRepository for SqliteWorkspaceRepository {
    async fn create(&self, workspace: Workspace) -> Result<Workspace, CareOpsError> {
        sqlx::query(
            "INSERT INTO workspaces (id, business_name, owner_email, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(workspace.id.to_string())
        .bind(&workspace.business_name)
        .bind(&workspace.owner_email)
        .bind(timestamp(workspace.created_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(workspace)
    }

    async fn get_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, CareOpsError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM workspaces WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }
}
