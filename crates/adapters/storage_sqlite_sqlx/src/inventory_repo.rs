//! `SQLite` implementation of [`InventoryRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careops_app::ports::InventoryRepository;
use careops_domain::error::CareOpsError;
use careops_domain::id::{InventoryItemId, WorkspaceId};
use careops_domain::inventory::InventoryItem;

use crate::error::StorageError;
use crate::row::{parse, parse_timestamp, timestamp};

struct Wrapper(InventoryItem);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let workspace_id: String = row.try_get("workspace_id")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(InventoryItem {
            id: parse(&id)?,
            workspace_id: parse(&workspace_id)?,
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            quantity: row.try_get("quantity")?,
            low_stock_threshold: row.try_get("low_stock_threshold")?,
            unit: row.try_get("unit")?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }
}

/// `SQLite`-backed inventory repository.
#[derive(Clone)]
pub struct SqliteInventoryRepository {
    pool: SqlitePool,
}

impl SqliteInventoryRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl InventoryRepository for SqliteInventoryRepository {
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, CareOpsError> {
        sqlx::query(
            "INSERT INTO inventory_items (id, workspace_id, name, sku, quantity, low_stock_threshold, unit, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(item.workspace_id.to_string())
        .bind(&item.name)
        .bind(&item.sku)
        .bind(item.quantity)
        .bind(item.low_stock_threshold)
        .bind(&item.unit)
        .bind(timestamp(item.updated_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(item)
    }

    async fn get_by_id(
        &self,
        workspace_id: WorkspaceId,
        id: InventoryItemId,
    ) -> Result<Option<InventoryItem>, CareOpsError> {
        let row: Option<Wrapper> =
            sqlx::query_as("SELECT * FROM inventory_items WHERE id = ? AND workspace_id = ?")
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
    ) -> Result<Vec<InventoryItem>, CareOpsError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM inventory_items WHERE workspace_id = ? ORDER BY name")
                .bind(workspace_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, item: InventoryItem) -> Result<InventoryItem, CareOpsError> {
        sqlx::query(
            "UPDATE inventory_items SET name = ?, sku = ?, quantity = ?, low_stock_threshold = ?, unit = ?, updated_at = ? WHERE id = ? AND workspace_id = ?",
        )
        .bind(&item.name)
        .bind(&item.sku)
        .bind(item.quantity)
        .bind(item.low_stock_threshold)
        .bind(&item.unit)
        .bind(timestamp(item.updated_at))
        .bind(item.id.to_string())
        .bind(item.workspace_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(item)
    }
}
