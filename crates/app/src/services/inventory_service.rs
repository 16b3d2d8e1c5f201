//! Inventory service: stock levels and low-stock detection.

use std::sync::Arc;

use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::id::{InventoryItemId, WorkspaceId};
use careops_domain::inventory::InventoryItem;
use careops_domain::time::now;

use crate::ports::{Dispatcher, InventoryRepository};
use crate::triggers::{DispatchMode, trigger_inventory_low};

/// Application service for inventory items.
pub struct InventoryService<R, D> {
    repo: R,
    dispatcher: Arc<D>,
}

impl<R, D> InventoryService<R, D>
where
    R: InventoryRepository,
    D: Dispatcher + Send + Sync + 'static,
{
    /// Create a new service backed by the given repository and dispatcher.
    pub fn new(repo: R, dispatcher: Arc<D>) -> Self {
        Self { repo, dispatcher }
    }

    /// Add an item to a workspace's inventory.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, item), fields(item_name = %item.name))]
    pub async fn create_item(&self, item: InventoryItem) -> Result<InventoryItem, CareOpsError> {
        item.validate()?;
        self.repo.create(item).await
    }

    /// List the items of a workspace.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_items(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<InventoryItem>, CareOpsError> {
        self.repo.list_by_workspace(workspace_id).await
    }

    /// Set the on-hand quantity. When the new quantity is at or below the
    /// item's threshold the `INVENTORY_LOW` automations run before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::NotFound`] if the item is not in the
    /// workspace, [`CareOpsError::Validation`] for a negative quantity, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn adjust_quantity(
        &self,
        workspace_id: WorkspaceId,
        id: InventoryItemId,
        quantity: i64,
    ) -> Result<InventoryItem, CareOpsError> {
        let mut item = self
            .repo
            .get_by_id(workspace_id, id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "InventoryItem",
                id: id.to_string(),
            })?;
        item.set_quantity(quantity, now())?;
        let item = self.repo.update(item).await?;

        if item.is_low() {
            tracing::info!(
                quantity = item.quantity,
                threshold = item.low_stock_threshold,
                "inventory item is low"
            );
            trigger_inventory_low(&self.dispatcher, item.clone(), DispatchMode::Wait).await;
        }
        Ok(item)
    }
}
