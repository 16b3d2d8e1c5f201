//! Inventory: stock items tracked per workspace.

use serde::{Deserialize, Serialize};

use crate::error::{CareOpsError, ValidationError};
use crate::id::{InventoryItemId, WorkspaceId};
use crate::time::{Timestamp, now};

/// Entity type recorded on alerts raised for inventory items.
pub const ENTITY_TYPE: &str = "inventory_item";

/// A stock-keeping item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: i64,
    /// The item is considered low once `quantity <= low_stock_threshold`.
    pub low_stock_threshold: i64,
    pub unit: Option<String>,
    pub updated_at: Timestamp,
}

impl InventoryItem {
    /// Create a new item with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if invariants fail.
    pub fn new(
        workspace_id: WorkspaceId,
        name: impl Into<String>,
        quantity: i64,
        low_stock_threshold: i64,
    ) -> Result<Self, CareOpsError> {
        let item = Self {
            id: InventoryItemId::new(),
            workspace_id,
            name: name.into(),
            sku: None,
            quantity,
            low_stock_threshold,
            unit: None,
            updated_at: now(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] when the name is blank or a
    /// count is negative.
    pub fn validate(&self) -> Result<(), CareOpsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.quantity < 0 || self.low_stock_threshold < 0 {
            return Err(ValidationError::NegativeQuantity.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn is_low(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }

    /// Set a new on-hand quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeQuantity`] for negative values.
    pub fn set_quantity(&mut self, quantity: i64, at: Timestamp) -> Result<(), CareOpsError> {
        if quantity < 0 {
            return Err(ValidationError::NegativeQuantity.into());
        }
        self.quantity = quantity;
        self.updated_at = at;
        Ok(())
    }
}
