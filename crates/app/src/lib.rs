//! # careops-app
//!
//! Application layer: use-cases, **port definitions** (traits) and the
//! automation engine.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AutomationRepository`: rule CRUD, active-rule lookup, execution counter
//!   - `WorkspaceRepository`, `ContactRepository`, `BookingRepository`,
//!     `InventoryRepository`, `FormRepository`, `AlertRepository`
//!   - `EmailSender`: outbound transactional email
//!   - `RealtimeBroadcaster`: push named events to a workspace's clients
//! - Run the **automation engine**: trigger dispatch, per-rule failure
//!   isolation, the four action executors
//! - Expose the **trigger emission** functions the services call after writes
//! - Define **driving/inbound** use-case services (workspaces, automations,
//!   contacts, bookings, inventory, forms, alerts)
//! - Provide **in-process infrastructure** (realtime bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `careops-domain` only (plus `tokio` for channels and spawning).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod automation_engine;
pub mod ports;
pub mod realtime_bus;
pub mod services;
pub mod triggers;

#[cfg(test)]
mod testing;
