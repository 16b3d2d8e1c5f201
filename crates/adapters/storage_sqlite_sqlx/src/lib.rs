//! # careops-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `careops-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `careops-app` (for port traits) and `careops-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod row;

pub mod alert_repo;
pub mod automation_repo;
pub mod booking_repo;
pub mod contact_repo;
pub mod error;
pub mod form_repo;
pub mod inventory_repo;
pub mod pool;
pub mod workspace_repo;

pub use alert_repo::SqliteAlertRepository;
pub use automation_repo::SqliteAutomationRepository;
pub use booking_repo::SqliteBookingRepository;
pub use contact_repo::SqliteContactRepository;
pub use form_repo::SqliteFormRepository;
pub use inventory_repo::SqliteInventoryRepository;
pub use pool::{Config, Database};
pub use workspace_repo::SqliteWorkspaceRepository;
