//! Application services: use-case implementations.
//!
//! Each service receives its repositories (and, where writes fire automations,
//! the shared dispatcher) through generic constructor parameters.

pub mod alert_service;
pub mod automation_service;
pub mod booking_service;
pub mod contact_service;
pub mod form_service;
pub mod inventory_service;
pub mod workspace_service;
