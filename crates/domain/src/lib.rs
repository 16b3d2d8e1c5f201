//! # careops-domain
//!
//! Pure domain model for the `CareOps` small-business operations platform.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Workspaces** (the tenant boundary)
//! - Define **Contacts**, **Bookings**, **Inventory items** and **Form submissions**
//! - Define **Alerts** and their `ACTIVE → ACKNOWLEDGED → RESOLVED` lifecycle
//! - Define **Automation rules** (trigger → action), the event context handed
//!   to the dispatcher, `{{placeholder}}` substitution and the starter rules
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod alert;
pub mod automation;
pub mod booking;
pub mod contact;
pub mod form;
pub mod inventory;
pub mod workspace;
