//! # careops-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** under `/api/workspaces/{ws}/…` for
//!   automation rules and the records that fire them (contacts, bookings,
//!   inventory, forms, alerts)
//! - Stream realtime workspace notifications (`alert:new`,
//!   `alert:updated`) as **Server-Sent Events**
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `careops-app` (for port traits and services) and
//! `careops-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
