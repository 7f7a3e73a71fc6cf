//! Domain logic for the Platter ordering platform.
//!
//! This crate has no database or HTTP dependencies. Everything here is pure
//! (or owns its own in-memory state) so it can be exercised directly from
//! unit tests and shared by the repository and API layers.

pub mod audit;
pub mod checkout;
pub mod error;
pub mod money;
pub mod order_status;
pub mod pagination;
pub mod payments;
pub mod rate_limit;
pub mod roles;
pub mod tenant_config;
pub mod types;
