//! Row structs and DTOs, one module per aggregate.

pub mod audit;
pub mod cart;
pub mod menu;
pub mod order;
pub mod payment;
pub mod tenant;
pub mod tenant_setting;
