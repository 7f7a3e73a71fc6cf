//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Every method on a tenant-owned table takes
//! the tenant id and filters on it.

pub mod audit_repo;
pub mod cart_repo;
pub mod menu_repo;
pub mod order_repo;
pub mod payment_intent_repo;
pub mod tenant_repo;
pub mod tenant_setting_repo;

pub use audit_repo::AuditLogRepo;
pub use cart_repo::CartRepo;
pub use menu_repo::MenuRepo;
pub use order_repo::OrderRepo;
pub use payment_intent_repo::PaymentIntentRepo;
pub use tenant_repo::TenantRepo;
pub use tenant_setting_repo::TenantSettingRepo;
