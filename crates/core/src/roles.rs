//! Well-known role name constants carried in the `role` JWT claim.

pub const ROLE_PLATFORM_ADMIN: &str = "platform_admin";
pub const ROLE_TENANT_ADMIN: &str = "tenant_admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_DELIVERY: &str = "delivery";
pub const ROLE_CUSTOMER: &str = "customer";

/// Roles allowed to manage a tenant's menus and view every order.
pub fn is_tenant_staff(role: &str) -> bool {
    matches!(role, ROLE_TENANT_ADMIN | ROLE_STAFF)
}

/// Roles allowed to move orders through the delivery workflow.
pub fn can_update_order_status(role: &str) -> bool {
    is_tenant_staff(role) || role == ROLE_DELIVERY
}
