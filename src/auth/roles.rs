//! Role-based access control for marketplace users.
//!
//! Every user carries exactly one role. Permissions follow the
//! "resource:action" convention with wildcard support per resource.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Permission represents a specific action on a resource.
/// Format: "resource:action" (e.g., "products:read", "orders:update")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission(String);

impl Permission {
    pub fn new(resource: &str, action: &str) -> Self {
        Self(format!("{}:{}", resource, action))
    }

    pub fn wildcard(resource: &str) -> Self {
        Self(format!("{}:*", resource))
    }

    pub fn resource(&self) -> &str {
        self.0.split(':').next().unwrap_or("")
    }

    pub fn action(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or("")
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.ends_with(":*")
    }

    /// Check if this permission grants access to the requested permission
    pub fn grants(&self, requested: &Permission) -> bool {
        if self.0 == requested.0 {
            return true;
        }

        if self.is_wildcard() && self.resource() == requested.resource() {
            return true;
        }

        false
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marketplace role with associated permissions.
///
/// Stored in the database and in JWT claims with the capitalized
/// spelling ("Buyer", "Seller", "Transporter", "Admin").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Buyer,
    Seller,
    Transporter,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Buyer, Role::Seller, Role::Transporter, Role::Admin];

    /// Get all permissions for this role
    pub fn permissions(&self) -> HashSet<Permission> {
        match self {
            Role::Buyer => Self::buyer_permissions(),
            Role::Seller => Self::seller_permissions(),
            Role::Transporter => Self::transporter_permissions(),
            Role::Admin => Self::admin_permissions(),
        }
    }

    /// Check if role has a specific permission
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions().iter().any(|p| p.grants(permission))
    }

    /// Check if role has any of the specified permissions
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    fn buyer_permissions() -> HashSet<Permission> {
        [
            "products:read",
            // No enquiries:respond; responding is the seller's move
            "enquiries:read",
            "enquiries:create",
            "enquiries:update",
            "enquiries:delete",
            "messages:*",
            "orders:read",
            "orders:create",
            "orders:update",
            "transactions:*",
            "profile:*",
        ]
        .into_iter()
        .map(Permission::from)
        .collect()
    }

    fn seller_permissions() -> HashSet<Permission> {
        [
            "products:*",
            "enquiries:*",
            "messages:*",
            "orders:read",
            "orders:create",
            "orders:update",
            "transactions:*",
            "profile:*",
        ]
        .into_iter()
        .map(Permission::from)
        .collect()
    }

    fn transporter_permissions() -> HashSet<Permission> {
        [
            "products:read",
            "orders:read",
            "orders:update",
            "orders:jobs",
            "routes:*",
            "profile:*",
        ]
        .into_iter()
        .map(Permission::from)
        .collect()
    }

    fn admin_permissions() -> HashSet<Permission> {
        [
            "users:*",
            "products:*",
            "enquiries:*",
            "messages:*",
            "orders:*",
            "transactions:*",
            "routes:*",
            "profile:*",
            "audit:*",
        ]
        .into_iter()
        .map(Permission::from)
        .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "Buyer",
            Role::Seller => "Seller",
            Role::Transporter => "Transporter",
            Role::Admin => "Admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            "transporter" => Ok(Role::Transporter),
            "admin" => Ok(Role::Admin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
pub struct RoleParseError(String);

impl std::fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for RoleParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_creation() {
        let perm = Permission::new("products", "read");
        assert_eq!(perm.resource(), "products");
        assert_eq!(perm.action(), "read");
        assert!(!perm.is_wildcard());
    }

    #[test]
    fn test_wildcard_permission() {
        let wildcard = Permission::wildcard("products");
        let specific = Permission::new("products", "read");

        assert!(wildcard.is_wildcard());
        assert!(wildcard.grants(&specific));
        assert!(!specific.grants(&wildcard));
    }

    #[test]
    fn test_role_permissions() {
        let admin = Role::Admin;
        assert!(admin.has_permission(&Permission::new("users", "create")));
        assert!(admin.has_permission(&Permission::new("audit", "read")));

        let buyer = Role::Buyer;
        assert!(buyer.has_permission(&Permission::new("enquiries", "create")));
        assert!(!buyer.has_permission(&Permission::new("enquiries", "respond")));
        assert!(!buyer.has_permission(&Permission::new("users", "create")));
        assert!(!buyer.has_permission(&Permission::new("products", "delete")));

        let seller = Role::Seller;
        assert!(seller.has_permission(&Permission::new("products", "delete")));
        assert!(seller.has_permission(&Permission::new("enquiries", "respond")));
        assert!(!seller.has_permission(&Permission::new("routes", "create")));

        let transporter = Role::Transporter;
        assert!(transporter.has_permission(&Permission::new("routes", "create")));
        assert!(transporter.has_permission(&Permission::new("orders", "jobs")));
        assert!(!transporter.has_permission(&Permission::new("enquiries", "read")));
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Buyer".parse::<Role>().unwrap(), Role::Buyer);
        assert_eq!("TRANSPORTER".parse::<Role>().unwrap(), Role::Transporter);
        assert!("customer".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}
