use serde::{Deserialize, Serialize};

use crate::common::entity_ids::UserId;
use crate::common::errors::DomainError;

/// Role supplied by the auth collaborator. Trusted as given; the engine
/// never verifies credentials itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Publisher,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Publisher => write!(f, "publisher"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "customer" => Ok(Role::Customer),
            "publisher" => Ok(Role::Publisher),
            "admin" => Ok(Role::Admin),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

/// Capabilities gating mutating operations in the catalog engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Approve or reject listings
    ModerateListings,

    /// Create, update and delete categories
    ManageCategories,

    /// Place orders against approved listings
    PlaceOrders,

    /// Progress an order through its fulfillment lifecycle
    ProgressOrders,
}

impl Capability {
    /// Which roles hold this capability
    pub fn granted_to(&self, role: Role) -> bool {
        match self {
            Capability::ModerateListings | Capability::ManageCategories => role == Role::Admin,
            Capability::PlaceOrders => matches!(role, Role::Customer | Role::Admin),
            Capability::ProgressOrders => matches!(role, Role::Publisher | Role::Admin),
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::ModerateListings => write!(f, "moderate listings"),
            Capability::ManageCategories => write!(f, "manage categories"),
            Capability::PlaceOrders => write!(f, "place orders"),
            Capability::ProgressOrders => write!(f, "progress orders"),
        }
    }
}

/// The authenticated caller, as supplied by the auth collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Fail with `Forbidden` unless this actor holds the capability.
    pub fn require(&self, capability: Capability) -> Result<(), DomainError> {
        if capability.granted_to(self.role) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "role {} may not {}",
                self.role, capability
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_holds_every_capability() {
        let admin = Actor::new(UserId::new(), Role::Admin);
        for cap in [
            Capability::ModerateListings,
            Capability::ManageCategories,
            Capability::PlaceOrders,
            Capability::ProgressOrders,
        ] {
            assert!(admin.require(cap).is_ok(), "admin denied {cap}");
        }
    }

    #[test]
    fn test_customer_cannot_moderate_listings() {
        let customer = Actor::new(UserId::new(), Role::Customer);
        let err = customer.require(Capability::ModerateListings).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn test_publisher_progresses_orders_but_cannot_place_them() {
        let publisher = Actor::new(UserId::new(), Role::Publisher);
        assert!(publisher.require(Capability::ProgressOrders).is_ok());
        assert!(publisher.require(Capability::PlaceOrders).is_err());
    }
}
