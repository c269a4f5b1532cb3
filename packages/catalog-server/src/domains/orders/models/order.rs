use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{ListingId, OrderId, UserId};

/// Order - a buyer's purchase of a placement on a specific listing.
///
/// Holds a non-owning reference (by id) to its listing; deleting a listing
/// with open orders fails instead of cascading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub publisher_id: UserId,

    pub website: String,
    pub anchor_text: String,
    pub target_url: String,

    pub status: OrderStatus,
    /// Independent axis from `status`, driven by the payment collaborator
    pub payment_status: PaymentStatus,

    /// Set only on the transition into `completed`
    pub published_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation, including idempotent no-ops
    pub updated_at: DateTime<Utc>,
}

/// Fulfillment status of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Rejected,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Rejected | OrderStatus::Cancelled
        )
    }

    /// Legal transitions:
    /// pending -> in_progress | cancelled | rejected
    /// in_progress -> completed | cancelled | rejected
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        match (self, target) {
            (OrderStatus::Pending, OrderStatus::InProgress) => true,
            (OrderStatus::Pending | OrderStatus::InProgress, OrderStatus::Cancelled) => true,
            (OrderStatus::InProgress, OrderStatus::Completed) => true,
            (current, OrderStatus::Rejected) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::InProgress => write!(f, "in_progress"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Rejected => write!(f, "rejected"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "rejected" => Ok(OrderStatus::Rejected),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid order status: {}", s)),
        }
    }
}

/// Payment status, updated by the external payment collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(anyhow::anyhow!("Invalid payment status: {}", s)),
        }
    }
}
