//! Entity id aliases used across the domain engine.

use crate::common::id::Id;

/// Marker type for listings.
pub struct ListingEntity;
/// Marker type for orders.
pub struct OrderEntity;
/// Marker type for categories.
pub struct CategoryEntity;
/// Marker type for platform users (buyers, publishers, admins).
pub struct UserEntity;

pub type ListingId = Id<ListingEntity>;
pub type OrderId = Id<OrderEntity>;
pub type CategoryId = Id<CategoryEntity>;
pub type UserId = Id<UserEntity>;
