//! Engine dependencies (injected store handles)
//!
//! Central dependency container handed to every domain component. Record
//! stores are trait objects so any conformant persistence backend can be
//! plugged in; the write gates serialize read-modify-write sequences on
//! each record set so no transition is ever decided on a stale read.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domains::catalog::models::{Category, Listing};
use crate::domains::orders::models::Order;
use crate::kernel::memory::MemoryRecords;
use crate::kernel::traits::BaseRecords;

/// Store handles and write gates shared by the domain components
#[derive(Clone)]
pub struct EngineDeps {
    pub listings: Arc<dyn BaseRecords<Listing>>,
    pub categories: Arc<dyn BaseRecords<Category>>,
    pub orders: Arc<dyn BaseRecords<Order>>,

    /// Serializes mutations of listings and categories, and order
    /// placement: all three cross-check each other for referential
    /// integrity (category deletion scans listings, listing deletion scans
    /// orders, order placement reads the listing).
    pub catalog_gate: Arc<Mutex<()>>,
    /// Serializes transitions on existing orders.
    pub order_gate: Arc<Mutex<()>>,
}

impl EngineDeps {
    pub fn new(
        listings: Arc<dyn BaseRecords<Listing>>,
        categories: Arc<dyn BaseRecords<Category>>,
        orders: Arc<dyn BaseRecords<Order>>,
    ) -> Self {
        Self {
            listings,
            categories,
            orders,
            catalog_gate: Arc::new(Mutex::new(())),
            order_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Fully in-memory dependency set (server default and test harness).
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryRecords::new()),
            Arc::new(MemoryRecords::new()),
            Arc::new(MemoryRecords::new()),
        )
    }
}
