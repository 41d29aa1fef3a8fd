//! Dispatch payload types.
//!
//! The shape is defined by the external dispatch collaborator; this crate
//! only consumes it.  An `Order` is owned exclusively by the
//! [`TripEngine`][crate::TripEngine] from acceptance until completion or
//! abandonment.

use courier_core::{Coordinate, ItemId, OrderId};

/// One line item to collect and verify at the store.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineItem {
    pub id:       ItemId,
    pub name:     String,
    pub quantity: f64,
    /// Unit of measure as dispatch sends it ("kg", "pcs", …).
    pub unit:     String,
}

/// An accepted assignment: where to pick up, where to deliver, and what to
/// verify in between.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id:            OrderId,
    pub store_name:    String,
    pub customer_name: String,
    pub pickup:        Coordinate,
    pub delivery:      Coordinate,
    pub items:         Vec<LineItem>,
}

impl Order {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
