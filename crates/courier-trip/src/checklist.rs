//! Per-item pickup verification state.

use courier_core::ItemId;
use rustc_hash::FxHashMap;

/// The confirmed/unconfirmed flag for every line item of the active order.
///
/// Seeded all-unconfirmed when an order enters PICKUP; completeness
/// (`confirmed == total`) is the precondition for leaving that phase.
/// Unknown item IDs are ignored rather than inserted — the checklist's key
/// set is fixed by the order for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    confirmed: FxHashMap<ItemId, bool>,
}

impl Checklist {
    /// An all-unconfirmed checklist over `items`.
    pub fn seeded<I: IntoIterator<Item = ItemId>>(items: I) -> Self {
        Self {
            confirmed: items.into_iter().map(|id| (id, false)).collect(),
        }
    }

    /// Flip one item's flag.  Returns the new value, or `None` for an ID
    /// that is not part of the order.
    pub fn toggle(&mut self, item: ItemId) -> Option<bool> {
        let flag = self.confirmed.get_mut(&item)?;
        *flag = !*flag;
        Some(*flag)
    }

    pub fn is_confirmed(&self, item: ItemId) -> bool {
        self.confirmed.get(&item).copied().unwrap_or(false)
    }

    pub fn confirmed_count(&self) -> usize {
        self.confirmed.values().filter(|&&v| v).count()
    }

    pub fn total(&self) -> usize {
        self.confirmed.len()
    }

    /// `true` when every seeded item is confirmed.  Vacuously true for an
    /// order with no line items.
    pub fn is_complete(&self) -> bool {
        self.confirmed.values().all(|&v| v)
    }
}
