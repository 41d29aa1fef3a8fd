//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony.  The inner integer is `pub` because the IDs come from external
//! payloads (dispatch assigns order and item numbers) and callers need to
//! construct them directly.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of an assignment, issued by the external dispatch source.
    pub struct OrderId(u64);
}

typed_id! {
    /// Identifier of a line item within an order; keys the pickup checklist.
    pub struct ItemId(u32);
}

typed_id! {
    /// Handle for one continuous position subscription.  A new subscription
    /// gets a fresh `WatchId`; callbacks carrying a superseded ID are stale
    /// and must be dropped.
    pub struct WatchId(u32);
}

impl WatchId {
    /// The ID following `self` — subscription handles are issued sequentially.
    #[inline]
    pub fn next(self) -> WatchId {
        WatchId(self.0.wrapping_add(1))
    }
}
