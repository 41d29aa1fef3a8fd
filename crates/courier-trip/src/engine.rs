//! The trip phase state machine.

use courier_core::{Coordinate, ItemId, OrderId};

use crate::{Checklist, Order, ProximityGate, TripError, TripResult};

// ── TripPhase ─────────────────────────────────────────────────────────────────

/// The courier's current stage.  `Idle` is both the initial and the terminal
/// state of every assignment cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TripPhase {
    #[default]
    Idle,
    Pickup,
    Delivery,
}

impl std::fmt::Display for TripPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripPhase::Idle => write!(f, "IDLE"),
            TripPhase::Pickup => write!(f, "PICKUP"),
            TripPhase::Delivery => write!(f, "DELIVERY"),
        }
    }
}

// ── TripEvent ─────────────────────────────────────────────────────────────────

/// What a successful `advance()` accomplished.
#[derive(Debug, Clone, PartialEq)]
pub enum TripEvent {
    /// All items verified at the store; now heading to the customer.
    PickupComplete { order: OrderId },

    /// Handed over at the customer.  The released order is returned so the
    /// caller can settle earnings, notify dispatch, and so on.
    DeliveryComplete { order: Order },
}

// ── Internal state ────────────────────────────────────────────────────────────

/// The machine's state, carrying exactly the data each phase needs.
/// The checklist exists only during PICKUP — it is seeded on acceptance and
/// dropped on phase exit, which makes "reset to all-false per new order"
/// structural rather than procedural.
#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Pickup { order: Order, checklist: Checklist },
    Delivery { order: Order },
}

// ── TripEngine ────────────────────────────────────────────────────────────────

/// Owns the active order and enforces every phase-transition rule.
///
/// All mutating calls take `&mut self`, so transitions are serialized by
/// construction; each call either fully applies or returns a
/// [`TripError`] with the state untouched.  Position-gated calls take the
/// current fix as an explicit `Option<Coordinate>` — the engine never reads
/// a clock or a sensor itself.
#[derive(Debug, Default)]
pub struct TripEngine {
    state: State,
    gate:  ProximityGate,
}

impl TripEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with a non-default geofence radius.
    pub fn with_gate(gate: ProximityGate) -> Self {
        Self { state: State::Idle, gate }
    }

    // ── Read-only snapshots ───────────────────────────────────────────────

    pub fn phase(&self) -> TripPhase {
        match self.state {
            State::Idle => TripPhase::Idle,
            State::Pickup { .. } => TripPhase::Pickup,
            State::Delivery { .. } => TripPhase::Delivery,
        }
    }

    /// The active order, if any.
    pub fn order(&self) -> Option<&Order> {
        match &self.state {
            State::Idle => None,
            State::Pickup { order, .. } | State::Delivery { order } => Some(order),
        }
    }

    /// The pickup checklist; `None` outside the PICKUP phase.
    pub fn checklist(&self) -> Option<&Checklist> {
        match &self.state {
            State::Pickup { checklist, .. } => Some(checklist),
            _ => None,
        }
    }

    /// The coordinate the current phase is gated against: the store during
    /// PICKUP, the customer during DELIVERY, nothing while idle.
    pub fn target(&self) -> Option<Coordinate> {
        match &self.state {
            State::Idle => None,
            State::Pickup { order, .. } => Some(order.pickup),
            State::Delivery { order } => Some(order.delivery),
        }
    }

    /// Gate state against the current phase's target (fail-closed).
    pub fn locked(&self, current: Option<Coordinate>) -> bool {
        self.gate.locked(current, self.target())
    }

    /// Metres to the current target, when a fix and a target both exist.
    pub fn distance_to_target(&self, current: Option<Coordinate>) -> Option<f64> {
        self.gate.distance_m(current, self.target())
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Accept an offered order.  Valid only from IDLE; enters PICKUP with an
    /// all-unconfirmed checklist seeded from the order's line items.
    pub fn accept_order(&mut self, order: Order) -> TripResult<()> {
        if !matches!(self.state, State::Idle) {
            return Err(TripError::AlreadyOnTrip);
        }
        let checklist = Checklist::seeded(order.items.iter().map(|i| i.id));
        self.state = State::Pickup { order, checklist };
        Ok(())
    }

    /// Flip one item's confirmed flag.  Valid only during PICKUP and only
    /// while the gate is unlocked at the store.
    ///
    /// Returns the item's new confirmed state.  IDs that are not part of the
    /// order are ignored (`Ok(false)`), never inserted.
    pub fn toggle_item(&mut self, item: ItemId, current: Option<Coordinate>) -> TripResult<bool> {
        let locked = self.locked(current);
        match &mut self.state {
            State::Pickup { checklist, .. } => {
                if locked {
                    return Err(TripError::ProximityLocked);
                }
                Ok(checklist.toggle(item).unwrap_or(false))
            }
            _ => Err(TripError::NotInPickup),
        }
    }

    /// The single completion action — one call per confirmed user gesture.
    ///
    /// From PICKUP: requires the gate unlocked at the store **and** a
    /// complete checklist; moves to DELIVERY (checklist dropped).
    /// From DELIVERY: requires the gate unlocked at the customer; releases
    /// the order and returns to IDLE.
    /// From IDLE: [`TripError::NoActiveTrip`].
    pub fn advance(&mut self, current: Option<Coordinate>) -> TripResult<TripEvent> {
        match &self.state {
            State::Idle => return Err(TripError::NoActiveTrip),
            State::Pickup { checklist, .. } => {
                if self.locked(current) {
                    return Err(TripError::ProximityLocked);
                }
                if !checklist.is_complete() {
                    return Err(TripError::ItemsUnconfirmed);
                }
            }
            State::Delivery { .. } => {
                if self.locked(current) {
                    return Err(TripError::ProximityLocked);
                }
            }
        }

        // Preconditions hold; commit the transition.
        match std::mem::take(&mut self.state) {
            State::Pickup { order, .. } => {
                let id = order.id;
                self.state = State::Delivery { order };
                Ok(TripEvent::PickupComplete { order: id })
            }
            State::Delivery { order } => Ok(TripEvent::DeliveryComplete { order }),
            State::Idle => unreachable!("checked above"),
        }
    }

    /// Cancel the active trip, releasing the order without completion.
    /// Always succeeds; `None` when there was nothing to abandon.
    pub fn abandon(&mut self) -> Option<Order> {
        match std::mem::take(&mut self.state) {
            State::Idle => None,
            State::Pickup { order, .. } | State::Delivery { order } => Some(order),
        }
    }
}
