//! dry_run — smallest end-to-end demo of the rust_courier trip engine.
//!
//! Replays a pre-recorded walking track through one complete delivery:
//! permission grant, order acceptance, item verification at the store,
//! hand-over at the customer.  No network, no GPS hardware — the replay
//! provider and the straight-line router stand in for both collaborators,
//! so the run is fully deterministic apart from the rand-jittered offer.

use std::io::Cursor;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use courier_core::{Coordinate, ItemId, OrderId};
use courier_location::{ProviderEvent, ReplayProvider};
use courier_route::StraightLineRouter;
use courier_session::{boundary, Session, SessionConfig, SessionError};
use courier_trip::{LineItem, Order, TripError, TripEvent, TripPhase};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

/// Where the track pauses for the pickup, and where it ends.
const STORE_STOP: Coordinate = Coordinate { lat: 33.16382, lon: 43.86356 };
const DOORSTEP:   Coordinate = Coordinate { lat: 33.17000, lon: 43.87000 };

// ── GPS track ─────────────────────────────────────────────────────────────────

// One fix every 5 s: approach the store from ~600 m out, dwell while the
// items are verified, then walk the ~1.3 km to the customer.
const TRACK_CSV: &str = "\
lat,lon,accuracy_m,timestamp_ms\n\
33.16000,43.86000,9.0,1000\n\
33.16100,43.86100,8.0,6000\n\
33.16250,43.86250,7.5,11000\n\
33.16370,43.86350,6.0,16000\n\
33.16382,43.86356,5.0,21000\n\
33.16382,43.86356,5.0,26000\n\
33.16500,43.86500,6.0,31000\n\
33.16700,43.86700,6.5,36000\n\
33.16900,43.86900,6.0,41000\n\
33.16995,43.86995,5.0,46000\n\
33.17000,43.87000,5.0,51000\n\
";

// ── Mock offer source ─────────────────────────────────────────────────────────

/// Fabricate an offer near the track, the way the dispatch backend would.
/// The store is jittered a couple of metres around the track's dwell point,
/// so the pickup still lands inside the 10 m geofence.
fn mock_offer(rng: &mut SmallRng) -> Order {
    let mut jitter = |scale: f64| rng.gen_range(-scale..scale);
    let pickup = Coordinate::new(
        STORE_STOP.lat + jitter(0.00003),
        STORE_STOP.lon + jitter(0.00003),
    );

    Order {
        id:            OrderId(rng.gen_range(1_000..10_000)),
        store_name:    "Toto Market".into(),
        customer_name: "Sara A.".into(),
        pickup,
        delivery:      DOORSTEP,
        items: vec![
            LineItem {
                id:       ItemId(1),
                name:     "Fresh tomatoes".into(),
                quantity: rng.gen_range(1..4) as f64,
                unit:     "kg".into(),
            },
            LineItem {
                id:       ItemId(2),
                name:     "Cucumbers".into(),
                quantity: 1.0,
                unit:     "kg".into(),
            },
        ],
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== dry_run — rust_courier trip engine ===");
    println!("Track: {} fixes  |  Seed: {SEED}", TRACK_CSV.lines().count() - 1);
    println!();

    // 1. Operating region: a rectangle around the replayed district.
    let config = SessionConfig {
        service_area: boundary([
            (33.150, 43.850),
            (33.150, 43.880),
            (33.180, 43.880),
            (33.180, 43.850),
        ]),
        ..SessionConfig::default()
    };

    // 2. Replayed platform + deterministic offer source.
    let provider = ReplayProvider::from_csv_reader(Cursor::new(TRACK_CSV))?;
    let mut rng = SmallRng::seed_from_u64(SEED);
    let offer = mock_offer(&mut rng);
    let item_ids: Vec<ItemId> = offer.items.iter().map(|i| i.id).collect();

    let mut session = Session::new(provider, config);
    let router = StraightLineRouter;

    // 3. Boot: on the replayed browser surface, permission resolves with the
    //    first fix.
    session.request_permission();

    let mut offered = false;
    let mut delivered = false;

    // 4. Drive the whole track through the session, reacting the way the
    //    courier would at each fix.
    while let Some((watch, event)) = session.provider_mut().next_event() {
        let now = match event {
            ProviderEvent::Fix(sample) => {
                session.handle_fix(watch, sample);
                sample.timestamp
            }
            ProviderEvent::Error(e) => {
                session.handle_location_error(watch, e);
                continue;
            }
        };

        // Dispatch rings once the courier is on the map.
        if !offered && session.phase() == TripPhase::Idle {
            let order = offer.clone();
            println!(
                "[{:>6} ms] offer {}: {} -> {}",
                now.0, order.id, order.store_name, order.customer_name
            );
            session.accept_order(order)?;
            offered = true;
        }

        // At the store: tick off the checklist, then complete the pickup.
        if session.phase() == TripPhase::Pickup {
            for &id in &item_ids {
                if session.toggle_item(id) == Ok(true) {
                    println!("[{:>6} ms] confirmed item {id}", now.0);
                }
            }
            match session.advance() {
                Ok(TripEvent::PickupComplete { order }) => {
                    println!("[{:>6} ms] pickup complete for {order}; heading out", now.0);
                }
                // Expected until in range with everything confirmed.
                Err(SessionError::Trip(
                    TripError::ProximityLocked | TripError::ItemsUnconfirmed,
                )) => {}
                other => {
                    other?;
                }
            }
        } else if session.phase() == TripPhase::Delivery
            && let Ok(TripEvent::DeliveryComplete { order }) = session.advance()
        {
            println!("[{:>6} ms] delivered {} to {}", now.0, order.id, order.customer_name);
            delivered = true;
        }

        session.pump_route(&router, now);

        let view = session.snapshot();
        println!(
            "[{:>6} ms] phase={} target={} route_pts={}",
            now.0,
            view.phase,
            view.distance_label.as_deref().unwrap_or("-"),
            view.route.len(),
        );
    }

    // 5. Summary.
    println!();
    let view = session.snapshot();
    println!("Final phase      : {}", view.phase);
    println!("Delivery complete: {}", if delivered { "yes" } else { "no" });

    Ok(())
}
