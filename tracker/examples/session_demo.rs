//! Walk a session through a few hands, with state persisted to a
//! directory under the system temp dir. Run it twice to see the restore
//! path pick the session back up.

use punto_tracker::{FileStore, Tracker};
use punto_types::{Decimal, Outcome, SessionConfig};
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let store = FileStore::open(std::env::temp_dir().join("punto-demo"));
    let mut tracker = Tracker::new(store);

    if !tracker.is_initialized() {
        let config = SessionConfig::new(
            Decimal::from_int(1),
            Decimal::ONE,
            Decimal::from_raw(9500), // standard 5% banker commission
        );
        tracker.initialize(config).expect("fresh tracker");
    }

    for outcome in [Outcome::Lose, Outcome::Lose, Outcome::Win, Outcome::Tie] {
        tracker.apply_outcome(outcome).expect("active session");
    }

    // Take back the tie, then change our mind
    tracker.undo().expect("active session");
    tracker.redo().expect("active session");

    let aggregate = tracker.aggregate().expect("active session");
    info!(
        hands = aggregate.total_hands(),
        win_rate = aggregate.win_rate_percent(),
        profit = %aggregate.total_profit,
        next_bet = %aggregate.current_bet,
        next_position = %tracker.current_position().expect("active session"),
        "session state"
    );
}
