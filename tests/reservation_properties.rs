//! Randomized reserve/advance interleavings on one seat.
//!
//! Reproducible: set `PROPTEST_SEED` for deterministic runs.

mod helpers;

use std::time::Duration;

use proptest::prelude::*;
use ticketd_core::error::ErrorCode;

use helpers::{Fixture, HOLD_TTL, TestEnv};

const SESSIONS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone)]
enum Step {
    Reserve(usize),
    Advance(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0..SESSIONS.len()).prop_map(Step::Reserve),
        2 => (1..=HOLD_TTL.as_secs() + 60).prop_map(Step::Advance),
    ]
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        max_shrink_iters: 256,
        ..ProptestConfig::default()
    }
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap()
}

/// Holds after every step: one live holder at most, agreed on by the seat
/// row, the lock and the payable reservation.
async fn check_seat_invariants(env: &TestEnv, f: &Fixture) -> Result<(), TestCaseError> {
    let now = env.now();
    let seat = env.seat(f.seat.id).await;
    let payable: Vec<_> = env
        .reservations_for(f.seat.id)
        .await
        .into_iter()
        .filter(|r| r.can_pay(now))
        .collect();

    prop_assert!(payable.len() <= 1, "payable reservations: {payable:?}");

    if let Some(reservation) = payable.first() {
        prop_assert!(seat.is_locked(now));
        prop_assert_eq!(
            seat.locked_by_session_id.as_deref(),
            Some(reservation.session_id.as_str())
        );
        prop_assert_eq!(seat.locked_until, Some(reservation.expires_at));
        let holder = env.lock_holder(f).await;
        prop_assert_eq!(
            holder.as_deref(),
            Some(reservation.session_id.as_str())
        );
    } else {
        prop_assert!(!seat.is_locked(now));
        prop_assert!(env.lock_holder(f).await.is_none());
    }
    Ok(())
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_interleaved_sessions_never_double_hold(
        steps in prop::collection::vec(step(), 1..40)
    ) {
        paused_runtime().block_on(async {
            let env = TestEnv::new();
            let f = env.fixture().await;

            for step in steps {
                match step {
                    Step::Advance(secs) => env.advance(Duration::from_secs(secs)).await,
                    Step::Reserve(i) => {
                        let session = SESSIONS[i];
                        let now = env.now();
                        let seat = env.seat(f.seat.id).await;
                        let held_by_other = seat.is_locked_by_other(session, now);
                        let previous = env.payable_for(f.seat.id, session).await;

                        match env.reserve(&f, session).await {
                            Ok(reservation) => {
                                prop_assert!(!held_by_other);
                                prop_assert_eq!(reservation.session_id.as_str(), session);
                                prop_assert!(reservation.can_pay(env.now()));
                                if let Some(prev) = previous.first() {
                                    prop_assert_eq!(reservation.id, prev.id);
                                }
                            }
                            Err(err) => {
                                prop_assert!(held_by_other, "unexpected failure: {err}");
                                prop_assert!(err.is(ErrorCode::SeatLocked));
                            }
                        }
                    }
                }
                check_seat_invariants(&env, &f).await?;
            }
            Ok(())
        })?;
    }
}
