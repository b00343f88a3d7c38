//! Property-based integration tests for tick-window evaluation.
//!
//! These tests verify that the evaluator and the completion planner hold
//! their invariants for arbitrary instants, using `proptest`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use habitual_core::goals::{plan_tick, Goal};
use habitual_core::schedule::{evaluate, PeriodPolicy, Periodicity, TickReason};
use habitual_core::settings::CompletionGating;
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_periodicity() -> impl Strategy<Value = Periodicity> {
    prop_oneof![Just(Periodicity::Daily), Just(Periodicity::Weekly)]
}

fn arb_gating() -> impl Strategy<Value = CompletionGating> {
    prop_oneof![
        Just(CompletionGating::Permissive),
        Just(CompletionGating::Enforced)
    ]
}

/// Any instant between 2000 and roughly 2060, to the second.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_840_000_000i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Offsets up to 30 days either way.
fn arb_offset() -> impl Strategy<Value = Duration> {
    (-2_592_000i64..=2_592_000i64).prop_map(Duration::seconds)
}

fn arb_goal() -> impl Strategy<Value = Goal> {
    (0.0f64..1000.0, 0.0f64..1000.0, 0i32..500, 0i64..10_000).prop_map(
        |(target_value, current_value, streak, version)| Goal {
            id: "goal-1".to_string(),
            habit_id: "habit-1".to_string(),
            name: "Practice".to_string(),
            description: None,
            target_value,
            current_value,
            streak,
            version,
            last_reset_at: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            deleted_at: None,
        },
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A goal without history is always tickable.
    #[test]
    fn prop_never_ticked_is_always_tickable(
        periodicity in arb_periodicity(),
        now in arb_instant(),
    ) {
        let evaluation = evaluate(periodicity, None, now);
        prop_assert!(evaluation.is_tickable);
        prop_assert_eq!(evaluation.reason, TickReason::NeverTicked);
    }

    /// The reason follows the thresholds of the period policy exactly.
    #[test]
    fn prop_reason_matches_thresholds(
        periodicity in arb_periodicity(),
        last in arb_instant(),
        offset in arb_offset(),
    ) {
        let evaluation = evaluate(periodicity, Some(last), last + offset);
        let elapsed = if offset < Duration::zero() { -offset } else { offset };

        let expected = if elapsed < PeriodPolicy::early_threshold(periodicity) {
            TickReason::TooEarly
        } else if elapsed <= PeriodPolicy::expiry_threshold(periodicity) {
            TickReason::WithinWindow
        } else {
            TickReason::Expired
        };
        prop_assert_eq!(evaluation.reason, expected);
        prop_assert_eq!(evaluation.is_tickable, expected == TickReason::WithinWindow);
        prop_assert_eq!(evaluation.elapsed, Some(elapsed));
    }

    /// Evaluation is pure: same inputs, same answer, in either time direction.
    #[test]
    fn prop_evaluation_is_idempotent_and_symmetric(
        periodicity in arb_periodicity(),
        last in arb_instant(),
        offset in arb_offset(),
    ) {
        let first = evaluate(periodicity, Some(last), last + offset);
        let second = evaluate(periodicity, Some(last), last + offset);
        let mirrored = evaluate(periodicity, Some(last + offset), last);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, mirrored);
    }

    /// A too-early goal becomes tickable exactly when its wait runs out.
    #[test]
    fn prop_wait_remaining_reaches_window(
        periodicity in arb_periodicity(),
        last in arb_instant(),
        secs in 0i64..604_800,
    ) {
        let now = last + Duration::seconds(secs);
        let evaluation = evaluate(periodicity, Some(last), now);
        if evaluation.reason == TickReason::TooEarly {
            let later = now + evaluation.wait_remaining(periodicity);
            prop_assert_eq!(
                evaluate(periodicity, Some(last), later).reason,
                TickReason::WithinWindow
            );
        } else {
            prop_assert_eq!(evaluation.wait_remaining(periodicity), Duration::zero());
        }
    }

    /// Permissive completions never lower the value and always write the
    /// expected version.
    #[test]
    fn prop_permissive_tick_never_decreases_value(
        goal in arb_goal(),
        periodicity in arb_periodicity(),
        last in proptest::option::of(arb_instant()),
        offset in arb_offset(),
    ) {
        let now = match last {
            Some(last) => last + offset,
            None => Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        };
        let evaluation = evaluate(periodicity, last, now);

        let (update, _) =
            plan_tick(&goal, periodicity, &evaluation, CompletionGating::Permissive).unwrap();
        prop_assert_eq!(update.current_value, goal.current_value + periodicity.increment());
        prop_assert_eq!(update.expected_version, goal.version);
        prop_assert!(update.streak >= 1);
    }

    /// Under either gating an accepted completion leaves a positive streak,
    /// and only enforced gating refuses a too-early one.
    #[test]
    fn prop_accepted_ticks_have_positive_streak(
        goal in arb_goal(),
        periodicity in arb_periodicity(),
        gating in arb_gating(),
        last in arb_instant(),
        offset in arb_offset(),
    ) {
        let evaluation = evaluate(periodicity, Some(last), last + offset);
        match plan_tick(&goal, periodicity, &evaluation, gating) {
            Ok((update, _)) => prop_assert!(update.streak >= 1),
            Err(_) => {
                prop_assert_eq!(gating, CompletionGating::Enforced);
                prop_assert_eq!(evaluation.reason, TickReason::TooEarly);
            }
        }
    }
}
