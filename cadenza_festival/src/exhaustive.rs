// Exhaustive search: try every subset of the programme.
//
// Each event is either attended (pay its cost, gain its minutes) or skipped,
// giving 2^n leaves. The running total is threaded down the recursion and an
// overspent branch reports `None`, which loses every `max` against a
// feasible `Some`. Exponential, so it exists as the reference answer the
// other two strategies are checked against.
//
// The skip branch always recurses, so the stack grows by one frame per event
// even when every include branch dies at once; programmes longer than
// `MAX_RECURSION_EVENTS` are refused.

use tracing::{debug, warn};

use crate::error::{FestivalError, Result};
use crate::event::{Event, check_recursion_depth};

/// Beyond this many events the exhaustive search takes noticeably long.
pub const EXHAUSTIVE_WARN_EVENTS: usize = 30;

/// Maximum total duration of events attendable within `budget`, found by
/// enumerating every selection. O(2^n) time, O(n) stack.
pub fn max_minutes_exhaustive(events: &[Event], budget: i64) -> Result<u64> {
    if budget < 0 {
        return Err(FestivalError::NegativeBudget { budget });
    }
    check_recursion_depth(events.len())?;
    if events.len() > EXHAUSTIVE_WARN_EVENTS {
        warn!(
            events = events.len(),
            "exhaustive search will enumerate 2^{} selections",
            events.len()
        );
    }
    // The top-level call has a non-negative budget, so the skip-everything
    // branch is always feasible.
    let best = explore(events, budget, 0).unwrap_or(0);
    debug!(events = events.len(), budget, best, "exhaustive search finished");
    Ok(best)
}

/// Best total reachable from `events` with `remaining` dollars, given that
/// `minutes` have already been booked. `None` marks an overspent branch.
fn explore(events: &[Event], remaining: i64, minutes: u64) -> Option<u64> {
    if remaining < 0 {
        return None;
    }
    let Some((event, rest)) = events.split_first() else {
        return Some(minutes);
    };
    let attend = explore(
        rest,
        remaining - i64::from(event.cost),
        minutes + u64::from(event.duration),
    );
    let skip = explore(rest, remaining, minutes);
    attend.max(skip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MAX_RECURSION_EVENTS, programme};

    #[test]
    fn small_programme() {
        let events = programme(&[(40, 10), (30, 5), (15, 3), (5, 1)]);
        assert_eq!(max_minutes_exhaustive(&events, 15).unwrap(), 70);
    }

    #[test]
    fn overspent_branch_never_wins() {
        // Attending the only event would overspend by one dollar.
        let events = programme(&[(500, 11)]);
        assert_eq!(max_minutes_exhaustive(&events, 10).unwrap(), 0);
        assert_eq!(explore(&events, -1, 500), None);
    }

    #[test]
    fn negative_budget_is_an_error() {
        let err = max_minutes_exhaustive(&[], -3).unwrap_err();
        assert!(matches!(err, FestivalError::NegativeBudget { budget: -3 }));
    }

    #[test]
    fn free_events_are_always_attended() {
        let events = programme(&[(25, 0), (40, 10)]);
        assert_eq!(max_minutes_exhaustive(&events, 0).unwrap(), 25);
        assert_eq!(max_minutes_exhaustive(&events, 10).unwrap(), 65);
    }

    #[test]
    fn unaffordable_events_are_a_linear_chain_up_to_the_limit() {
        // Every include branch overspends at once, so only the skip chain
        // recurses: one frame per event.
        let events = vec![Event::new(10, 50); MAX_RECURSION_EVENTS];
        assert_eq!(max_minutes_exhaustive(&events, 20).unwrap(), 0);
    }

    #[test]
    fn overlong_programme_is_refused_not_overflowed() {
        let events = vec![Event::new(10, 50); 1_000_000];
        let err = max_minutes_exhaustive(&events, 20).unwrap_err();
        assert!(matches!(
            err,
            FestivalError::TooManyEvents { events: 1_000_000, max: MAX_RECURSION_EVENTS }
        ));
    }
}
