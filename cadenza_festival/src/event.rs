// Festival events, budgets, and random programme generation.
//
// An `Event` is an immutable (duration, cost) pair. A programme is just a
// slice of events; its order fixes the solvers' indexing but never changes
// the optimal answer.
//
// Budgets arrive as `i64` so that a negative budget can be reported as an
// error instead of being unrepresentable at the call site. `validate_budget`
// converts to `usize` once and the solvers work in unsigned space from there.
// `check_table_cells` is the allocation guard shared by the memoized and
// tabulated solvers. `check_recursion_depth` bounds the exhaustive and
// memoized solvers, which recurse once per event: a long programme with a
// small budget fits the table guard but would exhaust the stack.

use cadenza_prng::TrialRng;
use serde::{Deserialize, Serialize};

use crate::error::{FestivalError, Result};

/// Largest number of cells the memo table or DP rows may allocate (16M).
/// Covers every budget the timing trials sweep with generous headroom.
pub const MAX_TABLE_CELLS: u128 = 1 << 24;

/// Longest programme the recursive solvers accept. Each event is one stack
/// frame; this stays well inside a 2 MiB thread stack in debug builds.
pub const MAX_RECURSION_EVENTS: usize = 4096;

/// One concert on the festival schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Length of the event in minutes. This is the value being maximized.
    pub duration: u32,
    /// Ticket price in dollars.
    pub cost: u32,
}

impl Event {
    pub const fn new(duration: u32, cost: u32) -> Self {
        Event { duration, cost }
    }
}

impl From<(u32, u32)> for Event {
    fn from((duration, cost): (u32, u32)) -> Self {
        Event::new(duration, cost)
    }
}

/// Build a programme from `(duration, cost)` pairs.
pub fn programme(pairs: &[(u32, u32)]) -> Vec<Event> {
    pairs.iter().copied().map(Event::from).collect()
}

/// Inclusive range of integers used when drawing random events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub const fn new(min: u32, max: u32) -> Self {
        ValueRange { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    fn sample(&self, rng: &mut TrialRng) -> u32 {
        rng.range_u32_inclusive(self.min, self.max)
    }
}

/// Draw `len` events with durations and costs uniform in the given ranges.
///
/// Panics if either range has `min > max`; `TrialConfig::validate` rejects
/// such ranges before any trial runs.
pub fn random_programme(
    rng: &mut TrialRng,
    len: usize,
    durations: ValueRange,
    costs: ValueRange,
) -> Vec<Event> {
    (0..len)
        .map(|_| {
            let duration = durations.sample(rng);
            let cost = costs.sample(rng);
            Event::new(duration, cost)
        })
        .collect()
}

/// Reject negative budgets and convert the rest to `usize`.
pub fn validate_budget(budget: i64) -> Result<usize> {
    if budget < 0 {
        return Err(FestivalError::NegativeBudget { budget });
    }
    usize::try_from(budget).map_err(|_| FestivalError::TableTooLarge {
        cells: budget as u128,
        max: MAX_TABLE_CELLS,
    })
}

/// Fail with `TableTooLarge` if `rows` rows of `budget + 1` columns would
/// exceed `MAX_TABLE_CELLS`.
pub fn check_table_cells(rows: usize, budget: usize) -> Result<()> {
    let cells = rows as u128 * (budget as u128 + 1);
    if cells > MAX_TABLE_CELLS {
        return Err(FestivalError::TableTooLarge {
            cells,
            max: MAX_TABLE_CELLS,
        });
    }
    Ok(())
}

/// Fail with `TooManyEvents` if recursing once per event could overflow the
/// stack.
pub fn check_recursion_depth(events: usize) -> Result<()> {
    if events > MAX_RECURSION_EVENTS {
        return Err(FestivalError::TooManyEvents {
            events,
            max: MAX_RECURSION_EVENTS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_budget_is_rejected() {
        let err = validate_budget(-1).unwrap_err();
        assert!(matches!(err, FestivalError::NegativeBudget { budget: -1 }));
        assert_eq!(validate_budget(0).unwrap(), 0);
        assert_eq!(validate_budget(15).unwrap(), 15);
    }

    #[test]
    fn table_guard_counts_the_zero_column() {
        assert!(check_table_cells(1, (MAX_TABLE_CELLS - 1) as usize).is_ok());
        let err = check_table_cells(1, MAX_TABLE_CELLS as usize).unwrap_err();
        assert!(matches!(
            err,
            FestivalError::TableTooLarge { cells, .. } if cells == MAX_TABLE_CELLS + 1
        ));
        // No rows means nothing to allocate, whatever the budget.
        assert!(check_table_cells(0, usize::MAX / 2).is_ok());
    }

    #[test]
    fn recursion_guard_allows_the_limit_itself() {
        assert!(check_recursion_depth(0).is_ok());
        assert!(check_recursion_depth(MAX_RECURSION_EVENTS).is_ok());
        let err = check_recursion_depth(MAX_RECURSION_EVENTS + 1).unwrap_err();
        assert!(matches!(
            err,
            FestivalError::TooManyEvents { events, max }
                if events == MAX_RECURSION_EVENTS + 1 && max == MAX_RECURSION_EVENTS
        ));
    }

    #[test]
    fn random_programme_respects_ranges() {
        let mut rng = TrialRng::new(2024);
        let events = random_programme(
            &mut rng,
            500,
            ValueRange::new(50, 150),
            ValueRange::new(0, 30),
        );
        assert_eq!(events.len(), 500);
        for event in &events {
            assert!((50..=150).contains(&event.duration), "{event:?}");
            assert!(event.cost <= 30, "{event:?}");
        }
    }

    #[test]
    fn random_programme_is_reproducible() {
        let durations = ValueRange::new(1, 100);
        let costs = ValueRange::new(1, 20);
        let a = random_programme(&mut TrialRng::new(5), 40, durations, costs);
        let b = random_programme(&mut TrialRng::new(5), 40, durations, costs);
        assert_eq!(a, b);
    }

    #[test]
    fn events_deserialize_from_json() {
        let json = r#"[{"duration": 40, "cost": 10}, {"duration": 30, "cost": 5}]"#;
        let events: Vec<Event> = serde_json::from_str(json).unwrap();
        assert_eq!(events, programme(&[(40, 10), (30, 5)]));
    }
}
