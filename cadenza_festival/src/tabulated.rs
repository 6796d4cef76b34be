// Bottom-up tabulation with two rolling rows.
//
// f(i, j) = best total using events 0..i with at most j dollars:
//   f(0, j) = 0
//   f(i, j) = max(f(i-1, j - cost_i) + duration_i, f(i-1, j))   if cost_i <= j
//   f(i, j) = f(i-1, j)                                        otherwise
//
// Row i only reads row i-1, so two rows of budget + 1 cells are enough. After
// each event the rows swap and `previous` holds the newest row. Column 0
// follows the same recurrence as every other column, so a free event is
// counted even at zero budget, matching the exhaustive and memoized answers.
//
// O(n * budget) time, O(budget) space.

use tracing::debug;

use crate::error::Result;
use crate::event::{Event, check_table_cells, validate_budget};

/// Maximum total duration of events attendable within `budget`, built
/// bottom-up over a rolling two-row table.
pub fn max_minutes_tabulated(events: &[Event], budget: i64) -> Result<u64> {
    let budget = validate_budget(budget)?;
    check_table_cells(2, budget)?;
    let width = budget + 1;

    let mut previous = vec![0u64; width];
    let mut current = vec![0u64; width];
    for event in events {
        let cost = event.cost as usize;
        let duration = u64::from(event.duration);
        for (j, cell) in current.iter_mut().enumerate() {
            *cell = if cost <= j {
                (previous[j - cost] + duration).max(previous[j])
            } else {
                previous[j]
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let best = previous[budget];
    debug!(events = events.len(), budget, best, "tabulation finished");
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FestivalError;
    use crate::event::programme;

    #[test]
    fn small_programme() {
        let events = programme(&[(75, 15), (9, 3), (60, 10), (24, 8), (10, 1)]);
        assert_eq!(max_minutes_tabulated(&events, 20).unwrap(), 94);
    }

    #[test]
    fn rows_are_monotone_in_budget() {
        let events = programme(&[(45, 12), (40, 10), (28, 7), (23, 5), (30, 5)]);
        let answers: Vec<u64> = (0..=40)
            .map(|b| max_minutes_tabulated(&events, b).unwrap())
            .collect();
        assert!(answers.windows(2).all(|w| w[0] <= w[1]), "{answers:?}");
    }

    #[test]
    fn each_event_used_at_most_once() {
        // An unbounded knapsack would take the (10, 1) event five times.
        let events = programme(&[(10, 1)]);
        assert_eq!(max_minutes_tabulated(&events, 5).unwrap(), 10);
    }

    #[test]
    fn free_event_counts_at_zero_budget() {
        let events = programme(&[(40, 10), (25, 0)]);
        assert_eq!(max_minutes_tabulated(&events, 0).unwrap(), 25);
    }

    #[test]
    fn negative_budget_is_an_error() {
        let err = max_minutes_tabulated(&[], -10).unwrap_err();
        assert!(matches!(err, FestivalError::NegativeBudget { budget: -10 }));
    }
}
