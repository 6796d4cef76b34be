// Memoized search: the exhaustive recursion keyed by state, not by path.
//
// The recursion is reformulated so each call answers "best total from event
// `index` onward with `remaining` dollars". That answer does not depend on
// how the caller got there, so it can be cached in an n x (budget + 1)
// table. Cells start as `None` (unset); every real answer is `Some`, so no
// sentinel value can collide with a legitimate result.
//
// O(n * budget) time and space. Recursion depth is n + 1, so programmes
// longer than `MAX_RECURSION_EVENTS` are refused before the table is built.

use tracing::{debug, trace};

use crate::error::Result;
use crate::event::{Event, check_recursion_depth, check_table_cells, validate_budget};

/// Maximum total duration of events attendable within `budget`, using
/// top-down recursion with a memo table.
pub fn max_minutes_memoized(events: &[Event], budget: i64) -> Result<u64> {
    let budget = validate_budget(budget)?;
    check_recursion_depth(events.len())?;
    let mut memo = MemoTable::new(events.len(), budget)?;
    let best = memo.best_from(events, 0, budget);
    debug!(
        events = events.len(),
        budget,
        best,
        cached = memo.filled(),
        "memoized search finished"
    );
    Ok(best)
}

/// Flat row-major table: row = event index, column = remaining budget.
struct MemoTable {
    width: usize,
    cells: Vec<Option<u64>>,
}

impl MemoTable {
    fn new(rows: usize, budget: usize) -> Result<Self> {
        check_table_cells(rows, budget)?;
        let width = budget + 1;
        trace!(rows, width, "allocating memo table");
        Ok(MemoTable {
            width,
            cells: vec![None; rows * width],
        })
    }

    fn best_from(&mut self, events: &[Event], index: usize, remaining: usize) -> u64 {
        let Some(event) = events.get(index) else {
            return 0;
        };
        let slot = index * self.width + remaining;
        if let Some(best) = self.cells[slot] {
            return best;
        }

        let cost = event.cost as usize;
        let best = if cost > remaining {
            self.best_from(events, index + 1, remaining)
        } else {
            let attend =
                u64::from(event.duration) + self.best_from(events, index + 1, remaining - cost);
            let skip = self.best_from(events, index + 1, remaining);
            attend.max(skip)
        };
        self.cells[slot] = Some(best);
        best
    }

    /// Number of states actually visited.
    fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
