// Solver selection and cross-checking.
//
// `Strategy` names the three interchangeable solvers so callers (the CLI,
// the timing trials, the bench) can pick one by value instead of by
// function pointer. `cross_check` runs all three and insists they agree,
// which is the core correctness property of the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FestivalError, Result};
use crate::event::Event;
use crate::exhaustive::max_minutes_exhaustive;
use crate::memoized::max_minutes_memoized;
use crate::tabulated::max_minutes_tabulated;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Recursive backtracking over every subset.
    Exhaustive,
    /// Top-down recursion with an (index, budget) memo table.
    Memoized,
    /// Bottom-up tabulation over two rolling rows.
    Tabulated,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Exhaustive, Strategy::Memoized, Strategy::Tabulated];

    pub fn solve(self, events: &[Event], budget: i64) -> Result<u64> {
        match self {
            Strategy::Exhaustive => max_minutes_exhaustive(events, budget),
            Strategy::Memoized => max_minutes_memoized(events, budget),
            Strategy::Tabulated => max_minutes_tabulated(events, budget),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Memoized => "memoized",
            Strategy::Tabulated => "tabulated",
        }
    }

    /// Time complexity in terms of n events and budget m.
    pub fn complexity(self) -> &'static str {
        match self {
            Strategy::Exhaustive => "O(2^n) time, O(n) space",
            Strategy::Memoized => "O(n*m) time, O(n*m) space",
            Strategy::Tabulated => "O(n*m) time, O(m) space",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = FestivalError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FestivalError::UnknownStrategy(s.to_string()))
    }
}

/// Solve with every strategy and return the common answer, or
/// `StrategyMismatch` naming the first pair that disagrees.
pub fn cross_check(events: &[Event], budget: i64) -> Result<u64> {
    let reference = Strategy::Exhaustive;
    let expected = reference.solve(events, budget)?;
    for strategy in [Strategy::Memoized, Strategy::Tabulated] {
        let minutes = strategy.solve(events, budget)?;
        if minutes != expected {
            return Err(FestivalError::StrategyMismatch {
                left: reference,
                left_minutes: expected,
                right: strategy,
                right_minutes: minutes,
            });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::programme;

    #[test]
    fn names_round_trip_through_from_str() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!(" Memoized ".parse::<Strategy>().unwrap(), Strategy::Memoized);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let err = "greedy".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, FestivalError::UnknownStrategy(ref s) if s == "greedy"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Strategy::Tabulated).unwrap();
        assert_eq!(json, "\"tabulated\"");
        let back: Strategy = serde_json::from_str("\"exhaustive\"").unwrap();
        assert_eq!(back, Strategy::Exhaustive);
    }

    #[test]
    fn cross_check_agrees_on_known_programmes() {
        let events = programme(&[
            (52, 13),
            (40, 10),
            (28, 7),
            (35, 6),
            (30, 5),
            (15, 3),
            (11, 2),
            (5, 1),
        ]);
        assert_eq!(cross_check(&events, 15).unwrap(), 85);
        let events =
            programme(&[(45, 12), (40, 10), (28, 7), (23, 5), (30, 5), (15, 3), (5, 1)]);
        assert_eq!(cross_check(&events, 20).unwrap(), 96);
    }

    #[test]
    fn cross_check_propagates_invalid_budget() {
        let err = cross_check(&[], -1).unwrap_err();
        assert!(matches!(err, FestivalError::NegativeBudget { .. }));
    }
}
