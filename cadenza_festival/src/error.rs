// Error taxonomy for the festival planner.
//
// Invalid input (negative budget, oversized tables, programmes too long to
// recurse over, bad trial configs) is rejected up front; once a solver
// starts it always runs to completion, so there is no "partial answer"
// variant. `StrategyMismatch` is only produced by `strategy::cross_check`
// and indicates a solver bug, not bad input.

use thiserror::Error;

use crate::strategy::Strategy;

#[derive(Error, Debug)]
pub enum FestivalError {
    #[error("budget must be non-negative, got {budget}")]
    NegativeBudget { budget: i64 },

    #[error("solver table needs {cells} cells, more than the limit of {max}")]
    TableTooLarge { cells: u128, max: u128 },

    #[error("{events} events is more than the recursive solvers' limit of {max}")]
    TooManyEvents { events: usize, max: usize },

    #[error(
        "strategies disagree: {left} found {left_minutes} minutes, {right} found {right_minutes}"
    )]
    StrategyMismatch {
        left: Strategy,
        left_minutes: u64,
        right: Strategy,
        right_minutes: u64,
    },

    #[error("unknown strategy '{0}' (expected exhaustive, memoized or tabulated)")]
    UnknownStrategy(String),

    #[error("invalid trial configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FestivalError>;
