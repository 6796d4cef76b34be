// Cadenza Festival Planner
//
// Given a programme of concerts, each with a duration and a ticket price,
// and a fixed budget, find the largest total number of minutes of music that
// can be attended. Every concert is attended at most once, so this is the
// 0/1 knapsack problem with durations as values and prices as weights.
//
// The crate solves it three ways, all returning the same answer:
// - exhaustive.rs: recursive backtracking over all 2^n selections
// - memoized.rs: the same recursion cached on (event index, budget left)
// - tabulated.rs: bottom-up table folded into two rolling rows
//
// Supporting modules:
// - event.rs: `Event`, budget validation, table-size and recursion guards,
//   random programmes
// - strategy.rs: `Strategy` selector and the `cross_check` agreement test
// - trials.rs: JSON-configurable timing sweeps over size and budget
// - error.rs: `FestivalError`
//
// Everything is deterministic given a seed; randomness comes from
// `cadenza_prng`.

pub mod error;
pub mod event;
pub mod exhaustive;
pub mod memoized;
pub mod strategy;
pub mod tabulated;
pub mod trials;

pub use error::{FestivalError, Result};
pub use event::{Event, programme};
pub use exhaustive::max_minutes_exhaustive;
pub use memoized::max_minutes_memoized;
pub use strategy::{Strategy, cross_check};
pub use tabulated::max_minutes_tabulated;
