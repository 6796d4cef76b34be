// Cadenza Modulate
//
// Finds a route for a piece of music to modulate from one key to another,
// moving only between closely related keys. The 24 major and minor keys form
// a graph whose edges are six classical key relationships (parallel,
// supertonic, mediant, subdominant, dominant, relative); the caller chooses
// which relationships are allowed.
//
// Architecture:
// - key.rs: `PitchClass`, `Modality`, `MusicalKey`, enharmonic parsing and
//   conventional spelling, `SpelledKey` for echoing the caller's spelling
// - relation.rs: `Relation`, `RelationSet`, neighbor generation
//   (`MusicalKey::related`, `related_keys`)
// - search.rs: breadth-first and iterative-deepening searches, `Search`
//   selector, string-level `modulate_bfs` / `modulate_dfs`
// - error.rs: `ModulateError`
//
// Searches return the fewest-key path or an empty path; only malformed
// input is an error.

pub mod error;
pub mod key;
pub mod relation;
pub mod search;

pub use error::{ModulateError, Result};
pub use key::{Modality, MusicalKey, PitchClass, SpelledKey};
pub use relation::{Relation, RelationSet, related_keys};
pub use search::{MAX_DEPTH, Search, bfs, iddfs, modulate_bfs, modulate_dfs};
