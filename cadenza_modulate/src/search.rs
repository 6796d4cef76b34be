// Modulation search over the implicit key graph.
//
// Nodes are the 24 major and minor keys; edges come from
// `MusicalKey::related` on the fly, so no graph is ever materialized. Paths
// are simple: a key already on a path is never appended to it again.
//
// Two searches, both returning a path with the fewest keys:
// - `bfs`: a FIFO queue of candidate paths. Candidates share prefixes
//   through a parent-linked arena (`Trail`), so enqueueing a path costs one
//   node rather than a copy of the whole prefix.
// - `iddfs`: depth-first backtracking on one mutable path, rerun with depth
//   limits 0, 1, ..., `MAX_DEPTH`. Trades repeated work for a frontier that
//   never grows beyond the current path. Deepening stops early once a pass
//   finishes without any branch hitting the limit.
//
// Neighbors are visited in `MusicalKey` order (tonic, then modality), so
// both searches are deterministic.
//
// `modulate_bfs` / `modulate_dfs` are the string-level entry points. They
// echo the caller's spelling of the start and end keys and use conventional
// spelling for the keys in between.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ModulateError, Result};
use crate::key::{MusicalKey, SpelledKey};
use crate::relation::RelationSet;

/// Deepest limit tried by `iddfs`, in edges. There are only 24 keys, so any
/// simple path fits.
pub const MAX_DEPTH: usize = 24;

/// A candidate BFS path, stored as its last key plus a link to the
/// candidate it extends.
struct Trail {
    key: MusicalKey,
    parent: Option<usize>,
}

/// Walk `id`'s parent links looking for `key`.
fn trail_contains(trails: &[Trail], mut id: usize, key: MusicalKey) -> bool {
    loop {
        let trail = &trails[id];
        if trail.key == key {
            return true;
        }
        match trail.parent {
            Some(parent) => id = parent,
            None => return false,
        }
    }
}

fn reconstruct(trails: &[Trail], mut id: usize) -> Vec<MusicalKey> {
    let mut path = vec![trails[id].key];
    while let Some(parent) = trails[id].parent {
        path.push(trails[parent].key);
        id = parent;
    }
    path.reverse();
    path
}

/// Shortest modulation from `start` to `goal` by breadth-first search over
/// candidate paths. `None` when the goal is unreachable.
pub fn bfs(start: MusicalKey, goal: MusicalKey, allowed: RelationSet) -> Option<Vec<MusicalKey>> {
    let mut trails = vec![Trail {
        key: start,
        parent: None,
    }];
    let mut queue = VecDeque::from([0usize]);

    while let Some(id) = queue.pop_front() {
        let key = trails[id].key;
        if key == goal {
            let path = reconstruct(&trails, id);
            debug!(%start, %goal, keys = path.len(), candidates = trails.len(), "bfs found path");
            return Some(path);
        }
        for next in key.related(allowed) {
            if trail_contains(&trails, id, next) {
                continue;
            }
            trails.push(Trail {
                key: next,
                parent: Some(id),
            });
            queue.push_back(trails.len() - 1);
        }
    }

    debug!(%start, %goal, candidates = trails.len(), "bfs exhausted");
    None
}

/// Shortest modulation from `start` to `goal` by iterative-deepening DFS.
/// `None` when no path of at most `MAX_DEPTH` edges exists.
pub fn iddfs(start: MusicalKey, goal: MusicalKey, allowed: RelationSet) -> Option<Vec<MusicalKey>> {
    let mut path = vec![start];
    for limit in 0..=MAX_DEPTH {
        trace!(limit, "deepening");
        match descend(goal, allowed, &mut path, limit) {
            Descent::Found => {
                debug!(%start, %goal, keys = path.len(), limit, "iddfs found path");
                return Some(path);
            }
            Descent::CutOff => {}
            Descent::Exhausted => {
                debug!(%start, %goal, limit, "iddfs exhausted reachable keys");
                return None;
            }
        }
    }
    debug!(%start, %goal, "iddfs exhausted depth limit");
    None
}

/// Outcome of one depth-limited descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Descent {
    Found,
    /// Some branch stopped only because the limit ran out.
    CutOff,
    /// Every branch dead-ended; a deeper limit would find nothing new.
    Exhausted,
}

/// Extend `path` by at most `remaining` more keys until it ends at `goal`.
/// Unless the goal is found, `path` is left as it was.
fn descend(
    goal: MusicalKey,
    allowed: RelationSet,
    path: &mut Vec<MusicalKey>,
    remaining: usize,
) -> Descent {
    let Some(&current) = path.last() else {
        return Descent::Exhausted;
    };
    if current == goal {
        return Descent::Found;
    }
    let related = current.related(allowed);
    if remaining == 0 {
        return if related.iter().any(|next| !path.contains(next)) {
            Descent::CutOff
        } else {
            Descent::Exhausted
        };
    }
    let mut outcome = Descent::Exhausted;
    for next in related {
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        match descend(goal, allowed, path, remaining - 1) {
            Descent::Found => return Descent::Found,
            Descent::CutOff => outcome = Descent::CutOff,
            Descent::Exhausted => {}
        }
        path.pop();
    }
    outcome
}

/// Which search to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Search {
    Bfs,
    Dfs,
}

impl Search {
    pub const ALL: [Search; 2] = [Search::Bfs, Search::Dfs];

    pub fn find(
        self,
        start: MusicalKey,
        goal: MusicalKey,
        allowed: RelationSet,
    ) -> Option<Vec<MusicalKey>> {
        match self {
            Search::Bfs => bfs(start, goal, allowed),
            Search::Dfs => iddfs(start, goal, allowed),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Search::Bfs => "bfs",
            Search::Dfs => "dfs",
        }
    }

    /// Run the search between two written keys and render the result.
    ///
    /// The first and last keys keep the caller's spelling; a start equal to
    /// the goal yields a one-key path spelled like `end`. An unreachable goal
    /// yields an empty path.
    pub fn modulate(
        self,
        start: SpelledKey,
        end: SpelledKey,
        allowed: RelationSet,
    ) -> Vec<SpelledKey> {
        let Some(path) = self.find(start.key, end.key, allowed) else {
            return Vec::new();
        };
        let last = path.len() - 1;
        path.into_iter()
            .enumerate()
            .map(|(i, key)| match i {
                i if i == last => end,
                0 => start,
                _ => key.spelled(),
            })
            .collect()
    }
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Search {
    type Err = ModulateError;

    fn from_str(s: &str) -> Result<Self> {
        Search::ALL
            .into_iter()
            .find(|search| search.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModulateError::UnknownSearch(s.to_string()))
    }
}

fn modulate_with(search: Search, start: &str, end: &str, allowed: &[u8]) -> Result<Vec<String>> {
    let start: SpelledKey = start.parse()?;
    let end: SpelledKey = end.parse()?;
    let allowed = RelationSet::from_indices(allowed)?;
    Ok(search
        .modulate(start, end, allowed)
        .into_iter()
        .map(|key| key.to_string())
        .collect())
}

/// Breadth-first modulation between two key names. Empty when unreachable.
pub fn modulate_bfs(start: &str, end: &str, allowed: &[u8]) -> Result<Vec<String>> {
    modulate_with(Search::Bfs, start, end, allowed)
}

/// Iterative-deepening modulation between two key names. Empty when no path
/// fits within `MAX_DEPTH`.
pub fn modulate_dfs(start: &str, end: &str, allowed: &[u8]) -> Result<Vec<String>> {
    modulate_with(Search::Dfs, start, end, allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [u8; 6] = [0, 1, 2, 3, 4, 5];

    #[test]
    fn trail_arena_shares_prefixes() {
        let c = MusicalKey::major(0);
        let g = MusicalKey::major(7);
        let d = MusicalKey::major(2);
        let trails = vec![
            Trail { key: c, parent: None },
            Trail { key: g, parent: Some(0) },
            Trail { key: d, parent: Some(1) },
            Trail { key: MusicalKey::minor(0), parent: Some(0) },
        ];
        assert_eq!(reconstruct(&trails, 2), vec![c, g, d]);
        assert!(trail_contains(&trails, 2, c));
        assert!(!trail_contains(&trails, 3, g));
    }

    #[test]
    fn descend_restores_path_on_failure() {
        let start = MusicalKey::minor(7);
        let mut path = vec![start];
        let goal = MusicalKey::major(8);
        let allowed = RelationSet::from_indices(&[1]).unwrap();
        assert_eq!(descend(goal, allowed, &mut path, 5), Descent::Exhausted);
        assert_eq!(path, vec![start]);
        // G minor -> F major -> back to G minor is the whole reachable set,
        // so one step in the search is already cut off.
        assert_eq!(descend(goal, allowed, &mut path, 0), Descent::CutOff);
        assert_eq!(descend(goal, allowed, &mut path, 1), Descent::Exhausted);
    }

    #[test]
    fn start_equals_goal() {
        for search in Search::ALL {
            let path = modulate_with(search, "C major", "C major", &ALL).unwrap();
            assert_eq!(path, vec!["C major".to_string()], "{search}");
        }
    }

    #[test]
    fn goal_spelled_as_caller_wrote_it() {
        for search in Search::ALL {
            let path = modulate_with(search, "C major", "A# minor", &ALL).unwrap();
            assert_eq!(path.len(), 4, "{search}");
            assert_eq!(path.last().map(String::as_str), Some("A# minor"));
            let path = modulate_with(search, "C major", "Bb minor", &ALL).unwrap();
            assert_eq!(path.last().map(String::as_str), Some("Bb minor"));
        }
    }

    #[test]
    fn start_spelling_is_preserved() {
        let path = modulate_bfs("C# major", "Bb minor", &ALL).unwrap();
        assert_eq!(path.first().map(String::as_str), Some("C# major"));
        // The same key under its other name is not revisited.
        assert!(!path[1..].iter().any(|k| k == "Db major"));
    }

    #[test]
    fn search_names_parse() {
        assert_eq!("BFS".parse::<Search>().unwrap(), Search::Bfs);
        assert_eq!("dfs".parse::<Search>().unwrap(), Search::Dfs);
        assert_eq!(
            "astar".parse::<Search>(),
            Err(ModulateError::UnknownSearch("astar".into()))
        );
    }
}
