// Key relations: the edges of the modulation graph.
//
// Each of the six relations moves the tonic by a fixed number of semitones
// and may switch modality. Measured from a major key:
//
//   0 Parallel      +0  minor   (C major -> C minor)
//   1 Supertonic    +2  minor   (C major -> D minor)
//   2 Mediant       +4  minor   (C major -> E minor)
//   3 Subdominant   +5  major   (C major -> F major)
//   4 Dominant      +7  major   (C major -> G major)
//   5 Relative      +9  minor   (C major -> A minor)
//
// From a minor key the same relation index runs the interval downward and
// lands on the opposite modality to the major case (C minor -> Bb major for
// relation 1, C minor -> G minor for relation 3). So the modality-switching
// relations 0, 1, 2, 5 are their own inverses, and 3 and 4 invert each other
// within one modality.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModulateError, Result};
use crate::key::{Modality, MusicalKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Parallel,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Relative,
}

impl Relation {
    pub const ALL: [Relation; 6] = [
        Relation::Parallel,
        Relation::Supertonic,
        Relation::Mediant,
        Relation::Subdominant,
        Relation::Dominant,
        Relation::Relative,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Result<Self> {
        Relation::ALL
            .get(index as usize)
            .copied()
            .ok_or(ModulateError::RelationOutOfRange(index))
    }

    /// Semitones above a major tonic, and the modality of the related key.
    fn offset_from_major(self) -> (u8, Modality) {
        match self {
            Relation::Parallel => (0, Modality::Minor),
            Relation::Supertonic => (2, Modality::Minor),
            Relation::Mediant => (4, Modality::Minor),
            Relation::Subdominant => (5, Modality::Major),
            Relation::Dominant => (7, Modality::Major),
            Relation::Relative => (9, Modality::Minor),
        }
    }

    /// The key this relation leads to from `key`.
    pub fn apply(self, key: MusicalKey) -> MusicalKey {
        let (semitones, target) = self.offset_from_major();
        match key.modality {
            Modality::Major => MusicalKey::new(key.tonic.up(semitones), target),
            Modality::Minor => MusicalKey::new(key.tonic.down(semitones), target.opposite()),
        }
    }
}

/// A subset of the six relations, stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct RelationSet(u8);

impl RelationSet {
    pub const fn empty() -> Self {
        RelationSet(0)
    }

    pub const fn all() -> Self {
        RelationSet(0b11_1111)
    }

    /// Build a set from relation indices, rejecting anything outside 0..=5.
    pub fn from_indices(indices: &[u8]) -> Result<Self> {
        indices
            .iter()
            .map(|&i| Relation::from_index(i))
            .collect()
    }

    pub fn insert(&mut self, relation: Relation) {
        self.0 |= 1 << relation.index();
    }

    pub fn contains(self, relation: Relation) -> bool {
        self.0 & (1 << relation.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Relation> {
        Relation::ALL.into_iter().filter(move |&r| self.contains(r))
    }

    pub fn indices(self) -> Vec<u8> {
        self.iter().map(Relation::index).collect()
    }
}

impl FromIterator<Relation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        let mut set = RelationSet::empty();
        for relation in iter {
            set.insert(relation);
        }
        set
    }
}

impl fmt::Debug for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromStr for RelationSet {
    type Err = ModulateError;

    /// Parse a comma-separated index list such as `"0,3,5"`. An empty
    /// string is the empty set.
    fn from_str(s: &str) -> Result<Self> {
        let mut set = RelationSet::empty();
        for part in s.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            let index: u8 = part
                .parse()
                .map_err(|_| ModulateError::MalformedRelations(s.to_string()))?;
            set.insert(Relation::from_index(index)?);
        }
        Ok(set)
    }
}

impl From<RelationSet> for Vec<u8> {
    fn from(set: RelationSet) -> Self {
        set.indices()
    }
}

impl TryFrom<Vec<u8>> for RelationSet {
    type Error = ModulateError;

    fn try_from(indices: Vec<u8>) -> Result<Self> {
        RelationSet::from_indices(&indices)
    }
}

impl MusicalKey {
    /// Keys reachable from this one by a single allowed relation.
    pub fn related(self, allowed: RelationSet) -> BTreeSet<MusicalKey> {
        allowed.iter().map(|relation| relation.apply(self)).collect()
    }
}

/// Conventional names of the keys related to `key` by the relations in
/// `allowed`.
pub fn related_keys(key: &str, allowed: &[u8]) -> Result<BTreeSet<String>> {
    let key: MusicalKey = key.parse()?;
    let allowed = RelationSet::from_indices(allowed)?;
    Ok(key.related(allowed).into_iter().map(String::from).collect())
}
