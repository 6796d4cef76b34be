// Musical keys: pitch classes, modality, spelling.
//
// A `MusicalKey` is identified by its tonic pitch class (0 = C .. 11 = B)
// and its modality. Spelling is presentation only: "A# minor" and
// "Bb minor" are the same key. Two spellings matter:
// - conventional: sharp names, except the handful of keys musicians always
//   write with flats (Bb major/minor, Eb major, Ab major, Db major);
// - as written: a `SpelledKey` remembers the tonic name the caller used, so
//   a search can echo the caller's own spelling of its endpoints.
//
// The lookup tables are `const` data. Parsing accepts the twelve sharp
// names and the five common flat names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModulateError, Result};

/// Sharp spelling of each pitch class, indexed by pitch class.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings accepted on input, with their pitch class.
pub const FLAT_NAMES: [(&str, u8); 5] = [("Db", 1), ("Eb", 3), ("Gb", 6), ("Ab", 8), ("Bb", 10)];

/// Keys whose conventional spelling is the flat one.
const FLAT_SPELLED_KEYS: [(u8, Modality, &str); 5] = [
    (1, Modality::Major, "Db"),
    (3, Modality::Major, "Eb"),
    (8, Modality::Major, "Ab"),
    (10, Modality::Major, "Bb"),
    (10, Modality::Minor, "Bb"),
];

/// One of the twelve pitch classes of equal temperament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const fn new(pc: u8) -> Self {
        PitchClass(pc % 12)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn up(self, semitones: u8) -> Self {
        PitchClass::new(self.0 + semitones % 12)
    }

    pub fn down(self, semitones: u8) -> Self {
        PitchClass::new(self.0 + 12 - semitones % 12)
    }

    pub fn sharp_name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    /// Look up a tonic name, returning the pitch class and the name's static
    /// spelling.
    pub fn parse_name(name: &str) -> Option<(PitchClass, &'static str)> {
        if let Some(pc) = SHARP_NAMES.iter().position(|&sharp| sharp == name) {
            return Some((PitchClass(pc as u8), SHARP_NAMES[pc]));
        }
        FLAT_NAMES
            .iter()
            .find(|(flat, _)| *flat == name)
            .map(|&(flat, pc)| (PitchClass(pc), flat))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Major,
    Minor,
}

impl Modality {
    pub fn name(self) -> &'static str {
        match self {
            Modality::Major => "major",
            Modality::Minor => "minor",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Modality::Major => Modality::Minor,
            Modality::Minor => Modality::Major,
        }
    }
}

impl FromStr for Modality {
    type Err = ModulateError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("major") {
            Ok(Modality::Major)
        } else if s.eq_ignore_ascii_case("minor") {
            Ok(Modality::Minor)
        } else {
            Err(ModulateError::UnknownModality(s.to_string()))
        }
    }
}

/// A key independent of spelling. Ordered by tonic, then modality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MusicalKey {
    pub tonic: PitchClass,
    pub modality: Modality,
}

impl MusicalKey {
    pub const fn new(tonic: PitchClass, modality: Modality) -> Self {
        MusicalKey { tonic, modality }
    }

    pub const fn major(pc: u8) -> Self {
        MusicalKey::new(PitchClass::new(pc), Modality::Major)
    }

    pub const fn minor(pc: u8) -> Self {
        MusicalKey::new(PitchClass::new(pc), Modality::Minor)
    }

    /// Tonic name as a musician would write this key.
    pub fn conventional_tonic(self) -> &'static str {
        FLAT_SPELLED_KEYS
            .iter()
            .find(|&&(pc, modality, _)| pc == self.tonic.index() && modality == self.modality)
            .map_or(self.tonic.sharp_name(), |&(_, _, flat)| flat)
    }

    pub fn spelled(self) -> SpelledKey {
        SpelledKey {
            key: self,
            tonic_name: self.conventional_tonic(),
        }
    }
}

impl fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.conventional_tonic(), self.modality.name())
    }
}

impl FromStr for MusicalKey {
    type Err = ModulateError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<SpelledKey>().map(|spelled| spelled.key)
    }
}

impl From<MusicalKey> for String {
    fn from(key: MusicalKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MusicalKey {
    type Error = ModulateError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A key together with the tonic spelling it was written with.
///
/// Equality compares spelling too; compare `.key` for enharmonic identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpelledKey {
    pub key: MusicalKey,
    pub tonic_name: &'static str,
}

impl fmt::Display for SpelledKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic_name, self.key.modality.name())
    }
}

impl FromStr for SpelledKey {
    type Err = ModulateError;

    /// Parse `"<tonic> <major|minor>"`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (Some(tonic), Some(modality), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ModulateError::MalformedKey(s.to_string()));
        };
        let (pc, tonic_name) = PitchClass::parse_name(tonic)
            .ok_or_else(|| ModulateError::UnknownTonic(tonic.to_string()))?;
        let modality = modality.parse()?;
        Ok(SpelledKey {
            key: MusicalKey::new(pc, modality),
            tonic_name,
        })
    }
}

impl From<MusicalKey> for SpelledKey {
    fn from(key: MusicalKey) -> Self {
        key.spelled()
    }
}
