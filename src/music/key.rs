// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key table: the seven diatonic triads of each supported major key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::numeral::Numeral;
use crate::error::TrainerError;

/// Chord labels for one key, indexed by scale degree (I .. vii°)
pub type ChordFamily = [&'static str; 7];

/// Supported major keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

/// Diatonic triads per key, in `KeyName::ALL` order
static CHORD_FAMILIES: [ChordFamily; 7] = [
    ["C", "Dm", "Em", "F", "G", "Am", "Bdim"],
    ["D", "Em", "F#m", "G", "A", "Bm", "C#dim"],
    ["E", "F#m", "G#m", "A", "B", "C#m", "D#dim"],
    ["F", "Gm", "Am", "Bb", "C", "Dm", "Edim"],
    ["G", "Am", "Bm", "C", "D", "Em", "F#dim"],
    ["A", "Bm", "C#m", "D", "E", "F#m", "G#dim"],
    ["B", "C#m", "D#m", "E", "F#", "G#m", "A#dim"],
];

impl KeyName {
    /// All keys in display order
    pub const ALL: [KeyName; 7] = [
        KeyName::C,
        KeyName::D,
        KeyName::E,
        KeyName::F,
        KeyName::G,
        KeyName::A,
        KeyName::B,
    ];

    fn position(self) -> usize {
        match self {
            KeyName::C => 0,
            KeyName::D => 1,
            KeyName::E => 2,
            KeyName::F => 3,
            KeyName::G => 4,
            KeyName::A => 5,
            KeyName::B => 6,
        }
    }

    /// Key name as shown to the user
    pub fn name(self) -> &'static str {
        match self {
            KeyName::C => "C",
            KeyName::D => "D",
            KeyName::E => "E",
            KeyName::F => "F",
            KeyName::G => "G",
            KeyName::A => "A",
            KeyName::B => "B",
        }
    }

    /// Parse a key name (e.g. "G", " g ")
    pub fn parse(s: &str) -> Result<Self, TrainerError> {
        let name = s.trim().to_uppercase();
        KeyName::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| TrainerError::InvalidKey(s.to_string()))
    }

    /// The seven diatonic triads of this key
    pub fn chords(self) -> &'static ChordFamily {
        &CHORD_FAMILIES[self.position()]
    }

    /// Chord label on the degree named by `numeral`
    pub fn chord(self, numeral: Numeral) -> &'static str {
        self.chords()[numeral.index()]
    }

    /// Next key in display order, wrapping around
    pub fn next(self) -> Self {
        KeyName::ALL[(self.position() + 1) % KeyName::ALL.len()]
    }

    /// Previous key in display order, wrapping around
    pub fn previous(self) -> Self {
        let len = KeyName::ALL.len();
        KeyName::ALL[(self.position() + len - 1) % len]
    }
}

impl FromStr for KeyName {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyName::parse(s)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Look up the chord family for a key given by name
pub fn chords_in_key(key: &str) -> Result<&'static ChordFamily, TrainerError> {
    KeyName::parse(key).map(KeyName::chords)
}

/// Names of all supported keys
pub fn list_keys() -> Vec<&'static str> {
    KeyName::ALL.iter().map(|k| k.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::numeral::ChordQuality;

    fn label_quality(label: &str) -> ChordQuality {
        if label.ends_with("dim") {
            ChordQuality::Diminished
        } else if label.ends_with('m') {
            ChordQuality::Minor
        } else {
            ChordQuality::Major
        }
    }

    #[test]
    fn test_key_parse() {
        assert_eq!(KeyName::parse("C"), Ok(KeyName::C));
        assert_eq!(KeyName::parse(" g "), Ok(KeyName::G));
        assert_eq!(
            KeyName::parse("H"),
            Err(TrainerError::InvalidKey("H".to_string()))
        );
        assert!(KeyName::parse("C#").is_err());
        assert!(KeyName::parse("").is_err());
    }

    #[test]
    fn test_table_qualities() {
        for key in KeyName::ALL {
            let chords = key.chords();
            assert_eq!(chords.len(), 7);
            for numeral in Numeral::ALL {
                assert_eq!(
                    label_quality(key.chord(numeral)),
                    numeral.quality(),
                    "{} in {}",
                    numeral,
                    key
                );
            }
        }
    }

    #[test]
    fn test_tonic_matches_key_name() {
        for key in KeyName::ALL {
            assert_eq!(key.chord(Numeral::Tonic), key.name());
        }
    }

    #[test]
    fn test_chords_are_distinct_within_key() {
        for key in KeyName::ALL {
            let mut chords = key.chords().to_vec();
            chords.sort();
            chords.dedup();
            assert_eq!(chords.len(), 7, "duplicate chord in {}", key);
        }
    }

    #[test]
    fn test_chords_in_key_lookup() {
        assert_eq!(
            chords_in_key("G").unwrap(),
            &["G", "Am", "Bm", "C", "D", "Em", "F#dim"]
        );
        assert!(chords_in_key("H").is_err());
    }

    #[test]
    fn test_list_keys() {
        assert_eq!(list_keys(), vec!["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_key_cycling() {
        assert_eq!(KeyName::C.next(), KeyName::D);
        assert_eq!(KeyName::B.next(), KeyName::C);
        assert_eq!(KeyName::C.previous(), KeyName::B);
        assert_eq!(KeyName::G.previous(), KeyName::F);
    }
}
