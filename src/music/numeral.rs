// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Nashville numerals for the seven diatonic degrees of a major key.
//!
//! The seventh degree is always written `vii°` with U+00B0. Generation,
//! resolution, display and config files share this one spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;

/// Quality of a diatonic triad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
}

/// A Nashville numeral (scale degree 1-7 in a major key)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Numeral {
    Tonic,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Submediant,
    LeadingTone,
}

impl Numeral {
    /// All numerals in scale-degree order
    pub const ALL: [Numeral; 7] = [
        Numeral::Tonic,
        Numeral::Supertonic,
        Numeral::Mediant,
        Numeral::Subdominant,
        Numeral::Dominant,
        Numeral::Submediant,
        Numeral::LeadingTone,
    ];

    /// Zero-based scale-degree index (I = 0 .. vii° = 6)
    pub fn index(self) -> usize {
        match self {
            Numeral::Tonic => 0,
            Numeral::Supertonic => 1,
            Numeral::Mediant => 2,
            Numeral::Subdominant => 3,
            Numeral::Dominant => 4,
            Numeral::Submediant => 5,
            Numeral::LeadingTone => 6,
        }
    }

    /// Canonical symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Numeral::Tonic => "I",
            Numeral::Supertonic => "ii",
            Numeral::Mediant => "iii",
            Numeral::Subdominant => "IV",
            Numeral::Dominant => "V",
            Numeral::Submediant => "vi",
            Numeral::LeadingTone => "vii°",
        }
    }

    /// Triad quality on this degree of a major scale
    pub fn quality(self) -> ChordQuality {
        match self {
            Numeral::Tonic | Numeral::Subdominant | Numeral::Dominant => ChordQuality::Major,
            Numeral::Supertonic | Numeral::Mediant | Numeral::Submediant => ChordQuality::Minor,
            Numeral::LeadingTone => ChordQuality::Diminished,
        }
    }

    /// Parse a symbol by exact match against the canonical spellings.
    ///
    /// Case matters ("ii" is not "II") and only the degree-sign form of the
    /// seventh degree is accepted.
    pub fn parse(symbol: &str) -> Result<Self, TrainerError> {
        Numeral::ALL
            .iter()
            .copied()
            .find(|n| n.symbol() == symbol)
            .ok_or_else(|| TrainerError::InvalidNumeral(symbol.to_string()))
    }
}

impl FromStr for Numeral {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Numeral::parse(s)
    }
}

impl TryFrom<String> for Numeral {
    type Error = TrainerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Numeral::parse(&s)
    }
}

impl From<Numeral> for String {
    fn from(numeral: Numeral) -> Self {
        numeral.symbol().to_string()
    }
}

impl AsRef<str> for Numeral {
    fn as_ref(&self) -> &str {
        self.symbol()
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
