// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Numeral resolution: map Nashville numerals to chord names in a key.

use super::key::KeyName;
use super::numeral::Numeral;
use crate::error::TrainerError;

/// Resolve a single numeral symbol in the named key
pub fn resolve(numeral: &str, key: &str) -> Result<&'static str, TrainerError> {
    let key = KeyName::parse(key)?;
    let numeral = Numeral::parse(numeral)?;
    Ok(key.chord(numeral))
}

/// Resolve every numeral of a progression, preserving order.
///
/// Accepts typed numerals or their symbols. The key is validated before
/// any numeral, and the first unknown symbol aborts the whole call.
pub fn resolve_progression<S: AsRef<str>>(
    progression: &[S],
    key: &str,
) -> Result<Vec<&'static str>, TrainerError> {
    let key = KeyName::parse(key)?;
    progression
        .iter()
        .map(|symbol| Numeral::parse(symbol.as_ref()).map(|n| key.chord(n)))
        .collect()
}
