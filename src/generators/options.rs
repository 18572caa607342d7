// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Multiple-choice option selection.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::TrainerError;

/// Options shown per question, the correct chord included
pub const OPTION_COUNT: usize = 4;

/// Pick the correct chord plus three distinct distractors, shuffled.
///
/// Distractors come from `chords_in_key` with the correct chord and any
/// duplicates removed. Fails rather than returning a short set.
pub fn pick_options<'a, R: Rng>(
    correct: &'a str,
    chords_in_key: &[&'a str],
    rng: &mut R,
) -> Result<Vec<&'a str>, TrainerError> {
    let mut pool: Vec<&'a str> = Vec::with_capacity(chords_in_key.len());
    for &chord in chords_in_key {
        if chord != correct && !pool.contains(&chord) {
            pool.push(chord);
        }
    }

    let needed = OPTION_COUNT - 1;
    if pool.len() < needed {
        return Err(TrainerError::InsufficientDistractors {
            correct: correct.to_string(),
            needed,
            available: pool.len(),
        });
    }

    let mut options: Vec<&'a str> = pool.choose_multiple(rng, needed).copied().collect();
    options.push(correct);
    options.shuffle(rng);
    Ok(options)
}
