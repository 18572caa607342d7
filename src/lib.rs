// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Nashville Number System chord trainer.
//!
//! The core is a handful of pure or rng-parameterized functions: generate a
//! progression of numerals, resolve it to chord names in a major key, and
//! pick multiple-choice options. The quiz, timer, config and terminal UI
//! layers are built on top of them.
//!
//! ```
//! let chords = nashville::resolve_progression(&["I", "IV", "V", "vi"], "C").unwrap();
//! assert_eq!(chords, ["C", "F", "G", "Am"]);
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod music;
pub mod quiz;
pub mod timing;
pub mod ui;

use rand::Rng;

pub use error::TrainerError;
pub use generators::{ProgressionConfig, ProgressionGenerator};
pub use music::{chords_in_key, list_keys, resolve, resolve_progression, KeyName, Numeral};

/// Generate `num_chords` numerals with the default weights and thread rng
pub fn generate_progression(num_chords: usize) -> Vec<Numeral> {
    generate_progression_with(num_chords, &mut rand::thread_rng())
}

/// Generate `num_chords` numerals with the default weights
pub fn generate_progression_with<R: Rng>(num_chords: usize, rng: &mut R) -> Vec<Numeral> {
    ProgressionGenerator::default().generate(num_chords, rng)
}

/// Four shuffled options containing `correct` once, using the thread rng
pub fn pick_options<'a>(
    correct: &'a str,
    chords_in_key: &[&'a str],
) -> Result<Vec<&'a str>, TrainerError> {
    generators::pick_options(correct, chords_in_key, &mut rand::thread_rng())
}

/// Four shuffled options containing `correct` once
pub fn pick_options_with<'a, R: Rng>(
    correct: &'a str,
    chords_in_key: &[&'a str],
    rng: &mut R,
) -> Result<Vec<&'a str>, TrainerError> {
    generators::pick_options(correct, chords_in_key, rng)
}
