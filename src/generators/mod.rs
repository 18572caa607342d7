// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Random generation for the trainer.
//!
//! Progressions and multiple-choice options. Every function takes its random
//! source as a parameter so callers can seed it.

pub mod options;
pub mod progression;

pub use options::{pick_options, OPTION_COUNT};
pub use progression::{
    is_common_progression, ProgressionConfig, ProgressionGenerator, COMMON_PROGRESSIONS,
    COMMON_PROGRESSION_LENGTH, DEFAULT_COMMON_PROBABILITY, DEFAULT_WEIGHTS,
};
