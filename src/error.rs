// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the trainer core.
//!
//! Every variant describes a programmer or data error. Callers get an
//! explicit error instead of a blank chord name.

use thiserror::Error;

/// Errors produced by key lookup, numeral resolution and option selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainerError {
    /// Key name is not one of the seven supported major keys
    #[error("Invalid key '{0}': expected one of C, D, E, F, G, A, B")]
    InvalidKey(String),

    /// Numeral symbol does not match any canonical Nashville numeral
    #[error("Invalid numeral '{0}': expected one of I, ii, iii, IV, V, vi, vii°")]
    InvalidNumeral(String),

    /// Not enough distinct chords to fill a multiple-choice set
    #[error("Need at least {needed} distinct distractors for '{correct}', found {available}")]
    InsufficientDistractors {
        correct: String,
        needed: usize,
        available: usize,
    },

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias for the trainer core
pub type Result<T> = std::result::Result<T, TrainerError>;
