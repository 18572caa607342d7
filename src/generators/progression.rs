// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Progression generator.
//!
//! Four-chord requests usually return one of the curated progressions below.
//! Everything else falls back to independent weighted draws, so repeated
//! numerals within a progression are expected.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::TrainerError;
use crate::music::Numeral;

use Numeral::{
    Dominant as V, LeadingTone as VIIo, Mediant as III, Subdominant as IV, Submediant as VI,
    Supertonic as II, Tonic as I,
};

/// Length of every curated progression
pub const COMMON_PROGRESSION_LENGTH: usize = 4;

/// Chance of using a curated progression for a four-chord request
pub const DEFAULT_COMMON_PROBABILITY: f64 = 0.8;

/// Default fallback weights
pub const DEFAULT_WEIGHTS: [(Numeral, u32); 7] = [
    (I, 35),
    (IV, 25),
    (V, 20),
    (VI, 15),
    (II, 10),
    (III, 5),
    (VIIo, 3),
];

/// Curated progressions from pop, rock, jazz, blues and country
pub static COMMON_PROGRESSIONS: [[Numeral; COMMON_PROGRESSION_LENGTH]; 8] = [
    [I, V, VI, IV],  // 50s progression variant
    [VI, IV, I, V],  // Modern pop
    [I, IV, V, IV],  // Classic rock
    [I, VI, IV, V],  // 50s progression
    [II, V, I, IV],  // Jazz-influenced
    [I, IV, VI, V],  // Pop punk
    [I, V, IV, V],   // Blues turnaround
    [I, IV, I, V],   // Country
];

/// Check whether a progression is one of the curated ones
pub fn is_common_progression(progression: &[Numeral]) -> bool {
    COMMON_PROGRESSIONS.iter().any(|p| p[..] == *progression)
}

/// Tunable generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionConfig {
    /// Chance (0.0 - 1.0) of a curated progression for four-chord requests
    pub common_probability: f64,
    /// Relative weight per numeral for the fallback path
    pub weights: Vec<(Numeral, u32)>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            common_probability: DEFAULT_COMMON_PROBABILITY,
            weights: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}

impl ProgressionConfig {
    /// Check ranges before the config reaches a generator
    pub fn validate(&self) -> Result<(), TrainerError> {
        if !(0.0..=1.0).contains(&self.common_probability) {
            return Err(TrainerError::InvalidConfig(format!(
                "common_probability must be within 0.0..=1.0, got {}",
                self.common_probability
            )));
        }
        if self.weights.iter().all(|&(_, w)| w == 0) {
            return Err(TrainerError::InvalidConfig(
                "at least one numeral weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates Nashville progressions from curated and weighted sources
#[derive(Debug, Clone)]
pub struct ProgressionGenerator {
    config: ProgressionConfig,
    numerals: Vec<Numeral>,
    distribution: WeightedIndex<u32>,
}

impl ProgressionGenerator {
    /// Create a generator, rejecting out-of-range configs
    pub fn new(config: ProgressionConfig) -> Result<Self, TrainerError> {
        config.validate()?;

        let (numerals, weights): (Vec<Numeral>, Vec<u32>) = config
            .weights
            .iter()
            .filter(|&&(_, w)| w > 0)
            .copied()
            .unzip();

        let distribution = WeightedIndex::new(&weights)
            .map_err(|e| TrainerError::InvalidConfig(format!("numeral weights: {}", e)))?;

        Ok(Self {
            config,
            numerals,
            distribution,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Generate a progression of exactly `num_chords` numerals
    pub fn generate<R: Rng>(&self, num_chords: usize, rng: &mut R) -> Vec<Numeral> {
        if num_chords == COMMON_PROGRESSION_LENGTH && rng.gen_bool(self.config.common_probability) {
            if let Some(progression) = COMMON_PROGRESSIONS.choose(rng) {
                debug!(?progression, "picked curated progression");
                return progression.to_vec();
            }
        }

        let progression: Vec<Numeral> = (0..num_chords)
            .map(|_| self.numerals[self.distribution.sample(rng)])
            .collect();
        debug!(?progression, "drew weighted progression");
        progression
    }
}

impl Default for ProgressionGenerator {
    fn default() -> Self {
        let config = ProgressionConfig::default();
        let (numerals, weights): (Vec<Numeral>, Vec<u32>) = config.weights.iter().copied().unzip();
        Self {
            distribution: WeightedIndex::new(&weights)
                .expect("default weights are positive"),
            numerals,
            config,
        }
    }
}
