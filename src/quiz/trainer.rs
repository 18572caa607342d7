// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Trainer: owns the generator, the current key and the active session.
//!
//! Every new progression or key change builds a fresh session under a new
//! generation number, which invalidates any countdown still running for the
//! previous one.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::session::{Outcome, QuizSession, Score, TimerToken};
use crate::config::TrainerFile;
use crate::error::TrainerError;
use crate::generators::ProgressionGenerator;
use crate::music::{KeyName, Numeral};

/// Drill state for one user
#[derive(Debug)]
pub struct Trainer<R: Rng = StdRng> {
    generator: ProgressionGenerator,
    rng: R,
    key: KeyName,
    num_chords: usize,
    time_limit: Option<Duration>,
    generation: u64,
    session: QuizSession,
    revealed: bool,
    tally: Score,
}

impl Trainer<StdRng> {
    /// Create a trainer from a validated config file
    pub fn from_config(config: &TrainerFile, now: Instant) -> Result<Self, TrainerError> {
        config.validate()?;
        let generator = ProgressionGenerator::new(config.generator.progression_config())?;
        Trainer::with_rng(
            generator,
            config.trainer.key()?,
            config.trainer.num_chords,
            config.trainer.time_limit(),
            StdRng::from_entropy(),
            now,
        )
    }
}

impl<R: Rng> Trainer<R> {
    /// Create a trainer with an explicit random source and start a session
    pub fn with_rng(
        generator: ProgressionGenerator,
        key: KeyName,
        num_chords: usize,
        time_limit: Option<Duration>,
        mut rng: R,
        now: Instant,
    ) -> Result<Self, TrainerError> {
        let progression = generator.generate(num_chords, &mut rng);
        let session = QuizSession::new(0, key, progression, time_limit, &mut rng, now)?;

        Ok(Self {
            generator,
            rng,
            key,
            num_chords,
            time_limit,
            generation: 0,
            session,
            revealed: false,
            tally: Score::default(),
        })
    }

    /// Active session
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Selected key
    pub fn key(&self) -> KeyName {
        self.key
    }

    /// Chords per progression
    pub fn num_chords(&self) -> usize {
        self.num_chords
    }

    /// Whether resolved chords are shown
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Score across every session of this trainer
    pub fn tally(&self) -> Score {
        self.tally
    }

    /// Token of the countdown that should be running now
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.session.token()
    }

    /// Per-question limit
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Generate a new progression in the current key
    pub fn new_progression(&mut self, now: Instant) -> Result<(), TrainerError> {
        let progression = self.generator.generate(self.num_chords, &mut self.rng);
        info!(key = %self.key, ?progression, "new progression");
        self.restart(self.key, progression, now)
    }

    /// Switch key, keeping the progression but rebuilding every question
    pub fn set_key(&mut self, key: KeyName, now: Instant) -> Result<(), TrainerError> {
        if key == self.key {
            return Ok(());
        }
        info!(from = %self.key, to = %key, "key changed");
        let progression = self.session.progression().to_vec();
        self.restart(key, progression, now)
    }

    /// Move to the next key in display order
    pub fn next_key(&mut self, now: Instant) -> Result<(), TrainerError> {
        self.set_key(self.key.next(), now)
    }

    /// Move to the previous key in display order
    pub fn previous_key(&mut self, now: Instant) -> Result<(), TrainerError> {
        self.set_key(self.key.previous(), now)
    }

    /// Toggle display of the resolved chords
    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Answer the current question
    pub fn answer(&mut self, option: usize, now: Instant) -> Option<Outcome> {
        let outcome = self.session.answer(option, now)?;
        self.tally.record(outcome);
        Some(outcome)
    }

    /// Apply a countdown expiry
    pub fn expire(&mut self, token: TimerToken, now: Instant) -> Option<Outcome> {
        let outcome = self.session.expire(token, now)?;
        self.tally.record(outcome);
        Some(outcome)
    }

    /// Build a session for `key`; the trainer is untouched on error
    fn restart(
        &mut self,
        key: KeyName,
        progression: Vec<Numeral>,
        now: Instant,
    ) -> Result<(), TrainerError> {
        let generation = self.generation + 1;
        self.session = QuizSession::new(
            generation,
            key,
            progression,
            self.time_limit,
            &mut self.rng,
            now,
        )?;
        self.key = key;
        self.generation = generation;
        self.revealed = false;
        Ok(())
    }
}
