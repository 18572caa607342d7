// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! A single quiz over one progression in one key.
//!
//! The session walks the questions in order. Each question is either
//! answered or expires, and after the last one the session is submitted.
//! Timer expiry is only accepted for the token of the current question, so
//! a countdown left over from an earlier question or session does nothing.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use crate::error::TrainerError;
use crate::generators::pick_options;
use crate::music::{KeyName, Numeral};

/// Identifies the countdown for one question of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    /// Session generation
    pub generation: u64,
    /// Question index within the session
    pub question: usize,
}

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Numeral shown to the user
    pub numeral: Numeral,
    /// Chord the numeral resolves to
    pub answer: &'static str,
    /// Shuffled options, `answer` among them
    pub options: Vec<&'static str>,
}

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for an answer to `question`
    Active {
        question: usize,
        deadline: Option<Instant>,
    },
    /// Every question answered or expired
    Submitted,
}

/// Result of a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect { expected: &'static str },
    TimedOut { expected: &'static str },
}

impl Outcome {
    /// Whether the question scored
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// Recorded answer for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Question index
    pub question: usize,
    /// Chosen option, `None` when time ran out
    pub chosen: Option<&'static str>,
    /// Outcome of the question
    pub outcome: Outcome,
}

/// Correct answers out of answered questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub correct: usize,
    pub answered: usize,
}

impl Score {
    /// Add a question outcome
    pub fn record(&mut self, outcome: Outcome) {
        self.answered += 1;
        if outcome.is_correct() {
            self.correct += 1;
        }
    }

    /// Correct fraction, 0.0 before any answer
    pub fn ratio(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.correct as f64 / self.answered as f64
        }
    }
}

/// Timed multiple-choice quiz over one progression
#[derive(Debug, Clone)]
pub struct QuizSession {
    generation: u64,
    key: KeyName,
    progression: Vec<Numeral>,
    questions: Vec<Question>,
    answers: Vec<AnswerRecord>,
    state: SessionState,
    time_limit: Option<Duration>,
}

impl QuizSession {
    /// Build a session, resolving every numeral and picking its options
    pub fn new<R: Rng>(
        generation: u64,
        key: KeyName,
        progression: Vec<Numeral>,
        time_limit: Option<Duration>,
        rng: &mut R,
        now: Instant,
    ) -> Result<Self, TrainerError> {
        let questions = progression
            .iter()
            .map(|&numeral| {
                let answer = key.chord(numeral);
                let options = pick_options(answer, key.chords(), rng)?;
                Ok(Question {
                    numeral,
                    answer,
                    options,
                })
            })
            .collect::<Result<Vec<_>, TrainerError>>()?;

        let state = if questions.is_empty() {
            SessionState::Submitted
        } else {
            SessionState::Active {
                question: 0,
                deadline: time_limit.map(|limit| now + limit),
            }
        };

        debug!(generation, %key, len = questions.len(), "new quiz session");

        Ok(Self {
            generation,
            key,
            progression,
            questions,
            answers: Vec::new(),
            state,
            time_limit,
        })
    }

    /// Generation this session was created for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Key the progression is resolved in
    pub fn key(&self) -> KeyName {
        self.key
    }

    /// Numerals of the progression
    pub fn progression(&self) -> &[Numeral] {
        &self.progression
    }

    /// All questions in order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Answers recorded so far
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether every question has been answered or expired
    pub fn is_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    /// Per-question time limit
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Resolved chords of the progression
    pub fn chords(&self) -> Vec<&'static str> {
        self.questions.iter().map(|q| q.answer).collect()
    }

    /// Index and question awaiting an answer
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        match self.state {
            SessionState::Active { question, .. } => {
                self.questions.get(question).map(|q| (question, q))
            }
            SessionState::Submitted => None,
        }
    }

    /// Token for the running countdown, `None` if untimed or submitted
    pub fn token(&self) -> Option<TimerToken> {
        match self.state {
            SessionState::Active {
                question,
                deadline: Some(_),
            } => Some(TimerToken {
                generation: self.generation,
                question,
            }),
            _ => None,
        }
    }

    /// Time left on the current question
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            SessionState::Active {
                deadline: Some(deadline),
                ..
            } => Some(deadline.saturating_duration_since(now)),
            _ => None,
        }
    }

    /// Score of this session
    pub fn score(&self) -> Score {
        let mut score = Score::default();
        for record in &self.answers {
            score.record(record.outcome);
        }
        score
    }

    /// Answer the current question with the option at `option`.
    ///
    /// Returns `None` when the session is submitted or the index is not
    /// one of the shown options.
    pub fn answer(&mut self, option: usize, now: Instant) -> Option<Outcome> {
        let (index, question) = self.current_question()?;
        let chosen = *question.options.get(option)?;
        let outcome = if chosen == question.answer {
            Outcome::Correct
        } else {
            Outcome::Incorrect {
                expected: question.answer,
            }
        };

        debug!(question = index, chosen, ?outcome, "answered");
        self.answers.push(AnswerRecord {
            question: index,
            chosen: Some(chosen),
            outcome,
        });
        self.advance(index, now);
        Some(outcome)
    }

    /// Record "no answer" for the question named by `token`.
    ///
    /// Stale tokens (other generation or question) are ignored.
    pub fn expire(&mut self, token: TimerToken, now: Instant) -> Option<Outcome> {
        if self.token() != Some(token) {
            debug!(?token, "ignoring stale timer");
            return None;
        }

        let (index, question) = self.current_question()?;
        let outcome = Outcome::TimedOut {
            expected: question.answer,
        };

        debug!(question = index, "time ran out");
        self.answers.push(AnswerRecord {
            question: index,
            chosen: None,
            outcome,
        });
        self.advance(index, now);
        Some(outcome)
    }

    fn advance(&mut self, index: usize, now: Instant) {
        let next = index + 1;
        self.state = if next < self.questions.len() {
            SessionState::Active {
                question: next,
                deadline: self.time_limit.map(|limit| now + limit),
            }
        } else {
            let score = self.score();
            info!(
                generation = self.generation,
                correct = score.correct,
                total = self.questions.len(),
                "quiz submitted"
            );
            SessionState::Submitted
        };
    }
}
