// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timed multiple-choice quiz.

pub mod session;
pub mod trainer;

pub use session::{AnswerRecord, Outcome, Question, QuizSession, Score, SessionState, TimerToken};
pub use trainer::Trainer;
