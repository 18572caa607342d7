// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module provides the per-question countdown for timed quizzes.

pub mod countdown;

pub use countdown::{Countdown, TimerEvent};
