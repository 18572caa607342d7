// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory for the trainer.
//!
//! This module provides the key table, Nashville numerals and the
//! mapping between them.

pub mod key;
pub mod numeral;
pub mod resolve;

pub use key::{chords_in_key, list_keys, ChordFamily, KeyName};
pub use numeral::{ChordQuality, Numeral};
pub use resolve::{resolve, resolve_progression};
