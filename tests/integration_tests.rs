// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for the chord trainer
//!
//! These tests verify that the generator, resolver, option picker, trainer
//! and config work together through the public API.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use nashville::config::TrainerFile;
use nashville::generators::{is_common_progression, COMMON_PROGRESSIONS, DEFAULT_WEIGHTS};
use nashville::quiz::{Outcome, SessionState, Trainer};
use nashville::{
    chords_in_key, generate_progression, generate_progression_with, list_keys, pick_options,
    pick_options_with, resolve_progression, KeyName, Numeral, ProgressionConfig,
    ProgressionGenerator, TrainerError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_generate_progression_length_and_symbols() {
    for n in [0, 1, 3, 4, 5, 8, 16] {
        let progression = generate_progression(n);
        assert_eq!(progression.len(), n);
        for numeral in &progression {
            assert!(Numeral::ALL.contains(numeral));
        }
    }
}

#[test]
fn test_common_progression_share() {
    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 2000;
    let common = (0..trials)
        .filter(|_| is_common_progression(&generate_progression_with(4, &mut rng)))
        .count();

    // 80% common plus the small chance a weighted draw lands on one
    let ratio = common as f64 / trials as f64;
    assert!((0.75..=0.85).contains(&ratio), "common ratio {}", ratio);
}

#[test]
fn test_weighted_frequencies_for_other_lengths() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut counts: HashMap<Numeral, usize> = HashMap::new();
    let mut total = 0;
    for _ in 0..2000 {
        for numeral in generate_progression_with(5, &mut rng) {
            *counts.entry(numeral).or_default() += 1;
            total += 1;
        }
    }

    let weight_sum: u32 = DEFAULT_WEIGHTS.iter().map(|(_, w)| w).sum();
    for (numeral, weight) in DEFAULT_WEIGHTS {
        let expected = weight as f64 / weight_sum as f64;
        let observed = counts.get(&numeral).copied().unwrap_or(0) as f64 / total as f64;
        assert!(
            (observed - expected).abs() < 0.02,
            "{} observed {} expected {}",
            numeral,
            observed,
            expected
        );
    }
}

#[test]
fn test_resolve_examples() {
    assert_eq!(
        resolve_progression(&["I", "IV", "V", "vi"], "C").unwrap(),
        ["C", "F", "G", "Am"]
    );
    assert_eq!(resolve_progression(&["vii°"], "G").unwrap(), ["F#dim"]);
    assert_eq!(
        resolve_progression(&["ii", "V", "I"], "B").unwrap(),
        ["C#m", "F#", "B"]
    );
}

#[test]
fn test_resolve_errors() {
    assert!(matches!(
        resolve_progression(&["I"], "H"),
        Err(TrainerError::InvalidKey(_))
    ));
    assert!(matches!(
        resolve_progression(&["vii"], "C"),
        Err(TrainerError::InvalidNumeral(_))
    ));
    // Empty progressions still validate the key
    assert!(resolve_progression::<&str>(&[], "H").is_err());
    assert_eq!(resolve_progression::<&str>(&[], "C").unwrap(), Vec::<&str>::new());
}

#[test]
fn test_resolve_is_pure() {
    let progression = ["I", "vi", "IV", "V"];
    let first = resolve_progression(&progression, "E").unwrap();
    for _ in 0..10 {
        assert_eq!(resolve_progression(&progression, "E").unwrap(), first);
    }
}

#[test]
fn test_generated_progressions_resolve_in_every_key() {
    let mut rng = StdRng::seed_from_u64(5);
    for key in list_keys() {
        let progression = generate_progression_with(6, &mut rng);
        let chords = resolve_progression(progression.as_slice(), key).unwrap();
        let family = chords_in_key(key).unwrap();
        for (numeral, chord) in progression.iter().zip(&chords) {
            assert_eq!(*chord, family[numeral.index()]);
        }
    }
}

#[test]
fn test_pick_options_in_c() {
    let chords = chords_in_key("C").unwrap();
    for _ in 0..50 {
        let options = pick_options("C", chords).unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options.iter().filter(|&&c| c == "C").count(), 1);
        assert_eq!(options.iter().collect::<HashSet<_>>().len(), 4);
        assert!(options.iter().all(|o| chords.contains(o)));
    }
}

#[test]
fn test_pick_options_too_few_chords() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = pick_options_with("C", &["C", "F", "G"], &mut rng);
    assert!(matches!(
        result,
        Err(TrainerError::InsufficientDistractors { available: 2, .. })
    ));
}

#[test]
fn test_list_keys() {
    assert_eq!(list_keys(), ["C", "D", "E", "F", "G", "A", "B"]);
}

#[test]
fn test_custom_generator_only_uses_weighted_numerals() {
    let config = ProgressionConfig {
        common_probability: 0.0,
        weights: vec![(Numeral::Tonic, 1), (Numeral::Dominant, 1)],
    };
    let generator = ProgressionGenerator::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    for numeral in generator.generate(200, &mut rng) {
        assert!(matches!(numeral, Numeral::Tonic | Numeral::Dominant));
    }
    assert_eq!(COMMON_PROGRESSIONS.len(), 8);
}

#[test]
fn test_trainer_full_round() {
    let config = TrainerFile::from_yaml(
        r#"
trainer:
  key: G
  num_chords: 5
  time_limit_secs: 4
generator:
  common_probability: 0.5
"#,
    )
    .unwrap();

    let start = Instant::now();
    let mut trainer = Trainer::from_config(&config, start).unwrap();
    assert_eq!(trainer.key(), KeyName::G);

    // Answer the first question correctly, time out on the rest
    let (_, question) = trainer.session().current_question().unwrap();
    let option = question
        .options
        .iter()
        .position(|&c| c == question.answer)
        .unwrap();
    assert_eq!(trainer.answer(option, start), Some(Outcome::Correct));

    let mut now = start;
    while let Some(token) = trainer.timer_token() {
        now += Duration::from_secs(4);
        assert!(matches!(
            trainer.expire(token, now),
            Some(Outcome::TimedOut { .. })
        ));
    }

    let session = trainer.session();
    assert_eq!(session.state(), SessionState::Submitted);
    assert_eq!(session.answers().len(), 5);
    assert_eq!(session.score().correct, 1);
    assert!(session.answers()[1..].iter().all(|a| a.chosen.is_none()));

    // Chords in the session match plain resolution
    let expected = resolve_progression(session.progression(), "G").unwrap();
    assert_eq!(session.chords(), expected);
}

#[test]
fn test_stale_timer_after_new_progression() {
    let start = Instant::now();
    let mut trainer = Trainer::from_config(&TrainerFile::default(), start).unwrap();
    let old = trainer.timer_token().unwrap();

    trainer.new_progression(start).unwrap();
    assert_eq!(trainer.expire(old, start + Duration::from_secs(60)), None);
    assert!(trainer.session().answers().is_empty());

    trainer.set_key(KeyName::F, start).unwrap();
    let current = trainer.timer_token().unwrap();
    assert_ne!(current, old);
    assert!(trainer.expire(current, start).is_some());
}

#[test]
fn test_config_file_roundtrip_drives_trainer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drill.toml");
    std::fs::write(
        &path,
        r#"
[trainer]
key = "A"
num_chords = 3
time_limit_secs = 0

[generator.weights]
"I" = 1
"vii°" = 1
"#,
    )
    .unwrap();

    let config = TrainerFile::load(&path).unwrap();
    let trainer = Trainer::from_config(&config, Instant::now()).unwrap();
    assert_eq!(trainer.key(), KeyName::A);
    assert_eq!(trainer.timer_token(), None);
    for chord in trainer.session().chords() {
        assert!(chord == "A" || chord == "G#dim", "unexpected {}", chord);
    }
}
