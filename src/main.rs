// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{bail, Context, Result};
use nashville::config::{TrainerFile, MAX_CHORDS};
use nashville::music::{KeyName, Numeral};
use nashville::quiz::Trainer;
use nashville::ui::App;
use nashville::{resolve_progression, ProgressionGenerator};
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, Level};

fn print_usage() {
    println!("Nashville - Nashville Number System chord trainer");
    println!();
    println!("Usage: nashville [OPTIONS]");
    println!();
    println!("With no command, starts the interactive trainer.");
    println!();
    println!("Commands:");
    println!("  --list-keys             List the supported major keys");
    println!("  --cheatsheet            Print every key's numeral to chord table");
    println!("  --progression [N]       Print a random progression of N chords (default from config)");
    println!("      --key <K>           Key to resolve the progression in");
    println!("  --help                  Show this help message");
    println!();
    println!("Options:");
    println!("  --config <PATH>         Load settings from a YAML or TOML file");
    println!("  --verbose               Log at debug level");
}

#[derive(Debug, PartialEq)]
enum Command {
    Tui,
    ListKeys,
    Cheatsheet,
    Progression {
        num_chords: Option<usize>,
        key: Option<String>,
    },
    Help,
}

#[derive(Debug, PartialEq)]
struct Options {
    command: Command,
    config: Option<PathBuf>,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut command = Command::Tui;
    let mut config = None;
    let mut verbose = false;
    let mut key = None;
    let mut num_chords = None;
    let mut progression = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--list-keys" => command = Command::ListKeys,
            "--cheatsheet" => command = Command::Cheatsheet,
            "--help" | "-h" => command = Command::Help,
            "--verbose" | "-v" => verbose = true,
            "--progression" => {
                progression = true;
                if let Some(n) = args.get(i + 1).filter(|a| !a.starts_with('-')) {
                    let n: usize = n
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Invalid chord count: {}", n))?;
                    num_chords = Some(n);
                    i += 1;
                }
            }
            "--key" => {
                let Some(k) = args.get(i + 1) else {
                    bail!("--key requires a key name");
                };
                key = Some(k.clone());
                i += 1;
            }
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--config requires a file path");
                };
                config = Some(PathBuf::from(path));
                i += 1;
            }
            other => bail!("Unknown option: {}", other),
        }
        i += 1;
    }

    if progression && command == Command::Tui {
        command = Command::Progression { num_chords, key };
    } else if key.is_some() && !progression {
        bail!("--key is only valid with --progression");
    }

    Ok(Options {
        command,
        config,
        verbose,
    })
}

/// Install the fmt subscriber. The terminal UI owns stdout, so it only logs
/// when a file is configured.
fn init_logging(level: Level, file: Option<&Path>, tui: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_max_level(level);
    match file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if tui => {}
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn print_keys() {
    for key in nashville::list_keys() {
        println!("{}", key);
    }
}

fn print_cheatsheet() {
    print!("{:<4}", "Key");
    for numeral in Numeral::ALL {
        print!("{:<7}", numeral.symbol());
    }
    println!();

    for key in KeyName::ALL {
        print!("{:<4}", key.name());
        for chord in key.chords() {
            print!("{:<7}", chord);
        }
        println!();
    }
}

fn print_progression(config: &TrainerFile, num_chords: Option<usize>, key: Option<&str>) -> Result<()> {
    let num_chords = num_chords.unwrap_or(config.trainer.num_chords);
    if num_chords > MAX_CHORDS {
        bail!("Chord count {} exceeds the maximum of {}", num_chords, MAX_CHORDS);
    }
    let key = key.unwrap_or(config.trainer.key.as_str());

    let generator = ProgressionGenerator::new(config.generator.progression_config())?;
    let progression = generator.generate(num_chords, &mut rand::thread_rng());
    let chords = resolve_progression(progression.as_slice(), key)?;

    println!("Key of {}:", key.trim().to_uppercase());
    for (numeral, chord) in progression.iter().zip(&chords) {
        println!("  {:<5} {}", numeral.symbol(), chord);
    }
    Ok(())
}

fn run_tui(config: &TrainerFile) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let _guard = runtime.enter();

    let trainer = Trainer::from_config(config, Instant::now())?;
    info!(key = %trainer.key(), num_chords = trainer.num_chords(), "starting trainer");

    let mut app =
        App::new(trainer, config.trainer.tick_interval()).context("Failed to initialize terminal")?;
    app.run().context("Terminal UI failed")?;
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => TrainerFile::load(path)?,
        None => TrainerFile::default(),
    };

    let level = if options.verbose {
        Level::DEBUG
    } else {
        config.logging.level()?
    };
    init_logging(
        level,
        config.logging.file.as_deref(),
        options.command == Command::Tui,
    )?;

    match options.command {
        Command::Tui => run_tui(&config)?,
        Command::ListKeys => print_keys(),
        Command::Cheatsheet => print_cheatsheet(),
        Command::Progression { num_chords, key } => {
            print_progression(&config, num_chords, key.as_deref())?
        }
        Command::Help => print_usage(),
    }

    Ok(())
}
