// Library surface for callers; the binary only drives part of it
#[allow(dead_code)]
mod tonetranspose {
    pub mod config;
    pub mod error;
    pub mod interval;
    pub mod noteparser;
    pub mod pianokeys;
    pub mod progression;
    pub mod report;
    pub mod tone;
    pub mod tonegroup;
    pub mod transpose;
    pub mod util;
}

use std::env;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::tonetranspose::config::Config;
use crate::tonetranspose::noteparser::parse_note_names;
use crate::tonetranspose::pianokeys::Direction;
use crate::tonetranspose::progression::Progression;
use crate::tonetranspose::report;
use crate::tonetranspose::tone::NoteNameType;
use crate::tonetranspose::transpose::Transpose;

fn print_usage() {
    println!("tonetranspose - every transposition of a chord, grouped by piano key pattern");
    println!();
    println!("Usage:");
    println!("  tonetranspose [options] <root> <note> [note ...]");
    println!("  tonetranspose [options] --progression \"C | D: D F# A | G: G B D\"");
    println!();
    println!("Options:");
    println!("  --config <file>                  Read defaults from a JSON file");
    println!("  --flat | --sharp | --enharmonic  Note name spelling");
    println!("  --sort <key>                     key_pattern, count, white_count, black_count");
    println!("  --asc | --desc                   Sort direction");
    println!("  --key <note>                     Only show the transposition rooted at <note>");
}

struct CliArgs {
    config: Config,
    progression: Option<String>,
    key: Option<String>,
    positional: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let config_path = args.iter().position(|arg| arg == "--config").map(|index| {
        args.get(index + 1).ok_or_else(|| anyhow!("--config requires a file name"))
    });
    let mut config = match config_path {
        Some(path) => Config::load(path?)?,
        None => Config::default(),
    };

    let mut progression = None;
    let mut key = None;
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                iter.next();
            }
            "--flat" => config.display = NoteNameType::Flat,
            "--sharp" => config.display = NoteNameType::Sharp,
            "--enharmonic" => config.display = NoteNameType::Enharmonic,
            "--asc" => config.direction = Direction::Ascending,
            "--desc" => config.direction = Direction::Descending,
            "--sort" => {
                let sort_key = iter.next().ok_or_else(|| anyhow!("--sort requires a key"))?;
                config.sort_by = sort_key.parse()?;
            }
            "--progression" => {
                let text = iter.next().ok_or_else(|| anyhow!("--progression requires a progression"))?;
                progression = Some(text.clone());
            }
            "--key" => {
                let name = iter.next().ok_or_else(|| anyhow!("--key requires a note name"))?;
                key = Some(name.clone());
            }
            other if other.starts_with("--") => return Err(anyhow!("Unknown option: {}", other)),
            other => positional.push(other.to_string()),
        }
    }

    Ok(CliArgs {
        config,
        progression,
        key,
        positional,
    })
}

fn run_tone_group(config: &Config, key: Option<&str>, root: &str, notes: &[String]) -> Result<()> {
    let mut transpose = Transpose::new(root, notes)?;
    let display = config.display;
    info!(root, notes = notes.len(), "transposing");

    if let Some(key) = key {
        let position = transpose.get_transposition_for_named_key(key)?;
        println!("{}", report::position_lines(std::slice::from_ref(position), display).join("\n"));
        return Ok(());
    }

    println!("Tone pattern: {}", transpose.tone_group().describe_pattern());
    println!("Intervals: {}", report::interval_line(&transpose.intervals(display)));
    println!("Interval counts: {}", report::interval_count_line(&transpose.interval_counts(display)));
    println!();
    for line in report::position_lines(transpose.all_positions(), display) {
        println!("{}", line);
    }
    println!();
    for line in report::key_pattern_lines(transpose.key_patterns(config.summary_options())) {
        println!("{}", line);
    }
    Ok(())
}

fn run_progression(config: &Config, text: &str) -> Result<()> {
    let progression: Progression = text.parse()?;
    info!(key = progression.key().flat_name(), groups = progression.tone_groups().len(), "moving progression");
    for line in report::progression_lines(&progression.positions()?, config.display) {
        println!("{}", line);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let cli = parse_args(&args)?;
    tracing_subscriber::fmt().with_max_level(cli.config.level()?).init();

    if let Some(text) = &cli.progression {
        return run_progression(&cli.config, text);
    }

    match cli.positional.split_first() {
        Some((root, rest)) if !rest.is_empty() => {
            let notes = parse_note_names(&rest.join(" "))?;
            run_tone_group(&cli.config, cli.key.as_deref(), root, &notes)
        }
        Some(_) => {
            print_usage();
            Err(anyhow!("Expected a root followed by at least one note"))
        }
        None => run_tone_group(&cli.config, cli.key.as_deref(), "C", &["C".to_string(), "E".to_string(), "G".to_string()]),
    }
}
