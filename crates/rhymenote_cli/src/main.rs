//! CLI entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rhymenote_core` linkage.
//! - Run syllabification and rhyme detection on already vocalized text.
//! - Keep output deterministic for quick local sanity checks.

use rhymenote_core::phonetics::syllabifier::build_syllables;
use rhymenote_core::{
    BarId, ConfigError, EngineConfig, InMemoryVocalizationCache, PassthroughProvider,
    RhymeEngine,
};
use std::io::{self, BufRead};
use std::process::ExitCode;

const USAGE: &str = "usage: rhymenote [syllabify <word>... | rhymes [line]...]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {
            println!("rhymenote_core ping={}", rhymenote_core::ping());
            println!("rhymenote_core version={}", rhymenote_core::core_version());
            ExitCode::SUCCESS
        }
        Some("syllabify") => {
            for word in &args[1..] {
                print_syllables(word);
            }
            ExitCode::SUCCESS
        }
        Some("rhymes") => match collect_lines(&args[1..]) {
            Ok(lines) => match print_rhymes(&lines) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("invalid engine config: {err}");
                    ExitCode::FAILURE
                }
            },
            Err(err) => {
                eprintln!("failed to read stdin: {err}");
                ExitCode::FAILURE
            }
        },
        Some(_) => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn print_syllables(word: &str) {
    let parts = build_syllables(word)
        .into_iter()
        .map(|syllable| match syllable.vowel {
            Some(vowel) => format!("{}({vowel})", syllable.text),
            None => syllable.text,
        })
        .collect::<Vec<_>>();
    println!("{word}\t{}", parts.join(" | "));
}

/// Lines from arguments, or from stdin when none are given.
fn collect_lines(args: &[String]) -> io::Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }
    io::stdin()
        .lock()
        .lines()
        .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
        .collect()
}

fn print_rhymes(lines: &[String]) -> Result<(), ConfigError> {
    let engine = RhymeEngine::new(
        PassthroughProvider,
        InMemoryVocalizationCache::new(),
        EngineConfig::default(),
    )?;
    let numbered = lines
        .iter()
        .map(|line| (BarId::new_v4(), line.as_str()))
        .collect::<Vec<_>>();
    let line_number = |id: BarId| {
        numbered
            .iter()
            .position(|(line_id, _)| *line_id == id)
            .map_or(0, |index| index + 1)
    };

    for group in engine.detect_rhymes(&numbered) {
        let members = group
            .members
            .iter()
            .map(|member| format!("{}:{}", line_number(member.line_id), member.text))
            .collect::<Vec<_>>();
        println!(
            "{}\t{}\t{:.2}\t{}",
            group.kind.as_str(),
            group.signature,
            group.confidence,
            members.join(" ")
        );
    }
    Ok(())
}
