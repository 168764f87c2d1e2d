//! Errmark CLI - parse build output and preview buffer annotations
//!
//! This binary is the in-process host for the errmark engine: it captures a
//! completed build log from a file or stdin, runs the parse pipeline, and
//! either prints the record batch or renders resolved spans against a real
//! source file as terminal diagnostics.

mod cli;

use anyhow::{Context, Result};
use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use cli::{Cli, Command};
use errmark_core::{resolve, Highlighter, HighlightConfig, TextBuffer};
use std::io::Read;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = HighlightConfig::load(cli.config.as_deref())?;
    if let Some(pattern) = cli.pattern {
        config.pattern = Some(pattern);
    }
    let engine = Highlighter::new(config);

    match cli.command {
        Command::Parse { log, json } => run_parse(&engine, &log, json),
        Command::Annotate { log, file } => run_annotate(&engine, &log, &file),
    }
}

/// Read a build log from a file, or stdin when the path is `-`
fn read_log(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read build log from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build log {}", path.display()))
    }
}

fn run_parse(engine: &Highlighter, log: &Path, json: bool) -> Result<()> {
    let text = read_log(log)?;
    let records = engine.parse(&text);
    debug!(count = records.len(), "parsed build log");

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("[{}] {}", record.class_index, record);
        }
        eprintln!("{} record(s)", records.len());
    }

    Ok(())
}

fn run_annotate(engine: &Highlighter, log: &Path, file: &Path) -> Result<()> {
    let text = read_log(log)?;
    engine.rebuild(&text);

    let buffer = TextBuffer::from_file(file)
        .with_context(|| format!("failed to open source file {}", file.display()))?;

    if !engine.store().is_visible() {
        return Ok(());
    }

    let path = buffer.normalized_path();
    let records = engine.store().records_for(&path);
    if records.is_empty() {
        eprintln!("no records match {}", file.display());
        return Ok(());
    }

    let name_owned = file.display().to_string();
    let name = name_owned.as_str();
    let source_text = buffer.text();
    let rule_count = engine.rule_count();
    let mut rendered = 0usize;

    for record in &records {
        // Records without a line number cannot be anchored; skip silently
        let Some(span) = resolve(record, &buffer) else {
            continue;
        };

        // Preview-only severity mapping: first rule reads as errors, the
        // trailing buckets as advice, everything between as warnings
        let (kind, color) = match record.class_index {
            0 => (ReportKind::Error, Color::Red),
            i if i + 1 >= rule_count => (ReportKind::Advice, Color::Blue),
            _ => (ReportKind::Warning, Color::Yellow),
        };

        let byte_span = buffer.char_to_byte(span.start)..buffer.char_to_byte(span.end);
        Report::build(kind, name, byte_span.start)
            .with_message(&record.message)
            .with_label(
                Label::new((name, byte_span))
                    .with_message(&record.message)
                    .with_color(color),
            )
            .finish()
            .eprint((name, Source::from(source_text.as_str())))
            .context("failed to render diagnostic")?;
        rendered += 1;
    }

    eprintln!("{} annotation(s) in {}", rendered, file.display());
    Ok(())
}
