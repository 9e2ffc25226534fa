//! bumps-convert: headless converter between bumps results formats.
//!
//! Usage:
//!   bumps-convert flat-to-notation --input results.csv --out-dir events/
//!   bumps-convert notation-to-flat --input m2020.txt --input w2020.txt --output results.csv
//!   bumps-convert trails --input m2020.txt > chart.json
//!   bumps-convert check --input m2020.txt

use anyhow::{Context, Result};
use bumps_core::{
    config::ConvertConfig,
    decoder,
    encoder,
    event::Event,
    flat,
    notation,
    replay,
    token,
};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bumps-convert")]
#[command(about = "Convert bumps race results between tabular and notation form", long_about = None)]
struct Cli {
    /// JSON config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build notation documents from a tabular results file
    FlatToNotation {
        /// Tabular results file
        #[arg(long)]
        input: PathBuf,

        /// Directory for the generated documents
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// Write tabular results for one or more notation documents
    NotationToFlat {
        /// Notation documents
        #[arg(long, required = true)]
        input: Vec<PathBuf>,

        /// Output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Print per-crew position trails as JSON
    Trails {
        /// Notation document
        #[arg(long)]
        input: PathBuf,
    },

    /// Decode, re-encode and decode again; fail if the movements differ
    Check {
        /// Notation documents
        #[arg(long, required = true)]
        input: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ConvertConfig::load(&path.to_string_lossy())?,
        None => ConvertConfig::default(),
    };

    match cli.command {
        Commands::FlatToNotation { input, out_dir } => flat_to_notation(&input, &out_dir, &config),
        Commands::NotationToFlat { input, output } => notation_to_flat(&input, &output, &config),
        Commands::Trails { input } => trails(&input, &config),
        Commands::Check { input } => check(&input, &config),
    }
}

fn flat_to_notation(input: &Path, out_dir: &Path, config: &ConvertConfig) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Cannot open {}", input.display()))?;
    let events = flat::read_flat(BufReader::new(file), config)
        .with_context(|| format!("Cannot build events from {}", input.display()))?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create {}", out_dir.display()))?;

    for event in &events {
        let path = out_dir.join(format!("{}_{}_{}.txt", event.short, event.gender, event.year));
        let doc = notation::write_notation(event).with_context(|| {
            format!("Cannot write {} {} {} as notation", event.short, event.gender, event.year)
        })?;
        fs::write(&path, doc)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    println!("=== FLAT → NOTATION ===");
    println!("  input:   {}", input.display());
    println!("  events:  {}", events.len());
    println!("  out_dir: {}", out_dir.display());
    Ok(())
}

fn notation_to_flat(inputs: &[PathBuf], output: &Path, config: &ConvertConfig) -> Result<()> {
    let events = inputs
        .iter()
        .map(|path| load_event(path, config))
        .collect::<Result<Vec<_>>>()?;

    let file = File::create(output).with_context(|| format!("Cannot create {}", output.display()))?;
    flat::write_flat(BufWriter::new(file), &events)?;

    println!("=== NOTATION → FLAT ===");
    println!("  events:  {}", events.len());
    println!("  output:  {}", output.display());
    Ok(())
}

fn trails(input: &Path, config: &ConvertConfig) -> Result<()> {
    let event = load_event(input, config)?;
    let chart = replay::chart(&event)?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&chart)?)?;
    stdout.flush()?;
    Ok(())
}

fn check(inputs: &[PathBuf], config: &ConvertConfig) -> Result<()> {
    let mut mismatches = 0;

    for path in inputs {
        let event = load_event(path, config)?;
        let reencoded = encoder::encode(&event.moves);
        let tokens = token::tokenize(&reencoded)?;
        let decoded = decoder::decode(&tokens, event.days, &event.divisions, config.decode_options())
            .with_context(|| format!("Re-encoded results of {} do not decode", path.display()))?;

        if decoded.moves == event.moves {
            println!("  ok        {}", path.display());
        } else {
            mismatches += 1;
            println!("  MISMATCH  {}", path.display());
            log::warn!("original:   {}", event.results.replace('\n', " / "));
            log::warn!("re-encoded: {}", reencoded.replace('\n', " / "));
        }
    }

    if mismatches > 0 {
        anyhow::bail!("{mismatches} of {} documents did not round-trip", inputs.len());
    }
    Ok(())
}

fn load_event(path: &Path, config: &ConvertConfig) -> Result<Event> {
    let text = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let event = notation::read_notation(&text, config.decode_options())
        .with_context(|| format!("Cannot decode {}", path.display()))?;
    log::debug!("loaded {} ({} crews)", path.display(), event.total_crews());
    Ok(event)
}
