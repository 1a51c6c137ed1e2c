//! yantra — 42-state lattice console
//!
//! Usage:
//!   yantra demo                       → scripted tour: routing, gravity, seed
//!   yantra ingest [FILE] --seed s.json → JSONL packets from FILE or stdin
//!   yantra report --seed s.json        → face view + report for a saved seed

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yantra_core::{Engine, EngineConfig, IngestResult, Packet};

#[derive(Parser)]
#[command(
    name = "yantra",
    about = "42-state quantization lattice — route packets, watch faces crystallize",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to engine config (TOML). Defaults apply when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the APEX admission threshold
    #[arg(long, global = true)]
    threshold: Option<u8>,

    /// Override the trail length cap
    #[arg(long, global = true)]
    max_trail: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scripted demo: shadow drop, gravity rejection, crystallization, seed round trip
    Demo,
    /// Ingest one JSON packet per line from FILE (or stdin when omitted)
    Ingest {
        file: Option<PathBuf>,
        /// Seed file: loaded before ingesting when present, saved after
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
    /// Load a seed into a fresh engine and print the face view and report
    Report {
        #[arg(short, long)]
        seed: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = build_engine(&cli);

    match cli.command {
        Commands::Demo => run_demo(engine),
        Commands::Ingest { file, seed } => run_ingest(engine, file.as_deref(), seed.as_deref()),
        Commands::Report { seed } => run_report(engine, &seed),
    }
}

fn build_engine(cli: &Cli) -> Engine {
    let mut config = match cli.config {
        Some(ref path) => EngineConfig::load(path),
        None => EngineConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.base_threshold = threshold;
    }
    if let Some(max_trail) = cli.max_trail {
        config.max_trail = max_trail;
    }
    Engine::new(config)
}

fn print_result(content: &str, res: &IngestResult) {
    println!(
        "{:<12} | oc={} ph={} sid={:>2} | layer={:<4} | {}",
        content, res.octave, res.phase, res.state_id, res.layer, res.note
    );
}

fn print_summary(engine: &Engine) -> anyhow::Result<()> {
    println!("\nFACES:\n{}", engine.render_faces());
    let report = serde_json::to_string_pretty(&engine.report())?;
    println!("\nREPORT: {}", report);
    Ok(())
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

fn run_demo(mut engine: Engine) -> anyhow::Result<()> {
    println!("{}", "=".repeat(70));
    println!("DEMO 1) PACKET ROUTING (shadow drop + gravity gate)");
    println!("{}", "=".repeat(70));

    let stream = vec![
        Packet::new("WAR").with_topic("matter").with_strength(0.9).with_shadow(0.9),
        Packet::new("MONEY").with_topic("system").with_strength(0.7).with_shadow(0.6),
        Packet::new("HOME").with_topic("matter").with_strength(0.5),
        Packet::new("WATER").with_topic("flow").with_strength(0.4).with_coherence(0.8),
        Packet::new("LOVE").with_topic("life").with_strength(0.8).with_coherence(0.9),
        Packet::new("TRUTH").with_topic("logic").with_strength(0.6),
        Packet::new("SPIRIT").with_topic("spiritual").with_strength(0.95),
        Packet::new("DOUBT").with_octave(6).with_strength(0.3).with_shadow(0.8),
        Packet::new("AXIS").with_octave(4).with_strength(1.0),
    ];

    for pkt in &stream {
        let res = engine.ingest(pkt);
        print_result(&pkt.content, &res);
    }
    print_summary(&engine)?;

    println!("\n{}", "=".repeat(70));
    println!("DEMO 2) SEED (save / load without replaying input)");
    println!("{}", "=".repeat(70));

    let seed = engine.export_seed()?;
    println!("SEED JSON: {}", seed);

    let mut revived = Engine::new(engine.config().clone());
    revived.import_seed(&seed)?;
    println!("\nRESURRECTED FACES:\n{}", revived.render_faces());

    for pkt in [
        Packet::new("TRUTH").with_topic("logic").with_strength(0.6),
        Packet::new("SPIRIT").with_topic("spiritual").with_strength(0.9),
    ] {
        let res = revived.ingest(&pkt);
        print_result(&pkt.content, &res);
    }
    print_summary(&revived)
}

// ---------------------------------------------------------------------------
// ingest
// ---------------------------------------------------------------------------

fn run_ingest(
    mut engine: Engine,
    file: Option<&Path>,
    seed_path: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = seed_path {
        if path.exists() {
            let payload = fs::read_to_string(path)
                .with_context(|| format!("reading seed {}", path.display()))?;
            engine
                .import_seed(&payload)
                .with_context(|| format!("importing seed {}", path.display()))?;
            tracing::info!("Loaded seed from {}", path.display());
        }
    }

    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(io::BufReader::new(
            fs::File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Packet>(&line) {
            Ok(pkt) => {
                let res = engine.ingest(&pkt);
                print_result(&pkt.content, &res);
            }
            Err(e) => tracing::warn!("skipping malformed packet line: {}", e),
        }
    }

    print_summary(&engine)?;

    if let Some(path) = seed_path {
        fs::write(path, engine.export_seed()?)
            .with_context(|| format!("writing seed {}", path.display()))?;
        tracing::info!("Saved seed to {}", path.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// report
// ---------------------------------------------------------------------------

fn run_report(mut engine: Engine, seed_path: &Path) -> anyhow::Result<()> {
    let payload = fs::read_to_string(seed_path)
        .with_context(|| format!("reading seed {}", seed_path.display()))?;
    engine
        .import_seed(&payload)
        .with_context(|| format!("importing seed {}", seed_path.display()))?;
    print_summary(&engine)
}
