//! Cross-check sweep binary.
//!
//! Usage:
//!   cross-check [OPTIONS]
//!
//! Writes one JSON record per instance to `--output` (stdout by default) and
//! exits with an error if any strategy disagrees with the exhaustive search.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fixed_tsp_validation::{run_sweep, SweepConfig, SweepError};

#[derive(Parser, Debug)]
#[command(name = "cross-check")]
#[command(about = "Cross-check the fixed-endpoint TSP solvers on random instances")]
struct Args {
    /// JSON sweep configuration. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base seed for instance generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of instances to generate.
    #[arg(long)]
    instances: Option<usize>,

    /// Smallest intermediate node count.
    #[arg(long)]
    min_nodes: Option<usize>,

    /// Largest intermediate node count.
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Largest edge weight.
    #[arg(long)]
    max_distance: Option<u32>,

    /// Generate symmetric distance matrices.
    #[arg(long)]
    symmetric: bool,

    /// Worker threads for the parallel strategy.
    #[arg(long)]
    workers: Option<usize>,

    /// Memoise distances for the sequential strategies, keeping at most this many pairs.
    #[arg(long)]
    cache_capacity: Option<usize>,

    /// Write JSON lines here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn sweep_config(&self) -> Result<SweepConfig, SweepError> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::from_json_file(path)?,
            None => SweepConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(instances) = self.instances {
            config.instances = instances;
        }
        if let Some(min_nodes) = self.min_nodes {
            config.min_nodes = min_nodes;
        }
        if let Some(max_nodes) = self.max_nodes {
            config.max_nodes = max_nodes;
        }
        if let Some(max_distance) = self.max_distance {
            config.max_distance = max_distance;
        }
        if self.symmetric {
            config.symmetric = true;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        if self.cache_capacity.is_some() {
            config.cache_capacity = self.cache_capacity;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fixed_tsp_validation=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.sweep_config().context("loading sweep configuration")?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = run_sweep(&config, |record| {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out).map_err(SweepError::Write)
    })?;
    out.flush().map_err(SweepError::Write)?;

    if summary.disagreements.is_empty() {
        info!(
            instances = summary.instances,
            pruned_fraction = summary.pruned_fraction(),
            "all strategies agree"
        );
    } else {
        for disagreement in &summary.disagreements {
            warn!(
                instance = disagreement.instance,
                strategy = %disagreement.strategy,
                "disagreement"
            );
        }
    }
    summary.ensure_agreement()?;
    Ok(())
}
