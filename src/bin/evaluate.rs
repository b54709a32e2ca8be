use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use ntuple_2048::ntuple::TupleScheme;
use ntuple_2048::selfplay::{evaluate_parallel, Statistics};
use ntuple_2048::serialization::read_weights_from_path;

#[derive(Debug, Parser)]
#[command(name = "evaluate", about = "Play frozen-weight games in parallel and report statistics")]
struct Args {
    /// Weight file written by a training run
    #[arg(long)]
    weights: PathBuf,

    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: usize,

    /// Base seed; game g uses seed + g
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads (default: rayon's choice)
    #[arg(long)]
    threads: Option<usize>,

    /// Suppress the spinner
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let net = read_weights_from_path(&args.weights, TupleScheme::default())
        .with_context(|| format!("loading weights from {}", args.weights.display()))?;
    info!("loaded {} weight tables from {}", net.tables().len(), args.weights.display());

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(n) = args.threads {
        pool = pool.num_threads(n);
    }
    let pool = pool.build().context("building thread pool")?;

    let pb = if !args.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner} {elapsed_precise} | {msg}")?);
        pb.set_message(format!("{} games on {} threads", args.games, pool.current_num_threads()));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let results = pool.install(|| evaluate_parallel(&net, args.games, args.seed));
    if let Some(pb) = pb { pb.finish_and_clear(); }

    let stats: Statistics = results.into_iter().collect();
    info!("{} games in {:.2}s", stats.games(), start.elapsed().as_secs_f64());
    print!("{stats}");
    Ok(())
}
