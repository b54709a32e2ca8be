use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use ntuple_2048::agent::{Agent, AgentConfig, Player, RandomEnvironment};
use ntuple_2048::selfplay::{play_episode, Statistics};

#[derive(Debug, Parser)]
#[command(name = "ntuple-2048", about = "Train an n-tuple TD(0) agent for 2048 by self-play")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    episodes: u64,

    /// Player settings as key=value tokens, e.g. "alpha=0.0025 load=w.bin save=w.bin"
    #[arg(long, default_value = "")]
    player: String,

    /// Environment settings as key=value tokens, e.g. "seed=42"
    #[arg(long, default_value = "")]
    env: String,

    /// Log a summary every this many games
    #[arg(long, default_value_t = 1000)]
    report_every: u64,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let player_cfg: AgentConfig = args.player.parse().context("parsing --player")?;
    let env_cfg: AgentConfig = args.env.parse().context("parsing --env")?;

    // A weight file that fails to load aborts here with a non-zero exit.
    let mut player = Player::new(&player_cfg)?;
    let mut env = RandomEnvironment::new(&env_cfg);
    info!(
        "training {} for {} episodes (alpha = {}) against {}",
        player.name(),
        args.episodes,
        player.alpha(),
        env.name()
    );

    let pb = if !args.quiet {
        let pb = ProgressBar::new(args.episodes);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} | {elapsed_precise} | {msg}")?,
        );
        Some(pb)
    } else {
        None
    };

    let report_every = args.report_every.max(1);
    let mut block = Statistics::new();
    for episode in 1..=args.episodes {
        let summary = play_episode(&mut player, &mut env);
        block.push(&summary);
        if let Some(pb) = &pb {
            pb.inc(1);
            pb.set_message(format!("last score: {}", summary.score));
        }
        if episode % report_every == 0 {
            let text = format!("episodes {}-{}\n{}", episode + 1 - block.games(), episode, block);
            match &pb {
                Some(pb) => pb.suspend(|| info!("{text}")),
                None => info!("{text}"),
            }
            block = Statistics::new();
        }
    }
    if let Some(pb) = pb { pb.finish_and_clear(); }
    if block.games() > 0 {
        info!("last {} episodes\n{}", block.games(), block);
    }

    player.save_if_configured()?;
    Ok(())
}
