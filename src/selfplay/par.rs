use rayon::prelude::*;

use crate::agent::{GreedyPlayer, RandomEnvironment};
use crate::ntuple::Network;

use super::{play_episode, EpisodeSummary};

/// Play `games` frozen-weight games in parallel.
///
/// The network is shared read-only; game `g` gets its own environment seeded
/// with `seed + g`, so results do not depend on the thread count.
pub fn evaluate_parallel(net: &Network, games: usize, seed: u64) -> Vec<EpisodeSummary> {
    (0..games)
        .into_par_iter()
        .map(|g| {
            let mut player = GreedyPlayer::new(net);
            let mut env = RandomEnvironment::seeded(seed.wrapping_add(g as u64));
            play_episode(&mut player, &mut env)
        })
        .collect()
}
