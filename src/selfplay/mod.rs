//! Game drivers: a single self-play episode and parallel frozen evaluation.
//!
//! - [`play_episode`]: one game between any two [`Agent`](crate::agent::Agent)s.
//! - [`evaluate_parallel`]: rayon-based batch of greedy games over a shared network.
//! - [`Statistics`]: running score / tile summary over finished games.

use std::fmt;

use crate::engine::Rank;

mod par;
mod seq;

pub use par::evaluate_parallel;
pub use seq::play_episode;

/// Outcome of one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpisodeSummary {
    /// Slides played by the player.
    pub moves: u64,
    /// Sum of merge rewards.
    pub score: u64,
    /// Highest tile rank on the final board.
    pub max_rank: Rank,
}

const RANKS: usize = crate::ntuple::TILE_STATES;

/// Aggregate over a block of games.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    games: u64,
    total_score: u64,
    max_score: u64,
    total_moves: u64,
    /// Games whose highest tile was exactly this rank.
    by_max_rank: [u64; RANKS],
}

impl Statistics {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, s: &EpisodeSummary) {
        self.games += 1;
        self.total_score += s.score;
        self.max_score = self.max_score.max(s.score);
        self.total_moves += s.moves;
        let r = (s.max_rank as usize).min(RANKS - 1);
        self.by_max_rank[r] += 1;
    }

    #[inline]
    pub fn games(&self) -> u64 { self.games }

    #[inline]
    pub fn max_score(&self) -> u64 { self.max_score }

    pub fn mean_score(&self) -> f64 {
        if self.games == 0 { 0.0 } else { self.total_score as f64 / self.games as f64 }
    }

    pub fn mean_moves(&self) -> f64 {
        if self.games == 0 { 0.0 } else { self.total_moves as f64 / self.games as f64 }
    }

    /// Fraction of games that reached a tile of at least `rank`.
    pub fn reach_rate(&self, rank: Rank) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let reached: u64 = self.by_max_rank.iter().skip(rank as usize).sum();
        reached as f64 / self.games as f64
    }
}

impl Extend<EpisodeSummary> for Statistics {
    fn extend<I: IntoIterator<Item = EpisodeSummary>>(&mut self, iter: I) {
        for s in iter {
            self.push(&s);
        }
    }
}

impl FromIterator<EpisodeSummary> for Statistics {
    fn from_iter<I: IntoIterator<Item = EpisodeSummary>>(iter: I) -> Self {
        let mut stats = Statistics::new();
        stats.extend(iter);
        stats
    }
}

// One line of totals, then per final max tile: reach rate and (share).
impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "games: {} | mean score: {:.1} | max score: {} | mean moves: {:.1}",
            self.games,
            self.mean_score(),
            self.max_score,
            self.mean_moves()
        )?;
        let top = self.by_max_rank.iter().rposition(|&n| n > 0).unwrap_or(0);
        for rank in 1..=top {
            if self.by_max_rank[rank] == 0 {
                continue;
            }
            writeln!(
                f,
                "\t{}\t{:5.1}%\t({:5.1}%)",
                1u64 << rank,
                100.0 * self.reach_rate(rank as Rank),
                100.0 * self.by_max_rank[rank] as f64 / self.games.max(1) as f64
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u64, max_rank: Rank) -> EpisodeSummary { EpisodeSummary { moves: score / 4, score, max_rank } }

    #[test]
    fn aggregates() {
        let stats: Statistics = vec![summary(1000, 7), summary(3000, 9), summary(20_000, 11), summary(4000, 9)]
            .into_iter()
            .collect();
        assert_eq!(stats.games(), 4);
        assert_eq!(stats.max_score(), 20_000);
        assert_eq!(stats.mean_score(), 7000.0);
        assert_eq!(stats.reach_rate(11), 0.25);
        assert_eq!(stats.reach_rate(9), 0.75);
        assert_eq!(stats.reach_rate(0), 1.0);
        assert_eq!(stats.reach_rate(12), 0.0);
    }

    #[test]
    fn empty_statistics() {
        let stats = Statistics::new();
        assert_eq!(stats.mean_score(), 0.0);
        assert_eq!(stats.reach_rate(11), 0.0);
        assert!(stats.to_string().starts_with("games: 0"));
    }

    #[test]
    fn display_lists_reached_tiles() {
        let stats: Statistics = vec![summary(1000, 7), summary(20_000, 11)].into_iter().collect();
        let text = stats.to_string();
        assert!(text.contains("\t2048\t 50.0%"), "{text}");
        assert!(text.contains("\t128\t100.0%"), "{text}");
        assert!(!text.contains("4096"));
    }
}
