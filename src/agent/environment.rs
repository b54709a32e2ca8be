use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::engine::{Board, Rank, CELLS};

use super::{Action, Agent, AgentConfig};

/// Environment agent: adds a random tile to a random empty cell.
///
/// 2-tile (rank 1): 90%, 4-tile (rank 2): 10%. Does nothing on a full board.
/// The random source is owned by the agent; construct it with a seeded RNG
/// for reproducible games.
pub struct RandomEnvironment<R: Rng = StdRng> {
    name: String,
    rng: R,
}

impl RandomEnvironment<StdRng> {
    /// Build from `name=` / `seed=`; without a seed the RNG is seeded from entropy.
    pub fn new(config: &AgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut env = Self::with_rng(rng);
        if let Some(name) = &config.name {
            env.name = name.clone();
        }
        env
    }

    pub fn seeded(seed: u64) -> Self { Self::with_rng(StdRng::seed_from_u64(seed)) }
}

impl<R: Rng> RandomEnvironment<R> {
    pub fn with_rng(rng: R) -> Self { Self { name: "rndenv".to_string(), rng } }

    /// Pick the rank and position of the next tile, or `None` if `board` is full.
    pub fn spawn(&mut self, board: &Board) -> Option<(Rank, usize)> {
        let mut space: [usize; CELLS] = std::array::from_fn(|i| i);
        space.shuffle(&mut self.rng);
        let pos = space.into_iter().find(|&p| board.tile(p) == 0)?;
        Some((generate_random_tile(&mut self.rng), pos))
    }
}

impl<R: Rng> Agent for RandomEnvironment<R> {
    fn name(&self) -> &str { &self.name }

    fn take_action(&mut self, board: &Board) -> Action {
        match self.spawn(board) {
            Some((rank, pos)) => Action::Place { rank, pos },
            None => Action::None,
        }
    }
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Rank { if rng.gen_range(0..10) < 9 { 1 } else { 2 } }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_only_on_empty_cells() {
        let mut env = RandomEnvironment::seeded(1);
        let mut b = Board::EMPTY;
        for _ in 0..CELLS {
            match env.take_action(&b) {
                Action::Place { rank, pos } => {
                    assert!(rank == 1 || rank == 2);
                    assert_eq!(b.tile(pos), 0);
                    b.place(rank, pos);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(b.count_empty(), 0);
        assert_eq!(env.take_action(&b), Action::None);
    }

    #[test]
    fn single_empty_cell_is_found() {
        let mut env = RandomEnvironment::seeded(9);
        let b = Board::from_ranks([3; CELLS]).with_tile(0, 11);
        for _ in 0..10 {
            assert_eq!(env.spawn(&b).map(|(_, pos)| pos), Some(11));
        }
    }

    #[test]
    fn rank_distribution_is_roughly_ninety_ten() {
        let mut env = RandomEnvironment::seeded(2048);
        let draws = 10_000;
        let twos = (0..draws).filter(|_| env.spawn(&Board::EMPTY).map(|(r, _)| r) == Some(1)).count();
        let frac = twos as f64 / draws as f64;
        assert!((0.87..0.93).contains(&frac), "fraction of 2-tiles {frac}");
    }

    #[test]
    fn same_seed_same_tiles() {
        let mut a = RandomEnvironment::seeded(5);
        let mut b = RandomEnvironment::seeded(5);
        for _ in 0..32 {
            assert_eq!(a.spawn(&Board::EMPTY), b.spawn(&Board::EMPTY));
        }
    }

    #[test]
    fn config_sets_name_and_seed() {
        let cfg: AgentConfig = "name=env seed=3".parse().unwrap();
        let mut a = RandomEnvironment::new(&cfg);
        let mut b = RandomEnvironment::seeded(3);
        assert_eq!(a.name(), "env");
        assert_eq!(b.name(), "rndenv");
        assert_eq!(a.spawn(&Board::EMPTY), b.spawn(&Board::EMPTY));
    }
}
