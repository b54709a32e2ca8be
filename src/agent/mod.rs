//! Agents taking turns on a shared board.
//!
//! A game alternates two agents: the learning [`Player`] slides tiles and the
//! [`RandomEnvironment`] spawns new ones. Both are configured from
//! `key=value` strings through [`AgentConfig`].

use crate::engine::{Board, Move, Rank, Reward};

mod config;
mod environment;
mod player;

pub use config::{AgentConfig, ConfigError, DEFAULT_ALPHA};
pub use environment::RandomEnvironment;
pub use player::{GreedyPlayer, Player, PlayerError};

/// What an agent does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Slide/merge all tiles in a direction.
    Slide(Move),
    /// Put a tile of `rank` on the empty cell `pos`.
    Place { rank: Rank, pos: usize },
    /// Nothing can be done; ends the game.
    None,
}

impl Action {
    /// Apply the action to `board`, returning the reward, or `None` if the
    /// action is not legal there (the board is then left untouched).
    pub fn apply(self, board: &mut Board) -> Option<Reward> {
        match self {
            Action::Slide(mv) => board.apply(mv),
            Action::Place { rank, pos } if pos < crate::engine::CELLS && board.tile(pos) == 0 => {
                board.place(rank, pos);
                Some(0)
            }
            Action::Place { .. } | Action::None => None,
        }
    }
}

/// Common interface of the game participants.
pub trait Agent {
    fn name(&self) -> &str;

    /// Called before the first turn of a game.
    fn open_episode(&mut self) {}

    /// Called once the game is over, with the board it ended on.
    fn close_episode(&mut self, _final_board: &Board) {}

    /// Choose an action for `board`.
    fn take_action(&mut self, board: &Board) -> Action;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_requires_empty_cell() {
        let mut b = Board::EMPTY;
        assert_eq!(Action::Place { rank: 1, pos: 5 }.apply(&mut b), Some(0));
        assert_eq!(b.tile(5), 1);
        assert_eq!(Action::Place { rank: 2, pos: 5 }.apply(&mut b), None);
        assert_eq!(b.tile(5), 1);
        assert_eq!(Action::Place { rank: 2, pos: 16 }.apply(&mut b), None);
    }

    #[test]
    fn slide_and_none() {
        let mut b = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(Action::Slide(Move::Left).apply(&mut b), Some(4));
        assert_eq!(Action::Slide(Move::Left).apply(&mut b), None);
        assert_eq!(Action::None.apply(&mut b), None);
    }
}
