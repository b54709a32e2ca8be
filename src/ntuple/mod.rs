//! n-tuple network value function for 2048.
//!
//! A [`TupleScheme`] maps a board to one feature index per pattern; each
//! pattern reads one of the scheme's [`WeightTable`]s. [`Network`] combines
//! both to score boards and afterstates.
//!
//! Notes
//! - The value of a board is the mean (not the sum) of its pattern lookups,
//!   so the weight scale does not depend on the pattern count.
//! - Afterstates are scored by averaging over the environment's random spawn
//!   (90% rank 1, 10% rank 2 in every empty cell).
//!
//! Quick start
//! ```
//! use ntuple_2048::engine::{Board, Move};
//! use ntuple_2048::ntuple::Network;
//!
//! let mut net = Network::new();
//! let b = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
//! net.update(&b, 0.9);
//! assert!(net.board_value(&b) > 0.0);
//!
//! let (after, _reward) = b.slide(Move::Left).unwrap();
//! let _v = net.afterstate_value(&after);
//! ```

mod network;
mod scheme;
mod table;

pub use network::{Network, ShapeError, SPAWN_RANK1_PROB, SPAWN_RANK2_PROB};
pub use scheme::{SchemeError, TuplePattern, TupleScheme};
pub use table::WeightTable;

/// Cells per tuple pattern.
pub const TUPLE_LEN: usize = 4;

/// Distinct per-cell values a pattern can read (tile ranks 0..24).
pub const TILE_STATES: usize = 24;

/// Entries per weight table: `TILE_STATES ^ TUPLE_LEN`.
pub const TABLE_SIZE: usize = TILE_STATES * TILE_STATES * TILE_STATES * TILE_STATES;
