//! Afterstate TD(0) learning on top of an n-tuple [`Network`](crate::ntuple::Network).
//!
//! - [`select_move`]: greedy one-ply policy, `argmax(reward + afterstate value)`.
//! - [`EpisodeRecorder`]: per-episode transitions with one-turn-delayed logging.
//! - [`TdTrainer`]: TD(0) pass over a finished episode.
//!
//! The policy is deterministic; randomness only enters through the
//! environment's tile spawns.

mod episode;
mod policy;
mod trainer;

pub use episode::{EpisodeRecorder, Transition};
pub use policy::{branch_evals, select_move, Decision};
pub use trainer::{TdReport, TdTrainer};
