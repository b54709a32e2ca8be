//! ntuple-2048: a self-play TD(0) learner for 2048 on an n-tuple network
//!
//! This crate provides:
//! - A compact `Board` type with move/placement operations (`engine` module)
//! - The n-tuple value function: tuple patterns, weight tables, afterstate evaluation (`ntuple`)
//! - Greedy afterstate policy, episode recording and the TD(0) trainer (`td`)
//! - The learning player and the random tile environment as agents (`agent`)
//! - Weight persistence (`serialization`) and game drivers (`selfplay`)
//!
//! Quick start:
//! ```
//! use ntuple_2048::agent::{Player, RandomEnvironment};
//! use ntuple_2048::selfplay::{play_episode, Statistics};
//!
//! // Learning rate from a key=value string; the environment is seeded for determinism
//! let mut player = Player::from_args("alpha=0.0025").unwrap();
//! let mut env = RandomEnvironment::seeded(42);
//!
//! // Each episode trains the network once the game is over
//! let mut stats = Statistics::new();
//! for _ in 0..2 {
//!     stats.push(&play_episode(&mut player, &mut env));
//! }
//! assert_eq!(stats.games(), 2);
//! ```
//!
//! Note: the policy itself is deterministic. All randomness comes from the
//! environment's random source, which is owned by the environment agent.
//!
pub mod agent;
pub mod engine;
pub mod ntuple;
pub mod selfplay;
pub mod serialization;
pub mod td;
