use crate::agent::Agent;
use crate::engine::Board;

use super::EpisodeSummary;

/// Play one game between `player` and `env` and close both episodes.
///
/// The environment places the two opening tiles, then the agents alternate
/// (player slides, environment spawns) until one of them has no legal action.
///
/// ```
/// use ntuple_2048::agent::{Player, RandomEnvironment};
/// use ntuple_2048::selfplay::play_episode;
///
/// let mut player = Player::from_args("alpha=0.0025").unwrap();
/// let mut env = RandomEnvironment::seeded(7);
/// let summary = play_episode(&mut player, &mut env);
/// assert!(summary.moves > 0);
/// ```
pub fn play_episode<P, E>(player: &mut P, env: &mut E) -> EpisodeSummary
where
    P: Agent + ?Sized,
    E: Agent + ?Sized,
{
    let mut board = Board::EMPTY;
    player.open_episode();
    env.open_episode();

    for _ in 0..2 {
        if env.take_action(&board).apply(&mut board).is_none() {
            break;
        }
    }

    let mut summary = EpisodeSummary::default();
    loop {
        let Some(reward) = player.take_action(&board).apply(&mut board) else { break };
        summary.moves += 1;
        summary.score += reward as u64;
        if env.take_action(&board).apply(&mut board).is_none() {
            break;
        }
    }
    summary.max_rank = board.max_rank();

    player.close_episode(&board);
    env.close_episode(&board);
    summary
}
