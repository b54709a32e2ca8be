use crate::engine::{Board, Move, Reward};
use crate::ntuple::Network;

/// Outcome of a legal move considered by the policy.
///
/// - `after` is the afterstate (merged board, before the environment spawns).
/// - `score` is `reward + afterstate value`, the quantity being maximised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub mv: Move,
    pub reward: Reward,
    pub after: Board,
    pub score: f32,
}

/// Score every direction from `board`.
///
/// Returns a fixed array in [`Move::ALL`] order with `None` for illegal moves.
pub fn branch_evals(net: &Network, board: &Board) -> [Option<Decision>; 4] {
    Move::ALL.map(|mv| {
        board.slide(mv).map(|(after, reward)| Decision {
            mv,
            reward,
            after,
            score: reward as f32 + net.afterstate_value(&after),
        })
    })
}

/// Greedy one-ply move selection over afterstates.
///
/// The first direction (in [`Move::ALL`] order) with the strictly greatest
/// score wins. `None` means no legal move remains: the episode is over.
///
/// ```
/// use ntuple_2048::engine::{Board, Move};
/// use ntuple_2048::ntuple::Network;
/// use ntuple_2048::td::select_move;
///
/// let net = Network::new();
/// let b = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
/// let d = select_move(&net, &b).unwrap();
/// // Zero weights: the merging moves tie on reward and `Right` comes first.
/// assert_eq!(d.mv, Move::Right);
/// assert_eq!(d.reward, 4);
/// ```
pub fn select_move(net: &Network, board: &Board) -> Option<Decision> {
    let mut best: Option<Decision> = None;
    for decision in branch_evals(net, board).into_iter().flatten() {
        if best.map_or(true, |b| decision.score > b.score) {
            best = Some(decision);
        }
    }
    best
}
