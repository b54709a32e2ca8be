use crate::engine::{Board, Move};

use super::Decision;

/// One recorded turn of the learning agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Board the agent decided on.
    pub before: Board,
    /// Board handed back to the agent after the move and the following spawn
    /// (or the final board of the episode).
    pub after: Board,
    pub mv: Move,
    /// Merge score of the move.
    pub reward: f32,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    before: Board,
    mv: Move,
    reward: f32,
}

/// Append-only trajectory of one episode with one-turn-delayed logging.
///
/// The successor board of turn `t` is only known when the agent is asked to
/// act at turn `t + 1` (or when the episode ends), so each turn is held as
/// pending until then. Mid-episode the recorder therefore holds one entry
/// fewer than the number of moves played; [`EpisodeRecorder::seal`] folds in
/// the last one.
#[derive(Debug, Clone, Default)]
pub struct EpisodeRecorder {
    transitions: Vec<Transition>,
    pending: Option<Pending>,
}

impl EpisodeRecorder {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { transitions: Vec::with_capacity(capacity), pending: None }
    }

    /// Record what the agent saw (`board`) and what it decided.
    ///
    /// Completes the pending turn with `after = board`, then starts a new
    /// pending turn from `decision` (none when no move was available).
    pub fn observe(&mut self, board: &Board, decision: Option<&Decision>) {
        if let Some(p) = self.pending.take() {
            self.transitions.push(Transition { before: p.before, after: *board, mv: p.mv, reward: p.reward });
        }
        self.pending = decision.map(|d| Pending { before: *board, mv: d.mv, reward: d.reward as f32 });
    }

    /// Complete the pending turn, if any, with the episode's final board.
    pub fn seal(&mut self, final_board: &Board) {
        if let Some(p) = self.pending.take() {
            self.transitions.push(Transition { before: p.before, after: *final_board, mv: p.mv, reward: p.reward });
        }
    }

    /// Completed transitions in chronological order.
    #[inline]
    pub fn transitions(&self) -> &[Transition] { &self.transitions }

    #[inline]
    pub fn len(&self) -> usize { self.transitions.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.transitions.is_empty() }

    #[inline]
    pub fn has_pending(&self) -> bool { self.pending.is_some() }

    /// Drop all transitions and the pending turn, keeping the allocation.
    pub fn clear(&mut self) {
        self.transitions.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntuple::Network;
    use crate::td::select_move;

    #[test]
    fn lags_one_turn_then_seals() {
        let net = Network::new();
        let mut rec = EpisodeRecorder::new();
        let boards = [
            Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Board::from_rows([[2, 0, 0, 0], [0, 0, 1, 0], [0; 4], [0; 4]]),
            Board::from_rows([[2, 1, 0, 0], [0; 4], [0; 4], [0, 0, 1, 0]]),
        ];
        let mut decisions = Vec::new();
        for (turn, b) in boards.iter().enumerate() {
            let d = select_move(&net, b).unwrap();
            rec.observe(b, Some(&d));
            decisions.push(d);
            assert_eq!(rec.len(), turn);
            assert!(rec.has_pending());
        }
        let final_board = Board::from_rows([[2, 2, 0, 0], [0; 4], [1, 0, 0, 0], [0; 4]]);
        rec.seal(&final_board);
        assert_eq!(rec.len(), 3);
        assert!(!rec.has_pending());

        let t = rec.transitions();
        assert_eq!(t[0].after, t[1].before);
        assert_eq!(t[1].after, t[2].before);
        assert_eq!(t[2].after, final_board);
        for (i, d) in decisions.iter().enumerate() {
            assert_eq!(t[i].before, boards[i]);
            assert_eq!(t[i].mv, d.mv);
            assert_eq!(t[i].reward, d.reward as f32);
        }
    }

    #[test]
    fn no_move_finalizes_without_new_pending() {
        let net = Network::new();
        let mut rec = EpisodeRecorder::new();
        let b = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let d = select_move(&net, &b);
        rec.observe(&b, d.as_ref());
        let terminal = Board::from_rows([[1, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [2, 1, 2, 1]]);
        rec.observe(&terminal, None);
        assert_eq!(rec.len(), 1);
        assert!(!rec.has_pending());
        rec.seal(&terminal);
        assert_eq!(rec.len(), 1);
        assert_eq!(rec.transitions()[0].after, terminal);
    }

    #[test]
    fn clear_resets_everything() {
        let net = Network::new();
        let mut rec = EpisodeRecorder::with_capacity(8);
        let b = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let d = select_move(&net, &b);
        rec.observe(&b, d.as_ref());
        rec.observe(&b, d.as_ref());
        rec.clear();
        assert!(rec.is_empty());
        assert!(!rec.has_pending());
    }
}
