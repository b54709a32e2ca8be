use crate::ntuple::Network;

use super::Transition;

/// Summary of one training pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TdReport {
    /// TD updates applied, the terminal one included.
    pub updates: usize,
    /// Mean absolute TD error over those updates.
    pub mean_abs_error: f32,
}

/// TD(0) learner run once per episode over the recorded trajectory.
///
/// The pass starts with the terminal step, which pulls the value of the final
/// board towards 0, then walks the transitions from newest to oldest applying
/// `V(before) += alpha * (reward + V(after) - V(before))`. Values are always
/// read from the live weights, so corrections propagate backwards within a
/// single pass.
#[derive(Debug, Clone, Copy)]
pub struct TdTrainer {
    alpha: f32,
}

impl TdTrainer {
    pub fn new(alpha: f32) -> Self { Self { alpha } }

    #[inline]
    pub fn alpha(&self) -> f32 { self.alpha }

    /// Apply the TD(0) pass for `episode` to `net`.
    ///
    /// A zero learning rate leaves the weights untouched.
    pub fn train(&self, net: &mut Network, episode: &[Transition]) -> TdReport {
        if self.alpha == 0.0 {
            return TdReport::default();
        }
        let Some(last) = episode.last() else {
            return TdReport::default();
        };

        let mut abs_error = 0.0f32;

        // No reward follows the final board.
        let terminal = -net.board_value(&last.after);
        net.update(&last.after, self.alpha * terminal);
        abs_error += terminal.abs();

        for t in episode.iter().rev() {
            let error = t.reward + net.board_value(&t.after) - net.board_value(&t.before);
            net.update(&t.before, self.alpha * error);
            abs_error += error.abs();
        }

        let updates = episode.len() + 1;
        TdReport { updates, mean_abs_error: abs_error / updates as f32 }
    }
}

impl Default for TdTrainer {
    fn default() -> Self { Self::new(crate::agent::DEFAULT_ALPHA) }
}
