use std::path::PathBuf;

use log::{debug, info};

use crate::engine::Board;
use crate::ntuple::{Network, TupleScheme};
use crate::serialization::{self, PersistError};
use crate::td::{select_move, Decision, EpisodeRecorder, TdReport, TdTrainer};

use super::{Action, Agent, AgentConfig, ConfigError};

// Reserve room for a long game up front.
const EPISODE_CAPACITY: usize = 32_768;

#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    #[error("bad player arguments: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot load weights from {path}: {source}")]
    Load { path: PathBuf, source: PersistError },
    #[error("cannot save weights to {path}: {source}")]
    Save { path: PathBuf, source: PersistError },
}

/// Learning agent: greedy afterstate policy over an n-tuple network, trained
/// by TD(0) at the end of every episode.
///
/// ```
/// use ntuple_2048::agent::{Agent, Action, Player};
/// use ntuple_2048::engine::Board;
///
/// let mut player = Player::from_args("alpha=0.1").unwrap();
/// let b = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
/// player.open_episode();
/// assert!(matches!(player.take_action(&b), Action::Slide(_)));
/// player.close_episode(&b);
/// ```
pub struct Player {
    name: String,
    network: Network,
    recorder: EpisodeRecorder,
    trainer: TdTrainer,
    save: Option<PathBuf>,
}

impl Player {
    /// Build from parsed settings, loading weights when `load=` is set.
    ///
    /// A weight file that cannot be read is an error: training must not
    /// silently restart from zero weights.
    pub fn new(config: &AgentConfig) -> Result<Self, PlayerError> {
        let network = match &config.load {
            Some(path) => {
                let net = serialization::read_weights_from_path(path, TupleScheme::default())
                    .map_err(|source| PlayerError::Load { path: path.clone(), source })?;
                info!("loaded {} weight tables from {}", net.tables().len(), path.display());
                net
            }
            None => Network::new(),
        };
        let mut player = Self::with_network(network, config.alpha);
        if let Some(name) = &config.name {
            player.name = name.clone();
        }
        player.save = config.save.clone();
        Ok(player)
    }

    /// Parse `key=value` tokens and build the player.
    pub fn from_args(args: &str) -> Result<Self, PlayerError> {
        let config: AgentConfig = args.parse()?;
        Self::new(&config)
    }

    pub fn with_network(network: Network, alpha: f32) -> Self {
        Self {
            name: "player".to_string(),
            network,
            recorder: EpisodeRecorder::with_capacity(EPISODE_CAPACITY),
            trainer: TdTrainer::new(alpha),
            save: None,
        }
    }

    #[inline]
    pub fn network(&self) -> &Network { &self.network }

    #[inline]
    pub fn into_network(self) -> Network { self.network }

    #[inline]
    pub fn recorder(&self) -> &EpisodeRecorder { &self.recorder }

    #[inline]
    pub fn alpha(&self) -> f32 { self.trainer.alpha() }

    /// Pick a move for `board` and log the previous turn with `board` as its successor.
    pub fn decide(&mut self, board: &Board) -> Option<Decision> {
        let decision = select_move(&self.network, board);
        self.recorder.observe(board, decision.as_ref());
        decision
    }

    /// Fold in the last turn, train on the episode, and reset for the next one.
    pub fn finish_episode(&mut self, final_board: &Board) -> TdReport {
        self.recorder.seal(final_board);
        let report = self.trainer.train(&mut self.network, self.recorder.transitions());
        debug!(
            "episode closed: {} transitions, {} updates, mean |td error| {:.4}",
            self.recorder.len(),
            report.updates,
            report.mean_abs_error
        );
        self.recorder.clear();
        report
    }

    /// Write the weights to the `save=` path, if one was configured.
    ///
    /// Returns whether a file was written.
    pub fn save_if_configured(&self) -> Result<bool, PlayerError> {
        let Some(path) = &self.save else {
            return Ok(false);
        };
        serialization::write_weights_to_path(path, &self.network)
            .map_err(|source| PlayerError::Save { path: path.clone(), source })?;
        info!("saved {} weight tables to {}", self.network.tables().len(), path.display());
        Ok(true)
    }
}

impl Agent for Player {
    fn name(&self) -> &str { &self.name }

    fn open_episode(&mut self) { self.recorder.clear(); }

    fn close_episode(&mut self, final_board: &Board) { self.finish_episode(final_board); }

    fn take_action(&mut self, board: &Board) -> Action {
        match self.decide(board) {
            Some(d) => Action::Slide(d.mv),
            None => Action::None,
        }
    }
}

/// Frozen greedy player over a borrowed network: same policy as [`Player`],
/// no recording and no learning. Cheap to create, so parallel evaluation can
/// give every game its own.
pub struct GreedyPlayer<'a> {
    network: &'a Network,
}

impl<'a> GreedyPlayer<'a> {
    pub fn new(network: &'a Network) -> Self { Self { network } }
}

impl Agent for GreedyPlayer<'_> {
    fn name(&self) -> &str { "greedy" }

    fn take_action(&mut self, board: &Board) -> Action {
        match select_move(self.network, board) {
            Some(d) => Action::Slide(d.mv),
            None => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Move;

    fn opening() -> Board { Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]) }

    #[test]
    fn defaults() {
        let p = Player::from_args("").unwrap();
        assert_eq!(p.name(), "player");
        assert_eq!(p.alpha(), 0.0025);
        assert!(p.network().tables().iter().all(|t| t.as_slice().iter().all(|w| *w == 0.0)));
    }

    #[test]
    fn missing_weight_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let args = format!("load={}", dir.path().join("missing.bin").display());
        let err = Player::from_args(&args).err().unwrap();
        assert!(matches!(err, PlayerError::Load { .. }));
    }

    #[test]
    fn bad_alpha_is_config_error() {
        assert!(matches!(Player::from_args("alpha=x").err(), Some(PlayerError::Config(_))));
    }

    #[test]
    fn take_action_records_with_lag() {
        let mut p = Player::from_args("alpha=0").unwrap();
        p.open_episode();
        let b0 = opening();
        let Action::Slide(mv) = p.take_action(&b0) else { panic!("expected a slide") };
        assert_eq!(mv, Move::Right);
        assert_eq!(p.recorder().len(), 0);
        assert!(p.recorder().has_pending());

        let b1 = b0.slide(mv).unwrap().0.with_tile(1, 0);
        assert!(matches!(p.take_action(&b1), Action::Slide(_)));
        assert_eq!(p.recorder().len(), 1);
        assert_eq!(p.recorder().transitions()[0].after, b1);
        assert_eq!(p.recorder().transitions()[0].reward, 4.0);

        let terminal = Board::from_rows([[1, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [2, 1, 2, 1]]);
        assert_eq!(p.take_action(&terminal), Action::None);
        assert_eq!(p.recorder().len(), 2);
        assert!(!p.recorder().has_pending());

        let report = p.finish_episode(&terminal);
        assert_eq!(report, TdReport::default());
        assert!(p.recorder().is_empty());
    }

    #[test]
    fn closing_episode_trains() {
        let mut p = Player::from_args("alpha=1").unwrap();
        let b0 = opening();
        p.take_action(&b0);
        let final_board = b0.slide(Move::Right).unwrap().0.with_tile(1, 0);
        let report = p.finish_episode(&final_board);
        assert_eq!(report.updates, 2);
        // Terminal update is 0 on zero weights; every feature of b0 gains 4.
        // b0 shares features: columns 0/1 hit one entry twice, the empty
        // columns and row 1 hit entry 0 of each table, so the sum is 76.
        assert_eq!(p.network().board_value(&b0), 76.0 / 9.0);
    }

    #[test]
    fn greedy_player_matches_player_choice() {
        let mut p = Player::from_args("alpha=0").unwrap();
        let b = Board::from_rows([[1, 2, 0, 0], [1, 0, 0, 0], [0; 4], [0; 4]]);
        let mut g = GreedyPlayer::new(p.network());
        let greedy = g.take_action(&b);
        assert_eq!(greedy, Action::Slide(Move::Up));
        assert_eq!(p.take_action(&b), greedy);
    }

    #[test]
    fn save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.bin");
        let mut p = Player::from_args(&format!("alpha=0.5 save={}", path.display())).unwrap();
        p.take_action(&opening());
        p.finish_episode(&Board::from_rows([[0, 0, 0, 2], [0; 4], [1, 0, 0, 0], [0; 4]]));
        assert!(p.save_if_configured().unwrap());

        let q = Player::from_args(&format!("load={}", path.display())).unwrap();
        assert_eq!(q.network().board_value(&opening()), p.network().board_value(&opening()));
        assert!(!q.save_if_configured().unwrap());
    }
}
