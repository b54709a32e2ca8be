use log::error;

use crate::engine::Board;

use super::{TupleScheme, WeightTable, TABLE_SIZE};

/// Probability that the environment spawns a rank-1 ("2") tile.
pub const SPAWN_RANK1_PROB: f32 = 0.9;
/// Probability that the environment spawns a rank-2 ("4") tile.
pub const SPAWN_RANK2_PROB: f32 = 0.1;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
    #[error("expected {expected} weight tables, got {actual}")]
    TableCount { expected: usize, actual: usize },
    #[error("weight table {table} has {actual} entries, expected {expected}")]
    TableSize { table: usize, expected: usize, actual: usize },
}

/// n-tuple value function: a [`TupleScheme`] plus one [`WeightTable`] per
/// table id of the scheme.
///
/// The value of a board is the mean of its per-pattern lookups. Weights are
/// only changed through [`Network::update`].
#[derive(Debug, Clone)]
pub struct Network {
    scheme: TupleScheme,
    tables: Vec<WeightTable>,
}

impl Network {
    /// Default scheme with zeroed tables.
    pub fn new() -> Self { Self::zeroed(TupleScheme::default()) }

    pub fn zeroed(scheme: TupleScheme) -> Self {
        let tables = (0..scheme.table_count()).map(|_| WeightTable::zeroed(TABLE_SIZE)).collect();
        Self { scheme, tables }
    }

    /// Attach previously learned tables to `scheme`, checking that the shapes agree.
    pub fn with_tables(scheme: TupleScheme, tables: Vec<WeightTable>) -> Result<Self, ShapeError> {
        if tables.len() != scheme.table_count() {
            return Err(ShapeError::TableCount { expected: scheme.table_count(), actual: tables.len() });
        }
        if let Some((table, t)) = tables.iter().enumerate().find(|(_, t)| t.len() != TABLE_SIZE) {
            return Err(ShapeError::TableSize { table, expected: TABLE_SIZE, actual: t.len() });
        }
        Ok(Self { scheme, tables })
    }

    #[inline]
    pub fn scheme(&self) -> &TupleScheme { &self.scheme }

    #[inline]
    pub fn tables(&self) -> &[WeightTable] { &self.tables }

    #[inline]
    pub fn tables_mut(&mut self) -> &mut [WeightTable] { &mut self.tables }

    /// Weight looked up by a single pattern.
    ///
    /// An unknown pattern index is a caller bug: it is logged and scores 0.
    pub fn pattern_value(&self, board: &Board, pattern: usize) -> f32 {
        if pattern >= self.scheme.len() {
            error!("no tuple pattern #{pattern}; the scheme has {}", self.scheme.len());
            return 0.0;
        }
        self.tables[self.scheme.table_of(pattern)].get(self.scheme.index(board, pattern))
    }

    /// Mean of all per-pattern lookups.
    ///
    /// ```
    /// use ntuple_2048::engine::Board;
    /// use ntuple_2048::ntuple::Network;
    /// let net = Network::new();
    /// assert_eq!(net.board_value(&Board::EMPTY), 0.0);
    /// ```
    pub fn board_value(&self, board: &Board) -> f32 {
        let sum: f32 = self
            .scheme
            .features(board)
            .map(|(table, idx)| self.tables[table].get(idx))
            .sum();
        sum / self.scheme.len() as f32
    }

    /// Expected value of an afterstate over the environment's next spawn.
    ///
    /// Each empty cell contributes `0.9 * V(rank 1 there) + 0.1 * V(rank 2 there)`
    /// and the total is divided by the number of empty cells. A board without
    /// empty cells has no spawn to average over and is worth 0.
    pub fn afterstate_value(&self, board: &Board) -> f32 {
        let mut value = 0.0f32;
        let mut empty = 0usize;
        for pos in board.empty_cells() {
            value += SPAWN_RANK1_PROB * self.board_value(&board.with_tile(1, pos));
            value += SPAWN_RANK2_PROB * self.board_value(&board.with_tile(2, pos));
            empty += 1;
        }
        if empty == 0 {
            return 0.0;
        }
        value / empty as f32
    }

    /// Add `delta` to the entry of every pattern for `board`.
    pub fn update(&mut self, board: &Board, delta: f32) {
        for p in 0..self.scheme.len() {
            let table = self.scheme.table_of(p);
            let idx = self.scheme.index(board, p);
            self.tables[table].add(idx, delta);
        }
    }
}

impl Default for Network { fn default() -> Self { Self::new() } }
