use crate::engine::Board;

use super::{TILE_STATES, TUPLE_LEN};

/// Four board coordinates `(row, col)` read in order to form one feature.
pub type TuplePattern = [(usize, usize); TUPLE_LEN];

/// Row and column tuples of the default network: five patterns share table 0,
/// four share table 1.
const DEFAULT_PATTERNS: [(TuplePattern, usize); 9] = [
    ([(0, 3), (0, 2), (0, 1), (0, 0)], 0),
    ([(0, 0), (1, 0), (2, 0), (3, 0)], 0),
    ([(0, 1), (1, 1), (2, 1), (3, 1)], 0),
    ([(0, 2), (1, 2), (2, 2), (3, 2)], 0),
    ([(0, 3), (1, 3), (2, 3), (3, 3)], 0),
    ([(0, 3), (0, 2), (0, 1), (0, 0)], 1),
    ([(1, 3), (1, 2), (1, 1), (1, 0)], 1),
    ([(0, 2), (1, 2), (2, 2), (3, 2)], 1),
    ([(0, 3), (1, 3), (2, 3), (3, 3)], 1),
];

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SchemeError {
    #[error("pattern {pattern} reads cell ({row}, {col}) outside the 4x4 grid")]
    OutOfGrid { pattern: usize, row: usize, col: usize },
    #[error("scheme has no patterns")]
    Empty,
}

/// Fixed set of tuple patterns plus the pattern -> weight table assignment.
///
/// Hashing is a mixed-radix encoding of the ranks read along a pattern:
/// `index = sum(rank[j] * 24^j)`. It is exact (collision-free) for ranks
/// below [`TILE_STATES`].
#[derive(Debug, Clone)]
pub struct TupleScheme {
    /// Linear cell positions per pattern (row * 4 + col).
    cells: Vec<[usize; TUPLE_LEN]>,
    table_of: Vec<usize>,
    table_count: usize,
    base: [usize; TUPLE_LEN],
}

impl TupleScheme {
    /// Build a scheme from `(pattern, table)` pairs. Table ids are expected to
    /// be dense starting at 0; the table count is the highest id + 1.
    pub fn new(patterns: &[(TuplePattern, usize)]) -> Result<Self, SchemeError> {
        if patterns.is_empty() {
            return Err(SchemeError::Empty);
        }
        let mut cells = Vec::with_capacity(patterns.len());
        let mut table_of = Vec::with_capacity(patterns.len());
        for (pattern, (coords, table)) in patterns.iter().enumerate() {
            let mut linear = [0usize; TUPLE_LEN];
            for (slot, &(row, col)) in linear.iter_mut().zip(coords.iter()) {
                if row >= 4 || col >= 4 {
                    return Err(SchemeError::OutOfGrid { pattern, row, col });
                }
                *slot = row * 4 + col;
            }
            cells.push(linear);
            table_of.push(*table);
        }
        let table_count = table_of.iter().copied().max().map_or(0, |m| m + 1);
        let mut base = [1usize; TUPLE_LEN];
        for j in 1..TUPLE_LEN {
            base[j] = base[j - 1] * TILE_STATES;
        }
        Ok(Self { cells, table_of, table_count, base })
    }

    /// Number of patterns (feature instances).
    #[inline]
    pub fn len(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// Number of distinct weight tables the patterns map to.
    #[inline]
    pub fn table_count(&self) -> usize { self.table_count }

    /// Weight table used by `pattern`.
    ///
    /// Panics if `pattern >= self.len()`.
    #[inline]
    pub fn table_of(&self, pattern: usize) -> usize { self.table_of[pattern] }

    /// Feature index of `board` under `pattern`.
    ///
    /// Panics if `pattern >= self.len()`.
    #[inline]
    pub fn index(&self, board: &Board, pattern: usize) -> usize {
        let cells = &self.cells[pattern];
        let mut idx = 0;
        for j in 0..TUPLE_LEN {
            let rank = board.tile(cells[j]) as usize;
            debug_assert!(rank < TILE_STATES, "tile rank {rank} out of range for hashing");
            idx += rank * self.base[j];
        }
        idx
    }

    /// `(table, index)` of every pattern for `board`, in pattern order.
    #[inline]
    pub fn features<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = (usize, usize)> + 'a {
        (0..self.len()).map(move |p| (self.table_of[p], self.index(board, p)))
    }
}

impl Default for TupleScheme {
    fn default() -> Self {
        // The default patterns are all inside the grid.
        match Self::new(&DEFAULT_PATTERNS) {
            Ok(scheme) => scheme,
            Err(e) => unreachable!("default tuple scheme is invalid: {e}"),
        }
    }
}
