use std::fmt;

/// A direction to move/merge tiles.
///
/// The declaration order is the order in which the policy tries moves, and
/// therefore decides ties between equally scored moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    /// All directions in opcode order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    /// Numeric opcode (0 = up, 1 = right, 2 = down, 3 = left).
    #[inline]
    pub fn opcode(self) -> u8 {
        match self {
            Move::Up => 0,
            Move::Right => 1,
            Move::Down => 2,
            Move::Left => 3,
        }
    }

    /// Inverse of [`Move::opcode`].
    #[inline]
    pub fn from_opcode(op: u8) -> Option<Move> {
        Move::ALL.get(op as usize).copied()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Right => "right",
            Move::Down => "down",
            Move::Left => "left",
        };
        f.write_str(s)
    }
}

/// Exponent of a tile (0 = empty, k = tile value 2^k).
pub type Rank = u8;

/// Score gained by the merges of a single move.
pub type Reward = u32;

/// Number of cells on the board.
pub const CELLS: usize = 16;

/// 4x4 2048 board holding one tile rank per cell, row-major.
///
/// Position `p` addresses row `p / 4`, column `p % 4`. The board is a plain
/// `Copy` value: trial moves work on copies and never touch the original.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([Rank; CELLS]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([0; CELLS]);

    /// Construct a `Board` from 16 row-major ranks.
    #[inline]
    pub fn from_ranks(ranks: [Rank; CELLS]) -> Self { Board(ranks) }

    /// Construct a `Board` from four rows of ranks.
    pub fn from_rows(rows: [[Rank; 4]; 4]) -> Self {
        let mut ranks = [0; CELLS];
        for (r, row) in rows.iter().enumerate() {
            ranks[r * 4..r * 4 + 4].copy_from_slice(row);
        }
        Board(ranks)
    }

    /// Borrow the row-major ranks.
    #[inline]
    pub fn ranks(&self) -> &[Rank; CELLS] { &self.0 }

    /// Rank at linear position `pos` (0..16).
    #[inline]
    pub fn tile(&self, pos: usize) -> Rank { self.0[pos] }

    /// Rank at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Rank { self.0[row * 4 + col] }

    /// Put a tile of `rank` at linear position `pos`.
    #[inline]
    pub fn place(&mut self, rank: Rank, pos: usize) { self.0[pos] = rank; }

    /// Copy of this board with a tile of `rank` at `pos`.
    #[inline]
    pub fn with_tile(mut self, rank: Rank, pos: usize) -> Self {
        self.place(rank, pos);
        self
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert)
    /// together with the merge reward, or `None` if the move changes nothing.
    ///
    /// ```
    /// use ntuple_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// let (after, reward) = b.slide(Move::Left).unwrap();
    /// assert_eq!(after.at(0, 0), 2);
    /// assert_eq!(reward, 4);
    /// assert!(Board::EMPTY.slide(Move::Up).is_none());
    /// ```
    pub fn slide(self, dir: Move) -> Option<(Board, Reward)> {
        let mut next = self;
        let mut reward = 0;
        for line in 0..4 {
            let cells = line_positions(dir, line);
            let mut tiles = cells.map(|p| self.0[p]);
            reward += shift_line_left(&mut tiles);
            for (&p, &t) in cells.iter().zip(tiles.iter()) {
                next.0[p] = t;
            }
        }
        if next == self { None } else { Some((next, reward)) }
    }

    /// In-place variant of [`Board::slide`]. Leaves the board untouched and
    /// returns `None` when the move is illegal.
    #[inline]
    pub fn apply(&mut self, dir: Move) -> Option<Reward> {
        let (next, reward) = self.slide(dir)?;
        *self = next;
        Some(reward)
    }

    /// Return true if no legal moves remain.
    ///
    /// ```
    /// use ntuple_2048::engine::Board;
    /// // Nothing slides on an empty board.
    /// assert!(Board::EMPTY.is_game_over());
    /// ```
    pub fn is_game_over(self) -> bool {
        Move::ALL.iter().all(|&dir| self.slide(dir).is_none())
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize { self.0.iter().filter(|&&t| t == 0).count() }

    /// Positions of the empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().filter(|(_, &t)| t == 0).map(|(p, _)| p)
    }

    /// Highest rank present (0 on an empty board).
    #[inline]
    pub fn max_rank(&self) -> Rank { self.0.iter().copied().max().unwrap_or(0) }

    /// Return the highest tile value (e.g., 2048) present on the board, 0 if empty.
    #[inline]
    pub fn highest_tile(&self) -> u32 {
        match self.max_rank() {
            0 => 0,
            r => 1 << r,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?}, {:?}, {:?}, {:?})", &self.0[0..4], &self.0[4..8], &self.0[8..12], &self.0[12..16])
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board: Vec<_> = self.0.iter().map(format_val).collect();
        write!(
            f,
            "\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n",
            board[0], board[1], board[2], board[3],
            board[4], board[5], board[6], board[7],
            board[8], board[9], board[10], board[11],
            board[12], board[13], board[14], board[15]
        )
    }
}

impl From<[Rank; CELLS]> for Board { fn from(v: [Rank; CELLS]) -> Self { Board::from_ranks(v) } }

/// Cells of line `line` ordered so that sliding `dir` moves tiles towards index 0.
#[inline]
fn line_positions(dir: Move, line: usize) -> [usize; 4] {
    match dir {
        Move::Left => [line * 4, line * 4 + 1, line * 4 + 2, line * 4 + 3],
        Move::Right => [line * 4 + 3, line * 4 + 2, line * 4 + 1, line * 4],
        Move::Up => [line, 4 + line, 8 + line, 12 + line],
        Move::Down => [12 + line, 8 + line, 4 + line, line],
    }
}

/// Slide one line towards index 0, returning the merge reward.
fn shift_line_left(tiles: &mut [Rank; 4]) -> Reward {
    let mut reward = 0;
    for i in 0..4 {
        reward += calculate_left_shift(&mut tiles[i..]);
    }
    reward
}

/// Pull the next tile (merged at most once) into `slice[0]`.
fn calculate_left_shift(slice: &mut [Rank]) -> Reward {
    let mut acc = 0;
    let mut reward = 0;
    for idx in 0..slice.len() {
        let val = slice[idx];
        if acc != 0 && acc == val {
            slice[idx] = 0;
            acc += 1;
            reward = 1 << acc;
            break;
        } else if acc != 0 && val != 0 && acc != val {
            break;
        } else if acc == 0 && val != 0 {
            slice[idx] = 0;
            acc = val;
        };
    }
    slice[0] = acc;
    reward
}

fn format_val(val: &Rank) -> String {
    match val {
        0 => String::from("       "),
        &x => {
            let mut x = (2_u64.pow(x as u32)).to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
