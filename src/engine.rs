use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, ParseError};

/// Value held by one cell: 0 when empty, otherwise a power of two.
pub type Tile = u64;
/// One row or column, ordered in the direction it is being merged.
pub type Line = Vec<Tile>;

/// Largest tile total `Board::from_rows` accepts, and so the largest single cell.
///
/// Merging conserves the total, so no merge on an accepted board can exceed it.
/// Only spawns grow the total, by at most 4 per move.
pub const MAX_TILE: Tile = 1 << 62;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Every direction, in `Up, Right, Down, Left` order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Up/Down work on columns, Left/Right on rows.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Right/Down are merged as "reverse, merge toward index 0, reverse back".
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Result of merging a single line toward index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineShift {
    pub line: Line,
    pub changed: bool,
}

/// Result of shifting a whole board. `changed` is false for a no-op move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shifted {
    pub board: Board,
    pub changed: bool,
}

/// Square 2048 grid of `size` rows by `size` columns.
///
/// Cells are stored row-major; `0` marks an empty cell. Every core operation
/// keeps the grid square and only ever writes 0 or a power of two.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    grid: Vec<Vec<Tile>>,
}

impl Board {
    /// An empty `size` x `size` board.
    ///
    /// ```
    /// use puzzle_2048::engine::Board;
    /// let b = Board::new(4).unwrap();
    /// assert_eq!(b.count_empty(), 16);
    /// assert!(Board::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        Ok(Board::zeros(size))
    }

    pub(crate) fn zeros(size: usize) -> Self {
        Board { size, grid: vec![vec![0; size]; size] }
    }

    /// Build a board from explicit rows, copying them.
    ///
    /// ```
    /// use puzzle_2048::engine::Board;
    /// let b = Board::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(b.cells(), vec![2, 0, 0, 4]);
    /// assert!(Board::from_rows(vec![vec![3, 0], vec![0, 0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        let mut total: Tile = 0;
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(BoardError::NotSquare { row, len: cells.len(), size });
            }
            for (col, &value) in cells.iter().enumerate() {
                if !is_tile_value(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
                total = total
                    .checked_add(value)
                    .filter(|&t| t <= MAX_TILE)
                    .ok_or(BoardError::TotalTooLarge { limit: MAX_TILE })?;
            }
        }
        Ok(Board { size, grid: rows })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrow the grid row by row.
    #[inline]
    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.grid
    }

    /// Flattened row-major copy of every cell; 0 means empty.
    pub fn cells(&self) -> Vec<Tile> {
        self.grid.iter().flatten().copied().collect()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Copy row `index` (or column `index` when `vertical`), reversed if asked.
    ///
    /// ```
    /// use puzzle_2048::engine::Board;
    /// let b = Board::from_rows(vec![vec![2, 4], vec![8, 16]]).unwrap();
    /// assert_eq!(b.extract_line(0, false, false), vec![2, 4]);
    /// assert_eq!(b.extract_line(0, true, false), vec![2, 8]);
    /// assert_eq!(b.extract_line(1, true, true), vec![16, 4]);
    /// ```
    pub fn extract_line(&self, index: usize, vertical: bool, reverse: bool) -> Line {
        let mut line: Line = if vertical {
            self.grid.iter().map(|row| row[index]).collect()
        } else {
            self.grid[index].clone()
        };
        if reverse {
            line.reverse();
        }
        line
    }

    /// Overwrite row/column `index` with `line`, un-reversing it first if asked.
    ///
    /// # Panics
    ///
    /// Panics if `line` does not hold exactly `size` cells.
    pub fn insert_line(&mut self, line: &[Tile], index: usize, vertical: bool, reverse: bool) {
        assert_eq!(line.len(), self.size, "line length must match board size");
        let mut line = line.to_vec();
        if reverse {
            line.reverse();
        }
        if vertical {
            for (row, value) in self.grid.iter_mut().zip(line) {
                row[index] = value;
            }
        } else {
            self.grid[index] = line;
        }
    }

    /// Slide/merge every line in `dir` on a private copy. `self` is untouched.
    ///
    /// ```
    /// use puzzle_2048::engine::{Board, Direction};
    /// let b = Board::from_rows(vec![vec![2, 2], vec![0, 4]]).unwrap();
    /// let out = b.shift(Direction::Left);
    /// assert!(out.changed);
    /// assert_eq!(out.board.cells(), vec![4, 0, 4, 0]);
    /// assert_eq!(b.cells(), vec![2, 2, 0, 4]);
    /// ```
    pub fn shift(&self, dir: Direction) -> Shifted {
        let vertical = dir.is_vertical();
        let reverse = dir.is_reversed();
        let mut board = self.clone();
        let mut changed = false;
        for i in 0..self.size {
            let line = board.extract_line(i, vertical, reverse);
            let result = alter_one_line(&line);
            board.insert_line(&result.line, i, vertical, reverse);
            changed |= result.changed;
        }
        Shifted { board, changed }
    }

    /// True if shifting in `dir` would change the board.
    #[inline]
    pub fn valid_move(&self, dir: Direction) -> bool {
        self.shift(dir).changed
    }

    /// True if at least one direction is a valid move.
    pub fn has_valid_move(&self) -> bool {
        Direction::ALL.iter().any(|&dir| self.valid_move(dir))
    }

    /// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
    ///
    /// Returns false, leaving the board as is, when no cell is empty.
    ///
    /// ```
    /// use puzzle_2048::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let mut b = Board::new(4).unwrap();
    /// assert!(b.new_tile(&mut rng));
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    pub fn new_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let empty: Vec<(usize, usize)> = self
            .grid
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().filter(|(_, &v)| v == 0).map(move |(c, _)| (r, c)))
            .collect();
        if empty.is_empty() {
            return false;
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        self.grid[row][col] = generate_random_tile(rng);
        true
    }

    /// Convenience: like `new_tile` but uses the thread-local RNG.
    pub fn new_tile_thread(&mut self) -> bool {
        let mut rng = rand::thread_rng();
        self.new_tile(&mut rng)
    }

    /// Builder form of `new_tile`, handy for seeding a fresh board.
    ///
    /// ```
    /// use puzzle_2048::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let b = Board::new(4).unwrap().with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.new_tile(rng);
        self
    }

    /// True when the board is full and no two neighbours in either axis match.
    pub fn game_over(&self) -> bool {
        if self.count_empty() > 0 {
            return false;
        }
        for i in 0..self.size {
            for j in 0..self.size - 1 {
                if self.grid[i][j] == self.grid[i][j + 1] {
                    return false;
                }
                if self.grid[j][i] == self.grid[j + 1][i] {
                    return false;
                }
            }
        }
        true
    }

    /// Count the number of empty cells on the board.
    pub fn count_empty(&self) -> usize {
        self.grid.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Highest tile value present, 0 for an empty board.
    pub fn highest_tile(&self) -> Tile {
        self.grid.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values. Merging conserves it; spawning adds 2 or 4.
    pub fn tile_sum(&self) -> Tile {
        self.grid.iter().flatten().sum()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{}, {:?})", self.size, self.size, self.grid)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row.iter().map(format_val).collect();
            write!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

/// Parses the `Display` form: one row per line, `-` or `0` for empty cells.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.split_whitespace().map(parse_val).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Board::from_rows(rows)?)
    }
}

/// Merge `line` toward index 0 with standard 2048 rules.
///
/// Zeros are compacted away, then adjacent equal tiles combine once each
/// (no cascading), and the result is right-padded with zeros. `changed`
/// is set when any merge happened or the output differs from the input.
///
/// ```
/// use puzzle_2048::engine::alter_one_line;
/// let out = alter_one_line(&[2, 2, 2, 2]);
/// assert_eq!(out.line, vec![4, 4, 0, 0]);
/// assert!(out.changed);
/// assert!(!alter_one_line(&[2, 4, 2, 4]).changed);
/// ```
pub fn alter_one_line(line: &[Tile]) -> LineShift {
    let compacted: Vec<Tile> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut merged = false;
    let mut result = Vec::with_capacity(line.len());
    let mut i = 0;
    while i < compacted.len() {
        if i + 1 < compacted.len() && compacted[i] == compacted[i + 1] {
            // cannot overflow for lines taken from a `Board`: the total caps every tile (see MAX_TILE)
            result.push(compacted[i] * 2);
            merged = true;
            i += 2;
        } else {
            result.push(compacted[i]);
            i += 1;
        }
    }
    result.resize(line.len(), 0);
    let changed = merged || result.as_slice() != line;
    LineShift { line: result, changed }
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: &Board, direction: Direction) -> Shifted {
    board.shift(direction)
}

pub fn valid_move(board: &Board, direction: Direction) -> bool {
    board.valid_move(direction)
}

/// True when the board is full with no matching neighbours.
pub fn is_game_over(board: &Board) -> bool {
    board.game_over()
}

/// Count the number of zero tiles.
pub fn count_empty(board: &Board) -> usize {
    board.count_empty()
}

/// Insert a random 2 (90%) or 4 (10%) tile using thread-local RNG.
///
/// For reproducible behavior, prefer `Board::new_tile(&mut impl Rng)`.
pub fn insert_random_tile(mut board: Board) -> Board {
    board.new_tile_thread();
    board
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

#[inline]
fn is_tile_value(value: Tile) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("-"),
        x => x.to_string(),
    }
}

fn parse_val(token: &str) -> Result<Tile, ParseError> {
    match token {
        "-" => Ok(0),
        t => Ok(t.parse::<Tile>()?),
    }
}
