use super::word::Orientation;

/// The letter stored in a cell that holds no letter.
pub const EMPTY_LETTER: char = ' ';

/// A single square of a board.
///
/// A cell may belong to at most one across word and one down word. When it
/// belongs to both, it is a crossing and its letter is shared by the two words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    /// The letter in this cell, or [`EMPTY_LETTER`].
    pub letter: char,
    /// Whether an across word passes through this cell.
    pub in_across: bool,
    /// Whether a down word passes through this cell.
    pub in_down: bool,
    /// Clue number assigned by downstream numbering, `0` when unnumbered.
    pub word_number: u32,
    /// Set once puzzle placement finishes, distinguishing required letters
    /// from letters added later by coating.
    pub is_puzzle_cell: bool,
}

impl Cell {
    /// Creates an empty cell at the given coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            letter: EMPTY_LETTER,
            in_across: false,
            in_down: false,
            word_number: 0,
            is_puzzle_cell: false,
        }
    }

    /// Row of this cell.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column of this cell.
    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns `true` if the cell holds no letter.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letter == EMPTY_LETTER
    }

    /// Returns `true` if the cell is shared by an across and a down word.
    #[inline]
    pub fn is_crossing(&self) -> bool {
        self.in_across && self.in_down
    }

    /// Returns whether a word of the given orientation passes through this cell.
    #[inline]
    pub fn is_in(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Across => self.in_across,
            Orientation::Down => self.in_down,
        }
    }

    /// Returns `true` if the cell belongs to exactly one word.
    #[inline]
    pub fn in_single_word(&self) -> bool {
        self.in_across != self.in_down
    }

    pub(crate) fn mark(&mut self, orientation: Orientation) {
        match orientation {
            Orientation::Across => self.in_across = true,
            Orientation::Down => self.in_down = true,
        }
    }
}
