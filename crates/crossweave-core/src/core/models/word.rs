use std::fmt;

/// The direction in which a word runs through the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Orientation {
    /// Both orientations, across first.
    pub const ALL: [Orientation; 2] = [Orientation::Across, Orientation::Down];

    /// Returns the perpendicular orientation.
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Across => Orientation::Down,
            Orientation::Down => Orientation::Across,
        }
    }

    /// Returns the `(row, col)` step taken between consecutive letters.
    #[inline]
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Across => (0, 1),
            Orientation::Down => (1, 0),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Across => write!(f, "across"),
            Orientation::Down => write!(f, "down"),
        }
    }
}

/// A word that has been written into a board.
///
/// Placed words are immutable values: once a word is on a board it is never
/// moved or removed. The board keeps them in placement order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedWord {
    /// The word text, upper-cased.
    pub text: String,
    /// Row of the first letter.
    pub row: usize,
    /// Column of the first letter.
    pub col: usize,
    /// Direction the word runs in.
    pub orientation: Orientation,
    /// `true` for a required puzzle word, `false` for a coat word added to fill space.
    pub is_puzzle: bool,
}

impl PlacedWord {
    /// Number of letters in the word.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the word has no letters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the grid coordinate of the letter at `offset`.
    #[inline]
    pub fn cell_at(&self, offset: usize) -> (usize, usize) {
        let (dr, dc) = self.orientation.step();
        (self.row + dr * offset, self.col + dc * offset)
    }

    /// Iterates over `(offset, row, col, letter)` for each letter of the word.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize, char)> + '_ {
        self.text.chars().enumerate().map(move |(offset, letter)| {
            let (row, col) = self.cell_at(offset);
            (offset, row, col, letter)
        })
    }
}

impl fmt::Display for PlacedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) {}{}",
            self.text,
            self.row,
            self.col,
            self.orientation,
            if self.is_puzzle { "" } else { " [coat]" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, row: usize, col: usize, orientation: Orientation) -> PlacedWord {
        PlacedWord {
            text: text.to_string(),
            row,
            col,
            orientation,
            is_puzzle: true,
        }
    }

    #[test]
    fn perpendicular_swaps_orientation() {
        assert_eq!(Orientation::Across.perpendicular(), Orientation::Down);
        assert_eq!(Orientation::Down.perpendicular(), Orientation::Across);
    }

    #[test]
    fn cells_walk_along_the_orientation() {
        let across = word("CAT", 2, 1, Orientation::Across);
        let coords: Vec<_> = across.cells().map(|(_, r, c, l)| (r, c, l)).collect();
        assert_eq!(coords, vec![(2, 1, 'C'), (2, 2, 'A'), (2, 3, 'T')]);

        let down = word("DOG", 0, 4, Orientation::Down);
        let coords: Vec<_> = down.cells().map(|(_, r, c, l)| (r, c, l)).collect();
        assert_eq!(coords, vec![(0, 4, 'D'), (1, 4, 'O'), (2, 4, 'G')]);
    }

    #[test]
    fn display_marks_coat_words() {
        let mut coat = word("EEL", 0, 0, Orientation::Down);
        coat.is_puzzle = false;
        assert_eq!(coat.to_string(), "EEL (0, 0) down [coat]");
        assert_eq!(word("EEL", 1, 2, Orientation::Across).to_string(), "EEL (1, 2) across");
    }
}
