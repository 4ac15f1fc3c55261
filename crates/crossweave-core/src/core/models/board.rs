use super::cell::Cell;
use super::retention::{ChildRetentionPolicy, RetainedChildren, ScoredBoard};
use super::word::{Orientation, PlacedWord};
use crate::core::index::words::WordIndex;
use crate::core::quality::measure::{MeasureId, QualityMeasure};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::warn;

/// A rectangular grid of cells together with the words placed on it.
///
/// A board starts empty and grows one word at a time. During the search a
/// board is never mutated after it has been scored: each new placement is
/// made on a deep copy of the parent, so every board is an independent value.
///
/// # Invariants
///
/// - Every filled cell's letter agrees with every word passing through it.
/// - A cell belongs to at most one across word and one down word.
/// - Hard edges are recorded immediately before and after every placed word,
///   so no later word may run through the boundary between two collinear words.
///
/// Derived values (signature, pending words, longest gap, quality) are memoized
/// and all cleared together in [`Board::place`], the only mutation path.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cell storage.
    cells: Vec<Cell>,
    /// Hard edges between horizontally adjacent cells, `rows * (cols + 1)`.
    ///
    /// Entry `row * (cols + 1) + col` is the boundary just left of `(row, col)`.
    across_edges: Vec<bool>,
    /// Hard edges between vertically adjacent cells, `(rows + 1) * cols`.
    ///
    /// Entry `row * cols + col` is the boundary just above `(row, col)`.
    down_edges: Vec<bool>,
    /// Words in placement order.
    placed: Vec<PlacedWord>,
    /// Number of times each word text has been placed.
    placed_counts: HashMap<String, usize>,
    /// The puzzle word set this board is being built for.
    words: Arc<WordIndex>,
    signature: OnceLock<String>,
    pending: OnceLock<Vec<String>>,
    longest_gap: OnceLock<usize>,
    quality: Option<(MeasureId, f64)>,
    children: RetainedChildren,
}

impl Board {
    /// Creates an empty board of the given size for a puzzle word set.
    pub fn new(rows: usize, cols: usize, words: Arc<WordIndex>) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect();
        Self {
            rows,
            cols,
            cells,
            across_edges: vec![false; rows * (cols + 1)],
            down_edges: vec![false; (rows + 1) * cols],
            placed: Vec::new(),
            placed_counts: HashMap::new(),
            words,
            signature: OnceLock::new(),
            pending: OnceLock::new(),
            longest_gap: OnceLock::new(),
            quality: None,
            children: RetainedChildren::default(),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cell(row, col))
        } else {
            None
        }
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Words placed so far, in placement order.
    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// Returns `true` if a word with this text has already been placed.
    pub fn contains_word(&self, text: &str) -> bool {
        self.placed_counts.contains_key(text)
    }

    /// The puzzle word set this board is built for.
    pub fn word_index(&self) -> &Arc<WordIndex> {
        &self.words
    }

    /// Returns whether a hard edge sits on the boundary just before `(row, col)`
    /// in the given orientation.
    ///
    /// For [`Orientation::Across`] that is the boundary to the left of the cell
    /// (`col` may equal `cols`, the right border); for [`Orientation::Down`] the
    /// boundary above it (`row` may equal `rows`).
    pub fn hard_edge(&self, orientation: Orientation, row: usize, col: usize) -> bool {
        match orientation {
            Orientation::Across => self.across_edges[row * (self.cols + 1) + col],
            Orientation::Down => self.down_edges[row * self.cols + col],
        }
    }

    /// Checks whether `word` can be written starting at `(row, col)`.
    ///
    /// A placement is valid when the word lies inside the grid, every letter
    /// lands on an empty cell or a cell already holding the same letter, no
    /// covered cell already belongs to a word of the same orientation, and no
    /// boundary strictly inside the word's span is a hard edge.
    pub fn is_placeable(&self, word: &str, row: usize, col: usize, orientation: Orientation) -> bool {
        let length = word.len();
        if length == 0 {
            return false;
        }
        let fits = match orientation {
            Orientation::Across => row < self.rows && col + length <= self.cols,
            Orientation::Down => col < self.cols && row + length <= self.rows,
        };
        if !fits {
            return false;
        }

        let (dr, dc) = orientation.step();
        for (offset, letter) in word.chars().enumerate() {
            let (r, c) = (row + dr * offset, col + dc * offset);
            let cell = self.cell(r, c);
            if cell.is_in(orientation) {
                return false;
            }
            if !cell.is_empty() && cell.letter != letter {
                return false;
            }
            if offset > 0 && self.hard_edge(orientation, r, c) {
                return false;
            }
        }
        true
    }

    /// Writes `word` onto the board and records it in the placed-word ledger.
    ///
    /// Hard edges are set immediately before and after the word's span, and
    /// all memoized values are cleared.
    ///
    /// # Panics
    ///
    /// Panics if [`Board::is_placeable`] does not hold for this placement. The
    /// search only places words it has already checked, so a failure here is a
    /// logic fault rather than a recoverable condition.
    pub fn place(
        &mut self,
        word: &str,
        row: usize,
        col: usize,
        orientation: Orientation,
        is_puzzle: bool,
    ) -> PlacedWord {
        assert!(
            self.is_placeable(word, row, col, orientation),
            "invalid placement of '{word}' at ({row}, {col}) {orientation}"
        );

        if self.contains_word(word) {
            warn!(word, "Word placed more than once on the same board.");
        }

        let placed = PlacedWord {
            text: word.to_string(),
            row,
            col,
            orientation,
            is_puzzle,
        };

        let cols = self.cols;
        for (_, r, c, letter) in placed.cells() {
            let cell = &mut self.cells[r * cols + c];
            cell.letter = letter;
            cell.mark(orientation);
        }

        let (end_row, end_col) = placed.cell_at(placed.len());
        match orientation {
            Orientation::Across => {
                self.across_edges[row * (cols + 1) + col] = true;
                self.across_edges[end_row * (cols + 1) + end_col] = true;
            }
            Orientation::Down => {
                self.down_edges[row * cols + col] = true;
                self.down_edges[end_row * cols + end_col] = true;
            }
        }

        *self.placed_counts.entry(placed.text.clone()).or_insert(0) += 1;
        self.placed.push(placed.clone());
        self.invalidate();
        placed
    }

    fn invalidate(&mut self) {
        self.signature.take();
        self.pending.take();
        self.longest_gap.take();
        self.quality = None;
    }

    /// Canonical string over all cells, used as an exact-duplicate key.
    ///
    /// Each cell contributes two characters: its letter and a marker for
    /// across-only (`-`), down-only (`|`) or crossing (`+`). Empty cells are `..`.
    /// Two boards holding the same letters with the same crossing pattern share
    /// a signature regardless of the order their words were placed in.
    pub fn signature(&self) -> &str {
        self.signature.get_or_init(|| {
            let mut signature = String::with_capacity(self.cells.len() * 2);
            for cell in &self.cells {
                if cell.is_empty() {
                    signature.push_str("..");
                    continue;
                }
                signature.push(cell.letter);
                signature.push(match (cell.in_across, cell.in_down) {
                    (true, true) => '+',
                    (true, false) => '-',
                    _ => '|',
                });
            }
            signature
        })
    }

    /// Required words not yet placed, shortest first.
    ///
    /// A word listed `n` times in the puzzle word set stays pending until it
    /// has been placed `n` times as a puzzle word.
    pub fn pending_words(&self) -> &[String] {
        self.pending.get_or_init(|| {
            let mut placed: HashMap<&str, usize> = HashMap::new();
            for word in self.placed.iter().filter(|w| w.is_puzzle) {
                *placed.entry(word.text.as_str()).or_insert(0) += 1;
            }
            self.words
                .shortest_first()
                .filter(|word| match placed.get_mut(word) {
                    Some(count) if *count > 0 => {
                        *count -= 1;
                        false
                    }
                    _ => true,
                })
                .map(str::to_string)
                .collect()
        })
    }

    /// Length of the longest run of empty cells in any row or column.
    pub fn longest_gap_length(&self) -> usize {
        *self.longest_gap.get_or_init(|| {
            let mut longest = 0;
            for row in 0..self.rows {
                let mut run = 0;
                for col in 0..self.cols {
                    run = if self.cell(row, col).is_empty() { run + 1 } else { 0 };
                    longest = longest.max(run);
                }
            }
            for col in 0..self.cols {
                let mut run = 0;
                for row in 0..self.rows {
                    run = if self.cell(row, col).is_empty() { run + 1 } else { 0 };
                    longest = longest.max(run);
                }
            }
            longest
        })
    }

    /// Quality of this board under `measure`, computed at most once per measure.
    pub fn quality(&mut self, measure: &dyn QualityMeasure) -> f64 {
        let id = measure.id();
        match self.quality {
            Some((cached_id, value)) if cached_id == id => value,
            _ => {
                let value = measure.evaluate(self);
                self.quality = Some((id, value));
                value
            }
        }
    }

    /// The memoized quality, if it was last computed under `measure`.
    pub fn cached_quality(&self, measure: &dyn QualityMeasure) -> Option<f64> {
        self.quality
            .filter(|(id, _)| *id == measure.id())
            .map(|(_, value)| value)
    }

    /// Scores `candidate` and keeps it among this board's retained children if
    /// `policy` accepts it.
    pub fn offer_child(
        &mut self,
        mut candidate: Board,
        measure: &dyn QualityMeasure,
        policy: &dyn ChildRetentionPolicy,
    ) {
        let quality = candidate.quality(measure);
        policy.offer(
            &mut self.children.0,
            ScoredBoard {
                board: candidate,
                quality,
            },
        );
    }

    /// Removes and returns the retained children, best first.
    pub fn take_children(&mut self) -> Vec<ScoredBoard> {
        std::mem::take(&mut self.children.0)
    }

    /// Returns whether the letter at `offset` of `word` is shared with a
    /// perpendicular word.
    pub fn is_crossed(&self, word: &PlacedWord, offset: usize) -> bool {
        let (row, col) = word.cell_at(offset);
        self.cell(row, col).is_in(word.orientation.perpendicular())
    }

    /// Number of letters of `word` shared with perpendicular words.
    pub fn crossing_count(&self, word: &PlacedWord) -> usize {
        (0..word.len()).filter(|&i| self.is_crossed(word, i)).count()
    }

    /// Number of cells that belong to both an across and a down word.
    pub fn crossed_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_crossing()).count()
    }

    /// Flags every filled cell as a puzzle cell.
    ///
    /// Called once puzzle placement is complete, before coating adds letters.
    pub fn mark_puzzle_complete(&mut self) {
        for cell in &mut self.cells {
            if !cell.is_empty() {
                cell.is_puzzle_cell = true;
            }
        }
    }

    /// Renders the grid one row per line, `.` marking empty cells.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cell(row, col);
                out.push(if cell.is_empty() { '.' } else { cell.letter });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
