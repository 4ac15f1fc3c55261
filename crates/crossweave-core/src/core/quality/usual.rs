use super::measure::{MeasureId, QualityMeasure};
use super::neediness::{DEFAULT_VIRGIN_FACTOR, crossing_neediness};
use crate::core::models::board::Board;
use crate::core::models::word::Orientation;
use std::ops::{Add, AddAssign};

/// Weights and parameters of the usual quality measure.
///
/// A weight of `0.0` disables its term entirely; the term is then not computed.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityWeights {
    /// Rewards the total length of all placed words.
    pub word_lengths: f64,
    /// Penalizes pending words longer than the longest empty run on the board.
    pub pending_lengths: f64,
    /// Rewards cells shared by an across and a down word.
    pub crossed_cells: f64,
    /// Rewards empty room on either side of letters that could still be crossed.
    pub full_span: f64,
    /// Like `full_span`, but only counts room balanced on both sides.
    pub sym_span: f64,
    /// Penalizes single-word cells whose perpendicular neighbors are filled.
    pub surrounded_cells: f64,
    /// When `true`, a cell counts as surrounded only if both perpendicular
    /// neighbors are filled; otherwise either one suffices.
    pub surrounded_requires_both: bool,
    /// Penalizes words by their total crossing neediness.
    pub need_crossings: f64,
    /// Penalizes words lying near a grid edge.
    pub favour_centre: f64,
    /// Penalty by distance from the nearest parallel edge: index 0 applies to
    /// words on the edge row/column, index 1 one step in, and so on.
    pub edge_penalties: Vec<f64>,
    /// Added to a word's crossing count when computing neediness.
    pub virgin_factor: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            word_lengths: 1.0,
            pending_lengths: 1.0,
            crossed_cells: 2.0,
            full_span: 0.0,
            sym_span: 0.25,
            surrounded_cells: 0.5,
            surrounded_requires_both: false,
            need_crossings: 0.05,
            favour_centre: 0.5,
            edge_penalties: vec![1.0],
            virgin_factor: DEFAULT_VIRGIN_FACTOR,
        }
    }
}

/// Weighted per-term contributions of one quality evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QualityBreakdown {
    pub word_lengths: f64,
    pub pending_lengths: f64,
    pub crossed_cells: f64,
    pub full_span: f64,
    pub sym_span: f64,
    pub surrounded_cells: f64,
    pub need_crossings: f64,
    pub favour_centre: f64,
}

impl QualityBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.word_lengths
            + self.pending_lengths
            + self.crossed_cells
            + self.full_span
            + self.sym_span
            + self.surrounded_cells
            + self.need_crossings
            + self.favour_centre
    }
}

impl Add for QualityBreakdown {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            word_lengths: self.word_lengths + rhs.word_lengths,
            pending_lengths: self.pending_lengths + rhs.pending_lengths,
            crossed_cells: self.crossed_cells + rhs.crossed_cells,
            full_span: self.full_span + rhs.full_span,
            sym_span: self.sym_span + rhs.sym_span,
            surrounded_cells: self.surrounded_cells + rhs.surrounded_cells,
            need_crossings: self.need_crossings + rhs.need_crossings,
            favour_centre: self.favour_centre + rhs.favour_centre,
        }
    }
}

impl AddAssign for QualityBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// The standard multi-term quality measure.
#[derive(Debug, Clone)]
pub struct UsualQualityMeasure {
    id: MeasureId,
    weights: QualityWeights,
}

impl UsualQualityMeasure {
    pub fn new(weights: QualityWeights) -> Self {
        Self {
            id: MeasureId::next(),
            weights,
        }
    }

    pub fn weights(&self) -> &QualityWeights {
        &self.weights
    }

    /// Evaluates every enabled term and returns the weighted contributions.
    pub fn breakdown(&self, board: &Board) -> QualityBreakdown {
        let w = &self.weights;
        let mut out = QualityBreakdown::default();

        if w.word_lengths != 0.0 {
            out.word_lengths = w.word_lengths * word_lengths(board) as f64;
        }
        if w.pending_lengths != 0.0 {
            out.pending_lengths = -w.pending_lengths * stranded_lengths(board) as f64;
        }
        if w.crossed_cells != 0.0 {
            out.crossed_cells = w.crossed_cells * board.crossed_cell_count() as f64;
        }
        if w.full_span != 0.0 || w.sym_span != 0.0 {
            let (full, sym) = span_room(board);
            out.full_span = w.full_span * full as f64;
            out.sym_span = w.sym_span * sym as f64;
        }
        if w.surrounded_cells != 0.0 {
            out.surrounded_cells =
                -w.surrounded_cells * surrounded_cells(board, w.surrounded_requires_both) as f64;
        }
        if w.need_crossings != 0.0 {
            let neediness: f64 = board
                .placed_words()
                .iter()
                .map(|word| crossing_neediness(board, word, w.virgin_factor))
                .sum();
            out.need_crossings = -w.need_crossings * neediness;
        }
        if w.favour_centre != 0.0 {
            out.favour_centre = -w.favour_centre * edge_penalty(board, &w.edge_penalties);
        }

        out
    }

    /// Term-by-term sum of [`breakdown`](Self::breakdown) over `boards`.
    pub fn summed_breakdown<'a>(
        &self,
        boards: impl IntoIterator<Item = &'a Board>,
    ) -> QualityBreakdown {
        let mut sum = QualityBreakdown::default();
        for board in boards {
            sum += self.breakdown(board);
        }
        sum
    }
}

impl Default for UsualQualityMeasure {
    fn default() -> Self {
        Self::new(QualityWeights::default())
    }
}

impl QualityMeasure for UsualQualityMeasure {
    fn id(&self) -> MeasureId {
        self.id
    }

    fn evaluate(&self, board: &Board) -> f64 {
        self.breakdown(board).total()
    }
}

fn word_lengths(board: &Board) -> usize {
    board.placed_words().iter().map(|w| w.len()).sum()
}

/// Total length of pending words that no longer fit the longest empty run.
fn stranded_lengths(board: &Board) -> usize {
    let gap = board.longest_gap_length();
    board
        .pending_words()
        .iter()
        .map(String::len)
        .filter(|&len| len > gap)
        .sum()
}

/// Scores the empty room around letters that a future word could still cross.
///
/// For every filled cell not yet covered in a line's direction, the empty runs
/// immediately before and after it along that line are measured. The full
/// score is the span those runs allow; the symmetric score only counts room
/// present on both sides. Both are capped at the longest pending word, so
/// nothing is rewarded once every puzzle word is placed.
fn span_room(board: &Board) -> (usize, usize) {
    let cap = board.pending_words().last().map_or(0, String::len);
    if cap == 0 {
        return (0, 0);
    }

    let mut full = 0;
    let mut sym = 0;
    for orientation in Orientation::ALL {
        let (lines, length) = match orientation {
            Orientation::Across => (board.rows(), board.cols()),
            Orientation::Down => (board.cols(), board.rows()),
        };
        let at = |line: usize, pos: usize| match orientation {
            Orientation::Across => board.cell(line, pos),
            Orientation::Down => board.cell(pos, line),
        };

        for line in 0..lines {
            for pos in 0..length {
                let cell = at(line, pos);
                if cell.is_empty() || cell.is_in(orientation) {
                    continue;
                }
                let before = (0..pos).rev().take_while(|&p| at(line, p).is_empty()).count();
                let after = (pos + 1..length)
                    .take_while(|&p| at(line, p).is_empty())
                    .count();
                if before + after == 0 {
                    continue;
                }
                full += (before + after + 1).min(cap);
                let balanced = before.min(after);
                if balanced > 0 {
                    sym += (2 * balanced + 1).min(cap);
                }
            }
        }
    }
    (full, sym)
}

/// Counts single-word cells running flush against filled perpendicular neighbors.
fn surrounded_cells(board: &Board, requires_both: bool) -> usize {
    board
        .cells()
        .filter(|cell| cell.in_single_word())
        .filter(|cell| {
            let (row, col) = (cell.row(), cell.col());
            let neighbors = if cell.in_across {
                [row.checked_sub(1).map(|r| (r, col)), Some((row + 1, col))]
            } else {
                [col.checked_sub(1).map(|c| (row, c)), Some((row, col + 1))]
            };
            let filled = neighbors
                .into_iter()
                .flatten()
                .filter(|&(r, c)| board.get(r, c).is_some_and(|n| !n.is_empty()))
                .count();
            if requires_both { filled == 2 } else { filled >= 1 }
        })
        .count()
}

/// Sum of configured penalties for words close to the parallel grid edges.
fn edge_penalty(board: &Board, penalties: &[f64]) -> f64 {
    board
        .placed_words()
        .iter()
        .filter_map(|word| {
            let (position, extent) = match word.orientation {
                Orientation::Across => (word.row, board.rows()),
                Orientation::Down => (word.col, board.cols()),
            };
            let distance = position.min(extent - 1 - position);
            penalties.get(distance).copied()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::words::WordIndex;
    use std::sync::Arc;

    fn only(configure: impl FnOnce(&mut QualityWeights)) -> UsualQualityMeasure {
        let mut weights = QualityWeights {
            word_lengths: 0.0,
            pending_lengths: 0.0,
            crossed_cells: 0.0,
            full_span: 0.0,
            sym_span: 0.0,
            surrounded_cells: 0.0,
            surrounded_requires_both: false,
            need_crossings: 0.0,
            favour_centre: 0.0,
            edge_penalties: vec![],
            virgin_factor: DEFAULT_VIRGIN_FACTOR,
        };
        configure(&mut weights);
        UsualQualityMeasure::new(weights)
    }

    fn board(rows: usize, cols: usize, words: &[&str]) -> Board {
        Board::new(rows, cols, Arc::new(WordIndex::new(words.iter().copied())))
    }

    #[test]
    fn word_lengths_sums_placed_word_lengths() {
        let measure = only(|w| w.word_lengths = 1.0);
        let mut b = board(5, 5, &["CAT", "CARD"]);
        b.place("CAT", 0, 0, Orientation::Across, true);
        b.place("CARD", 0, 0, Orientation::Down, true);
        assert_eq!(measure.evaluate(&b), 7.0);
    }

    #[test]
    fn pending_lengths_penalizes_only_stranded_words() {
        let measure = only(|w| w.pending_lengths = 1.0);
        let mut b = board(3, 3, &["CAT", "ACE", "EWE"]);
        b.place("CAT", 1, 0, Orientation::Across, true);
        // rows 0 and 2 are still fully empty
        assert_eq!(b.longest_gap_length(), 3);
        assert_eq!(measure.evaluate(&b), 0.0);

        b.place("ACE", 0, 0, Orientation::Down, true);
        // rows 0 and 2 now have runs of 2, columns 1 and 2 runs of 1
        assert_eq!(b.longest_gap_length(), 2);
        assert_eq!(measure.evaluate(&b), -3.0);
    }

    #[test]
    fn crossed_cells_counts_shared_cells() {
        let measure = only(|w| w.crossed_cells = 2.0);
        let mut b = board(5, 5, &["CAT", "CARD", "TOE"]);
        b.place("CAT", 0, 0, Orientation::Across, true);
        b.place("CARD", 0, 0, Orientation::Down, true);
        b.place("TOE", 0, 2, Orientation::Down, true);
        assert_eq!(measure.evaluate(&b), 4.0);
    }

    #[test]
    fn span_terms_reward_room_around_crossable_letters() {
        let full = only(|w| w.full_span = 1.0);
        let sym = only(|w| w.sym_span = 1.0);
        let mut b = board(1, 5, &["A", "HELLO"]);
        b.place("A", 0, 2, Orientation::Down, true);
        // the A sits mid-row with two empty cells on each side; cap is 5
        assert_eq!(full.evaluate(&b), 5.0);
        assert_eq!(sym.evaluate(&b), 5.0);

        let mut edge = board(1, 5, &["A", "HELLO"]);
        edge.place("A", 0, 0, Orientation::Down, true);
        assert_eq!(full.evaluate(&edge), 5.0);
        assert_eq!(sym.evaluate(&edge), 0.0);
    }

    #[test]
    fn span_terms_vanish_without_pending_words() {
        let full = only(|w| w.full_span = 1.0);
        let mut b = board(1, 5, &["A"]);
        b.place("A", 0, 2, Orientation::Down, true);
        assert_eq!(full.evaluate(&b), 0.0);
    }

    #[test]
    fn surrounded_cells_respects_the_either_or_both_flag() {
        let either = only(|w| w.surrounded_cells = 1.0);
        let both = only(|w| {
            w.surrounded_cells = 1.0;
            w.surrounded_requires_both = true;
        });
        let mut b = board(3, 3, &["CAT", "DOG", "EEL"]);
        b.place("CAT", 0, 0, Orientation::Across, true);
        b.place("DOG", 1, 0, Orientation::Across, true);
        // every letter of both words has a filled neighbor above or below
        assert_eq!(either.evaluate(&b), -6.0);
        assert_eq!(both.evaluate(&b), 0.0);

        b.place("EEL", 2, 0, Orientation::Across, true);
        // the middle row is now flanked on both sides
        assert_eq!(both.evaluate(&b), -3.0);
    }

    #[test]
    fn need_crossings_is_negative_total_neediness() {
        let measure = only(|w| w.need_crossings = 1.0);
        let mut b = board(5, 5, &["CAT"]);
        b.place("CAT", 0, 0, Orientation::Across, true);
        let expected = -crossing_neediness(&b, &b.placed_words()[0], DEFAULT_VIRGIN_FACTOR);
        assert!((measure.evaluate(&b) - expected).abs() < 1e-9);
    }

    #[test]
    fn favour_centre_penalizes_words_near_edges() {
        let measure = only(|w| {
            w.favour_centre = 1.0;
            w.edge_penalties = vec![3.0, 1.0];
        });
        let mut b = board(5, 5, &["CAT", "DOG", "EEL"]);
        b.place("CAT", 0, 0, Orientation::Across, true);
        b.place("DOG", 3, 0, Orientation::Across, true);
        b.place("EEL", 2, 0, Orientation::Across, true);
        // row 0 costs 3, row 3 is one step from the bottom and costs 1
        assert_eq!(measure.evaluate(&b), -4.0);
    }

    #[test]
    fn breakdown_total_matches_evaluate() {
        let measure = UsualQualityMeasure::default();
        let mut b = board(5, 5, &["CAT", "CARD", "GOAT"]);
        b.place("CARD", 1, 0, Orientation::Across, true);
        b.place("CAT", 1, 0, Orientation::Down, true);
        let breakdown = measure.breakdown(&b);
        assert_eq!(breakdown.total(), measure.evaluate(&b));
        assert!(breakdown.word_lengths > 0.0);
        assert!(breakdown.need_crossings < 0.0);
    }

    #[test]
    fn breakdowns_add_termwise() {
        let a = QualityBreakdown {
            word_lengths: 1.0,
            crossed_cells: 2.0,
            ..Default::default()
        };
        let mut b = QualityBreakdown {
            word_lengths: 3.0,
            need_crossings: -1.0,
            ..Default::default()
        };
        b += a;
        assert_eq!(b.word_lengths, 4.0);
        assert_eq!(b.total(), 5.0);
    }

    #[test]
    fn summed_breakdown_totals_the_per_board_qualities() {
        let measure = UsualQualityMeasure::default();
        let mut first = board(5, 5, &["CAT", "CARD"]);
        first.place("CARD", 1, 0, Orientation::Across, true);
        let mut second = board(5, 5, &["CAT", "CARD"]);
        second.place("CAT", 0, 0, Orientation::Down, true);
        second.place("CARD", 0, 0, Orientation::Across, true);

        let sum = measure.summed_breakdown([&first, &second]);
        let expected = measure.evaluate(&first) + measure.evaluate(&second);
        assert!((sum.total() - expected).abs() < 1e-9);
        assert_eq!(
            sum.word_lengths,
            measure.breakdown(&first).word_lengths + measure.breakdown(&second).word_lengths
        );
        assert_eq!(measure.summed_breakdown(std::iter::empty()), QualityBreakdown::default());
    }
}
