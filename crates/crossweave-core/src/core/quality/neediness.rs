use crate::core::models::board::Board;
use crate::core::models::word::PlacedWord;

/// Default value added to a word's crossing count before dividing.
pub const DEFAULT_VIRGIN_FACTOR: f64 = 0.1;

/// How urgently a placed word needs more crossings.
///
/// Each uncrossed letter contributes `2 * remaining / length`, where
/// `remaining` counts the letters from that position to the end of the word.
/// The sum is scaled by the word length and divided by
/// `crossings + virgin_factor`, so a word with no crossings at all scores an
/// order of magnitude above one with a single crossing.
pub fn crossing_neediness(board: &Board, word: &PlacedWord, virgin_factor: f64) -> f64 {
    let length = word.len();
    if length == 0 {
        return 0.0;
    }
    let length_f = length as f64;

    let mut uncrossed = 0.0;
    let mut crossings = 0usize;
    for offset in 0..length {
        if board.is_crossed(word, offset) {
            crossings += 1;
        } else {
            let remaining = (length - offset) as f64;
            uncrossed += 2.0 * remaining / length_f;
        }
    }

    uncrossed * length_f / (crossings as f64 + virgin_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::words::WordIndex;
    use crate::core::models::word::Orientation;
    use std::sync::Arc;

    fn board_with_cat() -> Board {
        let mut board = Board::new(5, 5, Arc::new(WordIndex::new(["CAT", "ART", "TOE"])));
        board.place("CAT", 0, 0, Orientation::Across, true);
        board
    }

    #[test]
    fn uncrossed_word_divides_by_the_virgin_factor() {
        let board = board_with_cat();
        let cat = &board.placed_words()[0];
        // 2 * (3 + 2 + 1) / 3 = 4, times length 3 = 12, over 0.1
        let score = crossing_neediness(&board, cat, 0.1);
        assert!((score - 120.0).abs() < 1e-9);
    }

    #[test]
    fn each_crossing_strictly_reduces_neediness() {
        let mut board = board_with_cat();
        let before = crossing_neediness(&board, &board.placed_words()[0], 0.1);

        board.place("ART", 0, 1, Orientation::Down, true);
        let once = crossing_neediness(&board, &board.placed_words()[0], 0.1);
        assert!(once < before);

        board.place("TOE", 0, 2, Orientation::Down, true);
        let twice = crossing_neediness(&board, &board.placed_words()[0], 0.1);
        assert!(twice < once);
    }

    #[test]
    fn fully_crossed_word_scores_zero() {
        let mut board = Board::new(3, 3, Arc::new(WordIndex::new(["AB", "A", "B"])));
        board.place("AB", 0, 0, Orientation::Across, true);
        board.place("A", 0, 0, Orientation::Down, true);
        board.place("B", 0, 1, Orientation::Down, true);
        assert_eq!(crossing_neediness(&board, &board.placed_words()[0], 0.1), 0.0);
    }
}
