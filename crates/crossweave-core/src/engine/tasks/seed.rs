use crate::core::index::words::WordIndex;
use crate::core::models::board::Board;
use crate::core::models::word::Orientation;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Picks the word most likely to be crossed by the others.
///
/// Scores each word by [`WordIndex::crossability`]; the first word with the
/// highest score wins ties.
pub fn choose_anchor(words: &WordIndex) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for word in words.words() {
        let score = words.crossability(word);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((word, score));
        }
    }
    best.map(|(word, _)| word)
}

/// Generates one single-word board per valid placement of the anchor word.
///
/// Across placements are generated at every row and starting column. Down
/// placements are added only on non-square grids; on a square grid they are
/// transposes of the across ones.
#[instrument(skip_all, name = "seed_task")]
pub fn run(words: &Arc<WordIndex>, rows: usize, cols: usize) -> Vec<Board> {
    let Some(anchor) = choose_anchor(words) else {
        return Vec::new();
    };
    info!(anchor, crossability = words.crossability(anchor), "Anchor word chosen.");

    let empty = Board::new(rows, cols, Arc::clone(words));
    let mut orientations = vec![Orientation::Across];
    if rows != cols {
        orientations.push(Orientation::Down);
    }

    let mut seeds = Vec::new();
    for orientation in orientations {
        for row in 0..rows {
            for col in 0..cols {
                if empty.is_placeable(anchor, row, col, orientation) {
                    let mut board = empty.clone();
                    board.place(anchor, row, col, orientation, true);
                    seeds.push(board);
                }
            }
        }
    }

    debug!("Generated {} seed boards.", seeds.len());
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(words: &[&str]) -> Arc<WordIndex> {
        Arc::new(WordIndex::new(words.iter().copied()))
    }

    #[test]
    fn anchor_is_the_most_crossable_word() {
        let words = index(&["CAT", "DOG", "CARD", "GOAT"]);
        // G, O, A and T each occur in at least one other word
        assert_eq!(choose_anchor(&words), Some("GOAT"));
    }

    #[test]
    fn first_word_wins_crossability_ties() {
        let words = index(&["AB", "BA"]);
        assert_eq!(choose_anchor(&words), Some("AB"));
    }

    #[test]
    fn empty_index_has_no_anchor() {
        assert_eq!(choose_anchor(&WordIndex::default()), None);
        assert!(run(&Arc::new(WordIndex::default()), 3, 3).is_empty());
    }

    #[test]
    fn square_grid_seeds_only_across_placements() {
        let seeds = run(&index(&["CAT"]), 5, 5);
        // 5 rows x 3 starting columns
        assert_eq!(seeds.len(), 15);
        for seed in &seeds {
            assert_eq!(seed.placed_words().len(), 1);
            assert_eq!(seed.placed_words()[0].orientation, Orientation::Across);
        }
    }

    #[test]
    fn non_square_grid_also_seeds_down_placements() {
        let seeds = run(&index(&["CAT"]), 4, 3);
        let across = seeds
            .iter()
            .filter(|b| b.placed_words()[0].orientation == Orientation::Across)
            .count();
        let down = seeds.len() - across;
        assert_eq!(across, 4);
        assert_eq!(down, 2 * 3);
    }

    #[test]
    fn word_longer_than_the_columns_is_seeded_down() {
        let seeds = run(&index(&["GOAT"]), 5, 3);
        assert!(!seeds.is_empty());
        assert!(
            seeds
                .iter()
                .all(|b| b.placed_words()[0].orientation == Orientation::Down)
        );
    }
}
