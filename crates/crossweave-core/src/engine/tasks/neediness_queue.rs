use crate::core::models::board::Board;
use crate::core::quality::neediness::crossing_neediness;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedEntry {
    /// Index of the word in the board's placed-word list.
    pub word: usize,
    pub neediness: f64,
}

/// Puzzle words ordered by crossing neediness, neediest last.
///
/// Re-scoring a word moves only that entry to its new position.
#[derive(Debug, Clone, Default)]
pub struct NeedinessQueue {
    entries: Vec<NeedEntry>,
}

impl NeedinessQueue {
    /// Scores every puzzle word placed on `board`.
    pub fn new(board: &Board, virgin_factor: f64) -> Self {
        let mut entries: Vec<NeedEntry> = board
            .placed_words()
            .iter()
            .enumerate()
            .filter(|(_, word)| word.is_puzzle)
            .map(|(idx, word)| NeedEntry {
                word: idx,
                neediness: crossing_neediness(board, word, virgin_factor),
            })
            .collect();
        entries.sort_by(|a, b| a.neediness.total_cmp(&b.neediness));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn neediest(&self) -> Option<NeedEntry> {
        self.entries.last().copied()
    }

    /// Removes the neediest word for good.
    pub fn pop_neediest(&mut self) -> Option<NeedEntry> {
        self.entries.pop()
    }

    /// Updates the neediness of `word` and bubbles it into place.
    ///
    /// Returns `false` if the word is not queued.
    pub fn rescore(&mut self, word: usize, neediness: f64) -> bool {
        let Some(mut idx) = self.entries.iter().position(|e| e.word == word) else {
            return false;
        };
        self.entries[idx].neediness = neediness;

        while idx > 0 && self.entries[idx - 1].neediness > neediness {
            self.entries.swap(idx - 1, idx);
            idx -= 1;
        }
        while idx + 1 < self.entries.len() && self.entries[idx + 1].neediness < neediness {
            self.entries.swap(idx, idx + 1);
            idx += 1;
        }
        true
    }

    /// Queued entries, least needy first.
    pub fn entries(&self) -> &[NeedEntry] {
        &self.entries
    }
}
