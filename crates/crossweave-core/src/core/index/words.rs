use std::collections::{BTreeMap, HashMap};

/// Static index over the required puzzle words of one search.
///
/// Built once per search and shared (behind an `Arc`) by every board the
/// search produces. Words keep their input order; duplicates are retained so
/// a word listed twice must be placed twice.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    /// Puzzle words, upper-cased, in input order.
    words: Vec<String>,
    /// Word indices grouped by exact word length.
    by_length: BTreeMap<usize, Vec<usize>>,
    /// Word indices ordered shortest-first, ties kept in input order.
    shortest_first: Vec<usize>,
    /// For each letter, every `(word index, letter offset)` where it occurs.
    occurrences: HashMap<char, Vec<(usize, usize)>>,
}

impl WordIndex {
    /// Builds an index over the given words.
    ///
    /// Words are trimmed and upper-cased; they are otherwise taken as given.
    /// Validation of lengths and characters belongs to the build workflow.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .collect();

        let mut by_length: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut occurrences: HashMap<char, Vec<(usize, usize)>> = HashMap::new();
        for (idx, word) in words.iter().enumerate() {
            by_length.entry(word.len()).or_default().push(idx);
            for (offset, letter) in word.chars().enumerate() {
                occurrences.entry(letter).or_default().push((idx, offset));
            }
        }

        let mut shortest_first: Vec<usize> = (0..words.len()).collect();
        shortest_first.sort_by_key(|&idx| words[idx].len());

        Self {
            words,
            by_length,
            shortest_first,
            occurrences,
        }
    }

    /// All puzzle words in input order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of puzzle words, counting duplicates.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Puzzle words ordered shortest-first.
    pub fn shortest_first(&self) -> impl Iterator<Item = &str> {
        self.shortest_first.iter().map(|&idx| self.words[idx].as_str())
    }

    /// Words of exactly `length` letters.
    pub fn words_of_length(&self, length: usize) -> impl Iterator<Item = &str> {
        self.by_length
            .get(&length)
            .into_iter()
            .flatten()
            .map(|&idx| self.words[idx].as_str())
    }

    /// Length of the longest puzzle word, `0` when empty.
    pub fn max_length(&self) -> usize {
        self.by_length.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of times `letter` occurs across all puzzle words.
    pub fn letter_frequency(&self, letter: char) -> usize {
        self.occurrences.get(&letter).map_or(0, Vec::len)
    }

    /// Every `(word, offset)` where `letter` occurs.
    pub fn occurrences_of(&self, letter: char) -> impl Iterator<Item = (&str, usize)> {
        self.occurrences
            .get(&letter)
            .into_iter()
            .flatten()
            .map(|&(idx, offset)| (self.words[idx].as_str(), offset))
    }

    /// Sum over the letters of `word` of each letter's global frequency.
    ///
    /// Words made of common letters score high and make good anchors, since
    /// later words are most likely to cross them.
    pub fn crossability(&self, word: &str) -> usize {
        word.chars().map(|letter| self.letter_frequency(letter)).sum()
    }
}
