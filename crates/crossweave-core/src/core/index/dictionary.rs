use std::collections::{HashMap, HashSet};

/// A dictionary word paired with the offset of a particular letter in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub offset: usize,
}

/// Static index of the coating dictionary.
///
/// Keyed by `(letter, length)`. Each key maps to every dictionary word of that
/// length together with an offset where the letter occurs; a word in which
/// the letter appears twice is listed twice, once per offset.
#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
    buckets: HashMap<(char, usize), Vec<Candidate>>,
    word_count: usize,
    max_length: usize,
}

impl DictionaryIndex {
    /// Builds the index from a word list.
    ///
    /// Words are trimmed and upper-cased. Words containing anything other than
    /// ASCII letters, and repeated words, are skipped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets: HashMap<(char, usize), Vec<Candidate>> = HashMap::new();
        let mut seen = HashSet::new();
        let mut max_length = 0;

        for raw in words {
            let word = raw.as_ref().trim().to_uppercase();
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            if !seen.insert(word.clone()) {
                continue;
            }
            let length = word.len();
            max_length = max_length.max(length);
            for (offset, letter) in word.chars().enumerate() {
                buckets
                    .entry((letter, length))
                    .or_default()
                    .push(Candidate {
                        word: word.clone(),
                        offset,
                    });
            }
        }

        Self {
            buckets,
            word_count: seen.len(),
            max_length,
        }
    }

    /// All dictionary words of `length` letters containing `letter`, with the
    /// offset of each occurrence.
    pub fn candidates(&self, letter: char, length: usize) -> &[Candidate] {
        self.buckets
            .get(&(letter, length))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct words indexed.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Length of the longest indexed word.
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}
