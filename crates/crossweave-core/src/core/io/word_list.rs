use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("Word list '{path}' contains no words", path = path.display())]
    Empty { path: PathBuf },
}

/// Reads a plain-text word list.
///
/// One word per line. Surrounding whitespace is trimmed, blank lines and lines
/// starting with `#` are skipped, and words are upper-cased. Order is kept.
///
/// # Errors
///
/// Returns [`WordListError::Read`] if a line cannot be read.
pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<String>, WordListError> {
    let mut words = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| WordListError::Read {
            line: idx + 1,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        words.push(trimmed.to_uppercase());
    }
    Ok(words)
}

/// Reads a word list from a file, rejecting files with no words.
///
/// # Errors
///
/// Returns [`WordListError::Io`] if the file cannot be opened or read, and
/// [`WordListError::Empty`] if it holds no words.
pub fn read_from_path(path: &Path) -> Result<Vec<String>, WordListError> {
    let file = File::open(path).map_err(|source| WordListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let words = read_from(&mut BufReader::new(file)).map_err(|e| match e {
        WordListError::Read { source, .. } => WordListError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    if words.is_empty() {
        return Err(WordListError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(words)
}
