//! Static lookup structures built once before a search starts.
//!
//! - [`words`] indexes the required puzzle words by length and by letter.
//! - [`dictionary`] indexes the coating dictionary by `(letter, length)`.

pub mod dictionary;
pub mod words;
