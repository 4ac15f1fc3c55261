//! Plain-text input and output.
//!
//! Word lists are read one word per line; finished boards are written as a
//! letter grid followed by their placed words.

pub mod grid;
pub mod word_list;
