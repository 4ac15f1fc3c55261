//! Stages of the grid search.
//!
//! Seeding places the anchor word everywhere it fits, fleshing grows those
//! boards one puzzle word per beam level, and coating fills the remaining
//! white space with dictionary words guided by the neediness queue.

pub mod coat;
pub mod flesh;
pub mod neediness_queue;
pub mod seed;
