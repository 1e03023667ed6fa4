//! Terminal user interface for kb.

pub mod board;
