//! Game-state engines behind the portfolio's two embedded board games.
//!
//! [`Minefield`] is the Minesweeper board and [`Tableau`] is the Spider patience
//! layout. Both are plain owned values: every action mutates the value in place and
//! reports an outcome, with a `NoChange` outcome (and an untouched board) for anything
//! illegal. A presentation layer clones a board when it wants a snapshot.

#![no_std]

extern crate alloc;

pub use error::*;
pub use minefield::*;
pub use patience::*;
pub use types::*;

mod error;
mod minefield;
mod patience;
mod types;
