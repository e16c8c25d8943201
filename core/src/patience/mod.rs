use alloc::vec::Vec;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

pub use card::*;
pub use deck::*;
pub use hint::*;
pub use selection::*;
pub use tableau::*;

mod card;
mod deck;
mod hint;
mod selection;
mod tableau;

/// Standard decks merged into one Spider shoe.
pub const DECK_COUNT: u8 = 2;

/// Cards in one standard deck.
pub const DECK_SIZE: usize = 52;

/// Length of a King-to-Ace run, the unit retired to a foundation.
pub const RUN_LENGTH: usize = KING as usize;

/// Opening deal: four columns of six, then six columns of five.
pub const SPIDER_DEAL: [usize; 10] = [6, 6, 6, 6, 5, 5, 5, 5, 5, 5];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatienceConfig {
    decks: u8,
    column_heights: Vec<usize>,
}

impl PatienceConfig {
    pub fn new(decks: u8, column_heights: Vec<usize>) -> Result<Self> {
        if decks == 0 {
            return Err(GameError::NotEnoughCards);
        }
        if column_heights.is_empty() {
            return Err(GameError::InvalidColumn);
        }
        let dealt: usize = column_heights.iter().sum();
        if dealt > usize::from(decks) * DECK_SIZE {
            return Err(GameError::NotEnoughCards);
        }
        Ok(Self {
            decks,
            column_heights,
        })
    }

    pub fn decks(&self) -> u8 {
        self.decks
    }

    pub fn column_heights(&self) -> &[usize] {
        &self.column_heights
    }

    pub fn total_cards(&self) -> usize {
        usize::from(self.decks) * DECK_SIZE
    }
}

impl Default for PatienceConfig {
    fn default() -> Self {
        Self {
            decks: DECK_COUNT,
            column_heights: SPIDER_DEAL.to_vec(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    NoChange,
    Moved,
    CompletedRun(Suit),
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl BitOr for MoveOutcome {
    type Output = MoveOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use MoveOutcome::*;
        match (self, rhs) {
            (Won, _) | (_, Won) => Won,
            (CompletedRun(suit), _) | (_, CompletedRun(suit)) => CompletedRun(suit),
            (Moved, _) | (_, Moved) => Moved,
            (NoChange, NoChange) => NoChange,
        }
    }
}
