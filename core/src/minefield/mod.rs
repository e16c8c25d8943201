use serde::{Deserialize, Serialize};

use crate::*;

pub use cell::*;
pub use engine::*;
pub use generator::*;
pub use layout::*;

mod cell;
mod engine;
mod generator;
mod layout;

/// Rows and columns of the standard board.
pub const GRID_SIZE: Coord = 16;

/// Mines on the standard board.
pub const MINE_COUNT: CellCount = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinefieldConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl MinefieldConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for MinefieldConfig {
    fn default() -> Self {
        Self::new_unchecked((GRID_SIZE, GRID_SIZE), MINE_COUNT)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sixteen_square_with_forty_mines() {
        let config = MinefieldConfig::default();

        assert_eq!(config.size, (16, 16));
        assert_eq!(config.mines, 40);
        assert_eq!(config.safe_cells(), 216);
    }

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(MinefieldConfig::new((0, 4), 1), Err(GameError::InvalidSize));
    }

    #[test]
    fn config_rejects_more_mines_than_cells() {
        assert_eq!(MinefieldConfig::new((3, 3), 10), Err(GameError::TooManyMines));
        assert!(MinefieldConfig::new((3, 3), 9).is_ok());
    }
}
