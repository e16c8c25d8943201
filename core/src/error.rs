use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board dimensions must be non-zero")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Deal needs more cards than the deck holds")]
    NotEnoughCards,
    #[error("Tableau needs at least one column")]
    InvalidColumn,
    #[error("Tableau breaks the face-down prefix or card identity rules")]
    InvalidTableau,
}

pub type Result<T> = core::result::Result<T, GameError>;
