use serde::{Deserialize, Serialize};

/// Player-visible state stored by the minefield engine.
///
/// A cell is never both revealed and flagged; the enum makes that unrepresentable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// Everything the renderer needs to draw one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}
