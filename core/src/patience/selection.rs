use serde::{Deserialize, Serialize};

use crate::*;

/// Run the player has picked up, waiting for a destination click.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Selected {
        column: usize,
        start: usize,
        len: usize,
    },
}

impl Selection {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether the card at `(column, index)` is part of the selected run.
    pub const fn contains(self, column: usize, index: usize) -> bool {
        match self {
            Self::None => false,
            Self::Selected {
                column: selected,
                start,
                len,
            } => selected == column && index >= start && index - start < len,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    Card { column: usize, index: usize },
    /// The empty space of a column, the only way to target an empty column.
    Column(usize),
}

impl Tableau {
    /// Two-click pick-up-and-drop gesture.
    ///
    /// With nothing selected a face-up card selects the run starting at it. With a run
    /// selected, clicking one of its cards drops the selection and any other click tries
    /// to move the run onto the clicked column; the selection is cleared either way.
    /// Face-down cards and clicks off the tableau are ignored.
    pub fn click(&mut self, selection: Selection, target: ClickTarget) -> (Selection, MoveOutcome) {
        if self.is_won() {
            return (Selection::None, MoveOutcome::NoChange);
        }

        let column = match target {
            ClickTarget::Card { column, index } => {
                let Some(card) = self.card(column, index) else {
                    return (selection, MoveOutcome::NoChange);
                };
                if !card.face_up {
                    return (selection, MoveOutcome::NoChange);
                }
                if selection.contains(column, index) {
                    log::trace!("deselect column {}", column);
                    return (Selection::None, MoveOutcome::NoChange);
                }
                if selection.is_empty() {
                    return (self.select_run(column, index), MoveOutcome::NoChange);
                }
                column
            }
            ClickTarget::Column(column) => {
                if selection.is_empty() || column >= self.columns().len() {
                    return (selection, MoveOutcome::NoChange);
                }
                column
            }
        };

        let Selection::Selected {
            column: from,
            start,
            ..
        } = selection
        else {
            return (selection, MoveOutcome::NoChange);
        };

        (Selection::None, self.move_run(from, column, start))
    }

    fn select_run(&self, column: usize, index: usize) -> Selection {
        let len = self.column(column).map_or(0, |cards| run_at(cards, index));
        log::trace!("select {} cards in column {} from {}", len, column, index);

        Selection::Selected {
            column,
            start: index,
            len,
        }
    }
}
