use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
    pub start: usize,
}

/// Index where the movable run on top of `column` begins: the lowest face-up card
/// whose run reaches the top of the column.
fn movable_run_start(column: &[Card]) -> Option<usize> {
    let top = column.len().checked_sub(1)?;
    let first_face_up = column
        .iter()
        .rposition(|card| !card.face_up)
        .map_or(0, |face_down| face_down + 1);

    (first_face_up..=top).find(|&start| run_at(column, start) == column.len() - start)
}

/// First legal move found by scanning source columns left to right and, for each,
/// target columns left to right. The scan order is part of the contract: the same
/// tableau always yields the same hint.
pub fn find_move(tableau: &Tableau) -> Option<Move> {
    if tableau.is_won() {
        return None;
    }

    let columns = tableau.columns();
    for (from, source) in columns.iter().enumerate() {
        let Some(start) = movable_run_start(source) else {
            continue;
        };
        let card = source[start];

        let target = columns
            .iter()
            .enumerate()
            .find(|&(to, target)| to != from && can_stack(target.last().copied(), card));
        if let Some((to, _)) = target {
            return Some(Move { from, to, start });
        }
    }

    None
}

impl Tableau {
    pub fn find_move(&self) -> Option<Move> {
        find_move(self)
    }

    /// Plays the hinted move, if any.
    pub fn play_hint(&mut self) -> MoveOutcome {
        match find_move(self) {
            Some(hint) => {
                log::debug!("Hint: {:?}", hint);
                self.move_run(hint.from, hint.to, hint.start)
            }
            None => MoveOutcome::NoChange,
        }
    }
}
