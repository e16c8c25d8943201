use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Nothing revealed yet; mines may still be re-placed by the first reveal.
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Ready | Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// When the mines of a game are fixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Mines are placed again on the first reveal, clear of the clicked cell's 3x3 block.
    Deferred { seed: u64 },
    Fixed,
}

/// Minesweeper board and its play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    layout: MineLayout,
    board: Array2<EngineCell>,
    placement: Placement,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl Minefield {
    /// Starts a game whose real mine placement happens on the first reveal.
    pub fn new(config: MinefieldConfig, seed: u64) -> Self {
        let layout = RandomMinefieldGenerator::new(seed, None).generate(config);
        Self::with_placement(layout, Placement::Deferred { seed })
    }

    /// Plays a fixed layout; the first reveal may hit a mine.
    pub fn from_layout(layout: MineLayout) -> Self {
        Self::with_placement(layout, Placement::Fixed)
    }

    fn with_placement(layout: MineLayout, placement: Placement) -> Self {
        let size = layout.size();
        Self {
            layout,
            board: Array2::default(size.to_nd_index()),
            placement,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: EngineState::default(),
            triggered_mine: None,
        }
    }

    /// Throws the board away and deals a fresh game of the same size.
    pub fn reset(&mut self, seed: u64) {
        log::debug!("New minefield game, seed {}", seed);
        *self = Self::new(self.config(), seed);
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> MinefieldConfig {
        self.layout.config()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Mines minus flags; negative once the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.layout.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        let coords = self.layout.validate_coords(coords).ok()?;
        let cell = self.board[coords.to_nd_index()];
        let is_mine = self.layout.contains_mine(coords);

        Some(CellView {
            is_mine,
            is_revealed: cell == EngineCell::Revealed,
            is_flagged: cell == EngineCell::Flagged,
            adjacent_mines: if is_mine {
                0
            } else {
                self.layout.adjacent_mine_count(coords)
            },
        })
    }

    /// Row-major cell views for drawing the whole board.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        let (rows, cols) = self.size();
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .filter_map(move |coords| Some((coords, self.cell_at(coords)?)))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use EngineCell::*;
        use MarkOutcome::*;

        let Ok(coords) = self.layout.validate_coords(coords) else {
            return NoChange;
        };
        if !self.state.is_playing() {
            return NoChange;
        }

        match self.board[coords.to_nd_index()] {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                log::trace!("flag {:?}", coords);
                Changed
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                log::trace!("unflag {:?}", coords);
                Changed
            }
            Revealed => NoChange,
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Ok(coords) = self.layout.validate_coords(coords) else {
            return RevealOutcome::NoChange;
        };
        if !self.state.is_playing() || self.board[coords.to_nd_index()] != EngineCell::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.state.is_ready() {
            self.place_mines_for_first_reveal(coords);
        }

        if self.layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.show_all_mines();
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        self.flood_reveal(coords);

        if self.revealed_count == Saturating(self.layout.safe_cell_count()) {
            self.flag_all_mines();
            self.end_game(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    fn place_mines_for_first_reveal(&mut self, start: Coord2) {
        let Placement::Deferred { seed } = self.placement else {
            return;
        };

        log::debug!("Placing mines clear of first reveal at {:?}", start);
        let layout = RandomMinefieldGenerator::new(seed, Some(start)).generate(self.config());
        *self = Self::with_placement(layout, Placement::Fixed);
    }

    /// Breadth-first reveal from `start`; only zero cells spread to their neighbours.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut visited = BTreeSet::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }

            if self.board[coords.to_nd_index()] != EngineCell::Hidden {
                continue;
            }

            self.board[coords.to_nd_index()] = EngineCell::Revealed;
            self.revealed_count += 1;

            if self.layout.adjacent_mine_count(coords) == 0 {
                to_visit.extend(
                    self.layout
                        .iter_neighbors(coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::trace!(
            "reveal {:?} opened {} cells, {} safe cells revealed",
            start,
            visited.len(),
            self.revealed_count.0
        );
    }

    fn show_all_mines(&mut self) {
        for mine in self.layout.iter_mines() {
            let cell = &mut self.board[mine.to_nd_index()];
            if *cell == EngineCell::Flagged {
                self.flagged_count -= 1;
            }
            *cell = EngineCell::Revealed;
        }
    }

    fn flag_all_mines(&mut self) {
        for mine in self.layout.iter_mines() {
            let cell = &mut self.board[mine.to_nd_index()];
            if *cell == EngineCell::Hidden {
                *cell = EngineCell::Flagged;
                self.flagged_count += 1;
            }
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        if won {
            self.triggered_mine = None;
        }
        log::debug!("Minefield game over: {:?}", self.state);
    }
}
