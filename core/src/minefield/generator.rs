use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

pub trait MinefieldGenerator {
    fn generate(self, config: MinefieldConfig) -> MineLayout;
}

/// Cells that must stay mine-free while placing mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SafeZone {
    Nothing,
    Cell(Coord2),
    Neighborhood(Coord2),
}

impl SafeZone {
    pub const fn excludes(self, coords: Coord2) -> bool {
        match self {
            Self::Nothing => false,
            Self::Cell(start) => start.0 == coords.0 && start.1 == coords.1,
            Self::Neighborhood(start) => {
                start.0.abs_diff(coords.0) <= 1 && start.1.abs_diff(coords.1) <= 1
            }
        }
    }
}

/// Purely random placement that keeps the 3x3 block around an optional start cell free
/// of mines, so the first click always opens a zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    exclude: Option<Coord2>,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, exclude: Option<Coord2>) -> Self {
        Self { seed, exclude }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: MinefieldConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_with_rng(config, self.exclude, &mut rng)
    }
}

/// Places `config.mines` mines by rejection sampling: draw a random cell and keep it
/// only when it holds no mine yet and lies outside the safe zone.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: MinefieldConfig,
    exclude: Option<Coord2>,
    rng: &mut R,
) -> MineLayout {
    let size = config.size;
    let total_cells = config.total_cells();

    let mines = if config.mines > total_cells {
        log::warn!(
            "Minefield already full, requested {} but only fits {}",
            config.mines,
            total_cells
        );
        total_cells
    } else {
        config.mines
    };

    let zone = safe_zone(size, mines, exclude);
    let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
    let mut mines_placed = 0;

    while mines_placed < mines {
        let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
        if mine_mask[coords.to_nd_index()] || zone.excludes(coords) {
            continue;
        }
        mine_mask[coords.to_nd_index()] = true;
        mines_placed += 1;
    }

    log::trace!(
        "Placed {} mines on {}x{} avoiding {:?}",
        mines_placed,
        size.0,
        size.1,
        zone
    );
    MineLayout::from_mine_mask(mine_mask)
}

fn safe_zone(size: Coord2, mines: CellCount, exclude: Option<Coord2>) -> SafeZone {
    let total_cells = mult(size.0, size.1);

    let Some(start) = exclude else {
        return SafeZone::Nothing;
    };

    if !in_bounds(start, size) {
        log::warn!("Start cell {:?} is off the board, placing mines anywhere", start);
        return SafeZone::Nothing;
    }

    let neighborhood = 1 + NeighborIter::new(start, size).count() as CellCount;
    if mines + neighborhood <= total_cells {
        SafeZone::Neighborhood(start)
    } else if mines < total_cells {
        log::warn!("Cannot keep the start neighborhood clear, fallback to a safe start cell");
        SafeZone::Cell(start)
    } else {
        log::warn!("Cannot make start cell safe, fallback to random");
        SafeZone::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_count(layout: &MineLayout, coords: Coord2) -> u8 {
        let (rows, cols) = layout.size();
        let mut count = 0;
        for row in 0..rows {
            for col in 0..cols {
                let is_neighbor = (row, col) != coords
                    && row.abs_diff(coords.0) <= 1
                    && col.abs_diff(coords.1) <= 1;
                if is_neighbor && layout.contains_mine((row, col)) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn places_exact_mine_count_for_many_seeds() {
        let config = MinefieldConfig::default();

        for seed in 0..200 {
            let layout = RandomMinefieldGenerator::new(seed, None).generate(config);
            assert_eq!(layout.mine_count(), MINE_COUNT, "seed {seed}");
            assert_eq!(layout.iter_mines().count(), usize::from(MINE_COUNT));
        }
    }

    #[test]
    fn adjacency_matches_brute_force() {
        let config = MinefieldConfig::default();

        for seed in 0..50 {
            let layout = RandomMinefieldGenerator::new(seed, Some((7, 7))).generate(config);
            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    if layout.contains_mine((row, col)) {
                        continue;
                    }
                    assert_eq!(
                        layout.adjacent_mine_count((row, col)),
                        brute_force_count(&layout, (row, col)),
                        "seed {seed} at ({row}, {col})"
                    );
                }
            }
        }
    }

    #[test]
    fn start_neighborhood_stays_clear() {
        let config = MinefieldConfig::default();

        for seed in 0..200 {
            let start = ((seed % 16) as Coord, (seed * 7 % 16) as Coord);
            let layout = RandomMinefieldGenerator::new(seed, Some(start)).generate(config);
            assert!(!layout.contains_mine(start));
            assert_eq!(layout.adjacent_mine_count(start), 0, "seed {seed}");
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = MinefieldConfig::default();
        let first = RandomMinefieldGenerator::new(42, Some((3, 3))).generate(config);
        let second = RandomMinefieldGenerator::new(42, Some((3, 3))).generate(config);

        assert_eq!(first, second);
    }

    #[test]
    fn crowded_board_falls_back_to_safe_cell() {
        // 8 mines on 3x3 leave room for the clicked cell only
        let config = MinefieldConfig::new((3, 3), 8).unwrap();
        let layout = RandomMinefieldGenerator::new(7, Some((1, 1))).generate(config);

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 1)));
    }

    #[test]
    fn full_board_ignores_exclusion() {
        let config = MinefieldConfig::new((2, 2), 4).unwrap();
        let layout = RandomMinefieldGenerator::new(1, Some((0, 0))).generate(config);

        assert_eq!(layout.mine_count(), 4);
    }

    #[test]
    fn safe_zone_neighborhood_covers_three_by_three() {
        let zone = SafeZone::Neighborhood((1, 1));

        assert!(zone.excludes((0, 0)));
        assert!(zone.excludes((2, 2)));
        assert!(!zone.excludes((3, 1)));
    }
}
