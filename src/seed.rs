use crate::grid::Grid;

/// Row period of the seed pattern.
const ROW_PERIOD: usize = 5;
/// Column period of the seed pattern.
const COL_PERIOD: usize = 3;

/// How the initial generation is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Every pattern cell is alive.
    #[default]
    Pattern,
    /// Every pattern cell is alive with probability 1/2.
    Random,
}

impl SeedMode {
    fn fill_cell<R: rand::Rng>(&self, row: usize, col: usize, rng: &mut R) -> bool {
        if !is_pattern_cell(row, col) {
            return false;
        }
        match self {
            Self::Pattern => true,
            Self::Random => rng.random_bool(0.5),
        }
    }
}

/// Returns whether `(row, col)` belongs to the repeating seed pattern.
#[inline]
pub fn is_pattern_cell(row: usize, col: usize) -> bool {
    row % ROW_PERIOD == 0 && col % COL_PERIOD == 0
}

/// Seeds `grid` once. Cells outside the pattern are left untouched.
///
/// `rng` is only drawn from in [`SeedMode::Random`].
pub fn seed<R: rand::Rng>(grid: &mut Grid, mode: SeedMode, rng: &mut R) {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if mode.fill_cell(row, col, rng) {
                grid.set(row, col, true);
            }
        }
    }
}
