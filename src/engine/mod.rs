mod rule;

use crate::grid::Grid;

/// How a generation is computed from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Read generation G from one grid and write G+1 into another, then swap.
    #[default]
    Buffered,
    /// Single-buffer pass over the interior cells using [`step`].
    ///
    /// Cells updated earlier in the pass are seen by later ones, so the result
    /// depends on visit order and differs from a true Life generation. Border
    /// cells are never written.
    Legacy,
}

/// Computes the next state of `(row, col)` without modifying `grid`.
#[inline]
pub fn next_state(grid: &Grid, row: usize, col: usize) -> bool {
    rule::next_state(grid.get(row, col), grid.live_neighbors(row, col))
}

/// Advances a single cell in place and returns its new state.
///
/// The cell that is read and written is the storage cell `(col, row)`, i.e.
/// transposed relative to the `(row, col)` the layout draws at. Neighbor
/// counting is column-major, layout is row-major.
pub fn step(grid: &mut Grid, row: usize, col: usize) -> bool {
    let next = next_state(grid, col, row);
    grid.set(col, row, next);
    next
}

#[derive(Debug)]
pub struct GameOfLife {
    grid: Grid,
    back: Grid,
    mode: UpdateMode,
    generation: u64,
}

impl GameOfLife {
    pub fn new(grid: Grid, mode: UpdateMode) -> Self {
        let back = Grid::new(grid.size());
        Self {
            grid,
            back,
            mode,
            generation: 0,
        }
    }

    pub fn next_generation(&mut self) {
        match self.mode {
            UpdateMode::Buffered => self.next_generation_buffered(),
            UpdateMode::Legacy => self.next_generation_legacy(),
        }
        self.generation += 1;
    }

    fn next_generation_buffered(&mut self) {
        for (row, col, _) in self.grid.iter() {
            self.back.set(row, col, next_state(&self.grid, row, col));
        }
        std::mem::swap(&mut self.grid, &mut self.back);
    }

    fn next_generation_legacy(&mut self) {
        let last = self.grid.size().saturating_sub(1);
        for row in 1..last {
            for col in 1..last {
                step(&mut self.grid, row, col);
            }
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Number of generations computed since construction.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{self, SeedMode};
    use rand::{SeedableRng, rngs::StdRng};

    fn grid_with(size: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(size);
        for &(row, col) in alive {
            grid.set(row, col, true);
        }
        grid
    }

    fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
        grid.iter()
            .filter(|&(_, _, alive)| alive)
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    #[test]
    fn step_applies_rule_with_wrapped_neighbors() {
        let n = 7;
        // every neighbor of (0, 0) lies across an edge except three
        let neighbors = [
            (n - 1, n - 1),
            (n - 1, 0),
            (n - 1, 1),
            (0, n - 1),
            (0, 1),
            (1, n - 1),
            (1, 0),
            (1, 1),
        ];

        for count in 0..=8 {
            for alive in [false, true] {
                let mut grid = grid_with(n, &neighbors[..count]);
                grid.set(0, 0, alive);

                let next = step(&mut grid, 0, 0);

                let expected = matches!((alive, count), (true, 2) | (_, 3));
                assert_eq!(next, expected, "alive={alive} neighbors={count}");
                assert_eq!(grid.get(0, 0), expected);
            }
        }
    }

    #[test]
    fn step_touches_transposed_cell() {
        let mut grid = grid_with(6, &[(1, 4), (4, 1)]);

        let next = step(&mut grid, 1, 4);

        assert!(!next);
        assert!(!grid.get(4, 1), "storage cell (col, row) should be updated");
        assert!(grid.get(1, 4), "storage cell (row, col) should be untouched");
    }

    #[test]
    fn buffered_blinker_oscillates() {
        let horizontal = vec![(3, 2), (3, 3), (3, 4)];
        let vertical = vec![(2, 3), (3, 3), (4, 3)];
        let mut game = GameOfLife::new(grid_with(7, &horizontal), UpdateMode::Buffered);

        game.next_generation();
        assert_eq!(alive_cells(game.grid()), vertical);

        game.next_generation();
        assert_eq!(alive_cells(game.grid()), horizontal);
        assert_eq!(game.generation(), 2);
    }

    #[test]
    fn buffered_glider_wraps_around_torus() {
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let start = grid_with(8, &glider);
        let mut game = GameOfLife::new(start.clone(), UpdateMode::Buffered);

        // a glider moves one cell diagonally every 4 generations
        for _ in 0..4 * 8 {
            game.next_generation();
            assert_eq!(game.alive_count(), glider.len());
        }

        assert_eq!(game.grid(), &start);
    }

    #[test]
    fn legacy_pass_is_order_dependent() {
        let blinker = [(3, 2), (3, 3), (3, 4)];
        let mut legacy = GameOfLife::new(grid_with(7, &blinker), UpdateMode::Legacy);
        let mut buffered = GameOfLife::new(grid_with(7, &blinker), UpdateMode::Buffered);

        legacy.next_generation();
        buffered.next_generation();

        assert!(alive_cells(legacy.grid()).is_empty());
        assert_eq!(alive_cells(buffered.grid()), vec![(2, 3), (3, 3), (4, 3)]);
    }

    #[test]
    fn legacy_pass_never_writes_border() {
        let n = 9;
        let mut grid = Grid::new(n);
        for i in 0..n {
            grid.set(0, i, true);
            grid.set(n - 1, i, true);
            grid.set(i, 0, true);
            grid.set(i, n - 1, true);
        }
        let mut game = GameOfLife::new(grid, UpdateMode::Legacy);

        for _ in 0..5 {
            game.next_generation();
        }

        let grid = game.grid();
        for i in 0..n {
            assert!(grid.get(0, i) && grid.get(n - 1, i));
            assert!(grid.get(i, 0) && grid.get(i, n - 1));
        }
    }

    #[test]
    fn generations_are_deterministic() {
        for mode in [UpdateMode::Buffered, UpdateMode::Legacy] {
            let make = || {
                let mut grid = Grid::new(crate::GRID_SIZE);
                seed::seed(&mut grid, SeedMode::Random, &mut StdRng::seed_from_u64(7));
                GameOfLife::new(grid, mode)
            };
            let mut a = make();
            let mut b = make();

            for _ in 0..20 {
                a.next_generation();
                b.next_generation();
            }

            assert_eq!(a.grid(), b.grid(), "{mode:?} diverged");
        }
    }
}
