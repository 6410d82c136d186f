/// Side length of the reference world.
pub const GRID_SIZE: usize = 51;

/// Offsets of the 8 cells surrounding a cell, as `(d_row, d_col)`.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Maps an index that is at most one step outside `[0, size)` back onto the torus.
///
/// `-1` becomes `size - 1`, anything `>= size` becomes `0`, everything else is
/// returned unchanged.
#[inline]
pub fn wrap(index: isize, size: usize) -> usize {
    if index < 0 {
        size - 1
    } else if index as usize >= size {
        0
    } else {
        index as usize
    }
}

/// A square boolean world with toroidal edges.
///
/// Cells are addressed as `(row, col)`, `row` being the first storage index.
/// The size is fixed for the lifetime of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a `size` x `size` grid with every cell dead.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be non-zero");
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size, "cell out of bounds");
        row * self.size + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.offset(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let i = self.offset(row, col);
        self.cells[i] = alive;
    }

    /// Counts the live cells among the 8 wrapped neighbors of `(row, col)`.
    pub fn live_neighbors(&self, row: usize, col: usize) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| {
                let r = wrap(row as isize + dr, self.size);
                let c = wrap(col as isize + dc, self.size);
                self.get(r, c)
            })
            .count()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterates every cell as `(row, col, alive)` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (i / size, i % size, alive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_maps_edges_onto_torus() {
        for size in [1usize, 2, 5, GRID_SIZE] {
            assert_eq!(wrap(-1, size), size - 1);
            assert_eq!(wrap(size as isize, size), 0);
            for i in 0..size {
                assert_eq!(wrap(i as isize, size), i);
            }
            for i in -1..=size as isize {
                assert!(wrap(i, size) < size);
            }
        }
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(GRID_SIZE);

        assert_eq!(grid.size(), GRID_SIZE);
        assert_eq!(grid.alive_count(), 0);
        assert!(grid.iter().all(|(_, _, alive)| !alive));
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = Grid::new(4);
        grid.set(1, 2, true);
        grid.set(3, 3, true);

        grid.clear();

        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn corner_is_neighbor_across_edges() {
        let n = GRID_SIZE;
        let mut grid = Grid::new(n);
        grid.set(0, 0, true);

        assert_eq!(grid.live_neighbors(n - 1, 0), 1);
        assert_eq!(grid.live_neighbors(0, n - 1), 1);
        assert_eq!(grid.live_neighbors(n - 1, n - 1), 1);
        assert_eq!(grid.live_neighbors(n / 2, n / 2), 0);
    }

    #[test]
    fn live_neighbors_excludes_self() {
        let mut grid = Grid::new(5);
        for row in 1..4 {
            for col in 1..4 {
                grid.set(row, col, true);
            }
        }

        assert_eq!(grid.live_neighbors(2, 2), 8);
        assert_eq!(grid.live_neighbors(1, 1), 3);
    }

    #[test]
    fn iter_visits_storage_order() {
        let mut grid = Grid::new(3);
        grid.set(2, 1, true);

        let alive: Vec<_> = grid
            .iter()
            .filter(|&(_, _, alive)| alive)
            .map(|(row, col, _)| (row, col))
            .collect();
        assert_eq!(alive, vec![(2, 1)]);
        assert_eq!(grid.iter().count(), 9);
    }
}
