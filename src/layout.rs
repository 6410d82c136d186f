/// Static table of cell positions in world units.
///
/// Cells are one unit apart, starting at `-size / 2` on both axes so the grid
/// sits around the origin. The first grid index maps to x and the second to y.
#[derive(Debug, Clone)]
pub struct Layout {
    size: usize,
    positions: Vec<[f32; 2]>,
}

impl Layout {
    /// Distance between neighboring cell centers.
    pub const SPACING: f32 = 1.0;

    pub fn new(size: usize) -> Self {
        let origin = -(size as f32) / 2.0;
        let mut positions = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                positions.push([
                    origin + row as f32 * Self::SPACING,
                    origin + col as f32 * Self::SPACING,
                ]);
            }
        }
        Self { size, positions }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn position(&self, row: usize, col: usize) -> [f32; 2] {
        self.positions[row * self.size + col]
    }
}
