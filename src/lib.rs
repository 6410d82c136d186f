//! Toroidal Conway's Game of Life on a fixed square grid.

pub mod engine;
pub mod grid;
pub mod layout;
pub mod seed;

pub use engine::{GameOfLife, UpdateMode};
pub use grid::{GRID_SIZE, Grid};
pub use layout::Layout;
pub use seed::SeedMode;
