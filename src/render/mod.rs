//! GPU side of the window frontend.
//!
//! One quad mesh is uploaded once and drawn per cell with an instance
//! carrying the cell's position and color.

mod camera;
mod cells;
mod gpu;

pub use camera::Camera;
pub use cells::CellRenderer;
pub use gpu::{Gpu, GpuInit, SurfaceErrorAction};
