use glam::{Mat4, Vec3};

/// Depth at which cell quads are drawn.
pub const CELL_Z: f32 = 0.2;

/// Fixed perspective camera looking down -z at a grid centered on the origin.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    fov_y: f32,
    near: f32,
    far: f32,
    distance: f32,
}

impl Camera {
    /// Places the camera three grid widths away, with the far plane at the same distance.
    pub fn for_grid(size: usize) -> Self {
        let distance = size as f32 * 3.0;
        Self {
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: distance,
            distance,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Combined view-projection for a `width` x `height` surface.
    pub fn view_proj(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        self.projection(aspect) * self.view()
    }
}
