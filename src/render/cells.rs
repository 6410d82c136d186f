use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use quadlife::{Grid, Layout};
use wgpu::util::DeviceExt;

use super::camera::CELL_Z;
use super::gpu::Gpu;

pub const ALIVE_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
pub const DEAD_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit quad centered on its origin.
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [-0.5, -0.5] }, // bottom left
    QuadVertex { corner: [0.5, -0.5] },  // bottom right
    QuadVertex { corner: [0.5, 0.5] },   // top right
    QuadVertex { corner: [-0.5, 0.5] },  // top left
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 3, 0, 2];

/// Per-cell transform and color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CellInstance {
    offset: [f32; 3],
    color: [f32; 4],
}

impl CellInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x3, // offset
        2 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CellInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Fills `out` with one instance per cell.
///
/// Cell `(row, col)` of `grid` is drawn at `layout.position(row, col)`.
pub fn build_instances(grid: &Grid, layout: &Layout, out: &mut Vec<CellInstance>) {
    debug_assert_eq!(grid.size(), layout.size(), "layout does not match grid");
    out.clear();
    out.extend(grid.iter().map(|(row, col, alive)| {
        let [x, y] = layout.position(row, col);
        CellInstance {
            offset: [x, y, CELL_Z],
            color: if alive { ALIVE_COLOR } else { DEAD_COLOR },
        }
    }));
}

/// Draws the grid as instanced quads sharing one mesh.
pub struct CellRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    camera_ubo: wgpu::Buffer,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    instance_vbo: wgpu::Buffer,
    instances: Vec<CellInstance>,
}

impl CellRenderer {
    /// Creates the pipeline and buffers for a grid of `cell_count` cells.
    pub fn new(gpu: &Gpu, cell_count: usize) -> Self {
        let device = gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quadlife cell shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cell.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("quadlife camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quadlife cell pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quadlife cell pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), CellInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // all quads share one depth
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let camera_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quadlife camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadlife camera bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadlife quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadlife quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        // grid size never changes, so the instance buffer is allocated once
        let instance_vbo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quadlife cell instance vbo"),
            size: (cell_count * std::mem::size_of::<CellInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            bind_group,
            camera_ubo,
            quad_vbo,
            quad_ibo,
            instance_vbo,
            instances: Vec::with_capacity(cell_count),
        }
    }

    /// Uploads the camera and the current state of every cell.
    pub fn prepare(&mut self, queue: &wgpu::Queue, view_proj: Mat4, grid: &Grid, layout: &Layout) {
        let camera = CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
        };
        queue.write_buffer(&self.camera_ubo, 0, bytemuck::bytes_of(&camera));

        build_instances(grid, layout, &mut self.instances);
        queue.write_buffer(&self.instance_vbo, 0, bytemuck::cast_slice(&self.instances));
    }

    /// Clears `view` and draws every prepared cell.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quadlife cell pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, self.instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.instances.len() as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instances_follow_layout_and_state() {
        let mut grid = Grid::new(3);
        grid.set(2, 0, true);
        let layout = Layout::new(3);
        let mut out = Vec::new();

        build_instances(&grid, &layout, &mut out);

        assert_eq!(out.len(), 9);
        // storage order: (2, 0) is the 7th cell
        assert_eq!(
            out[6],
            CellInstance {
                offset: [0.5, -1.5, CELL_Z],
                color: ALIVE_COLOR,
            }
        );
        assert_eq!(out.iter().filter(|c| c.color == ALIVE_COLOR).count(), 1);
        assert!(out.iter().all(|c| c.offset[2] == CELL_Z));
    }

    #[test]
    fn instances_are_rebuilt_not_appended() {
        let grid = Grid::new(2);
        let layout = Layout::new(2);
        let mut out = Vec::new();

        build_instances(&grid, &layout, &mut out);
        build_instances(&grid, &layout, &mut out);

        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|c| c.color == DEAD_COLOR));
    }

    #[test]
    fn quad_indices_stay_in_range() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }
}
