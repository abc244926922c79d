//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `shader.wgsl` locations 0 (position) and 1 (color)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const STAR: [f32; 4] = [0.85, 0.85, 1.0, 0.8];
    pub const SHIP: [f32; 4] = [0.3, 0.8, 1.0, 1.0];
    pub const SHIP_COCKPIT: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    pub const SHIELD: [f32; 4] = [0.3, 0.6, 1.0, 0.35];
    pub const METEOR_STRAIGHT: [f32; 4] = [0.55, 0.45, 0.35, 1.0];
    pub const METEOR_ZIGZAG: [f32; 4] = [0.9, 0.55, 0.2, 1.0];
    pub const METEOR_HOMING: [f32; 4] = [0.9, 0.25, 0.25, 1.0];
    pub const GAME_OVER_OVERLAY: [f32; 4] = [0.4, 0.0, 0.0, 0.35];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
