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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Unpack 0xRRGGBBAA into linear-ish floats
pub fn rgba(packed: u32) -> [f32; 4] {
    [
        ((packed >> 24) & 0xFF) as f32 / 255.0,
        ((packed >> 16) & 0xFF) as f32 / 255.0,
        ((packed >> 8) & 0xFF) as f32 / 255.0,
        (packed & 0xFF) as f32 / 255.0,
    ]
}

/// Same color, alpha multiplied
pub fn fade(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.05, 0.06, 0.12, 1.0];
    pub const GROUND: [f32; 4] = [0.12, 0.14, 0.22, 1.0];
    pub const PLAYER_BODY: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const PLAYER_HEAD: [f32; 4] = [0.9, 0.95, 0.85, 1.0];
    pub const OBJECT_NORMAL: [f32; 4] = [0.55, 0.6, 0.7, 1.0];
    pub const OBJECT_BONUS_UNRIPE: [f32; 4] = [0.35, 0.7, 0.3, 1.0];
    pub const OBJECT_BONUS_RIPE: [f32; 4] = [1.0, 0.82, 0.2, 1.0];
    pub const OBJECT_GROWING: [f32; 4] = [0.65, 0.3, 0.85, 1.0];
    pub const SCORE_FLASH: [f32; 4] = [1.0, 0.85, 0.3, 0.35];
    pub const PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const BUTTON: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
}
