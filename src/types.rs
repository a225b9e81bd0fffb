use glam::Vec3;

/// A Vertex type for our gpu vertex buffers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Vertex {
        Vertex { pos: Vec3::new(x, y, z) }
    }
}

/// An RGBA colour for uploading as a uniform.
pub type Color = (f32, f32, f32, f32);
