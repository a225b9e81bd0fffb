mod mesh;

pub use mesh::*;
