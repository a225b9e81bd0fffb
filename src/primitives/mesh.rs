use miniquad::*;

use crate::error::Error;
use crate::shaders::flat;
use crate::types::Vertex;

/// Build the flat shaded pipeline, drawing either filled triangles or lines.
pub fn flat_pipeline(ctx: &mut Context, primitive_type: PrimitiveType) -> Result<Pipeline, Error> {
    let shader = Shader::new(ctx, flat::VERTEX, flat::FRAGMENT, flat::meta())
        .map_err(|err| Error::Shader { name: "flat", message: format!("{err:?}") })?;

    let pipeline_params = PipelineParams {
        primitive_type,
        ..Default::default()
    };

    Ok(Pipeline::with_params(
        ctx,
        &[BufferLayout::default()],
        &[VertexAttribute::new("pos", VertexFormat::Float3)],
        shader,
        pipeline_params,
    ))
}

/// Convert a triangle list into a line list containing each triangle's three edges.
pub fn triangle_edges(indices: &[u16]) -> Vec<u16> {
    indices.chunks_exact(3)
        .flat_map(|tri| [tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]])
        .collect()
}

/// An immutable indexed mesh, which can be drawn filled or as a wireframe.
pub struct Mesh {
    fill: Bindings,
    fill_count: i32,
    wireframe: Bindings,
    wireframe_count: i32,
}

impl Mesh {
    /// Upload a triangle list to the gpu.
    pub fn new(ctx: &mut Context, vertices: &[Vertex], indices: &[u16]) -> Self {
        let vertex_buffer = Buffer::immutable(ctx, BufferType::VertexBuffer, vertices);

        let index_buffer = Buffer::immutable(ctx, BufferType::IndexBuffer, indices);
        let fill = Bindings {
            vertex_buffers: vec![vertex_buffer],
            images: Vec::new(),
            index_buffer,
        };

        let edges = triangle_edges(indices);
        let edge_buffer = Buffer::immutable(ctx, BufferType::IndexBuffer, &edges[..]);
        let wireframe = Bindings {
            vertex_buffers: vec![vertex_buffer],
            images: Vec::new(),
            index_buffer: edge_buffer,
        };

        Self {
            fill,
            fill_count: indices.len() as i32,
            wireframe,
            wireframe_count: edges.len() as i32,
        }
    }

    /// Draw the mesh with a pipeline already applied. `wireframe` must match the pipeline's
    /// primitive type.
    pub fn draw(&self, ctx: &mut Context, wireframe: bool) {
        if wireframe {
            ctx.apply_bindings(&self.wireframe);
            ctx.draw(0, self.wireframe_count, 1);
        }
        else {
            ctx.apply_bindings(&self.fill);
            ctx.draw(0, self.fill_count, 1);
        }
    }
}
