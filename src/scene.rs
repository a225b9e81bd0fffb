use miniquad::{Context, Pipeline, PrimitiveType};

use crate::error::Error;
use crate::input::{InputState, Key, MouseButton};
use crate::primitives::{flat_pipeline, Mesh};
use crate::shaders::flat;
use crate::types::{Color, Vertex};

/// The colour the screen is cleared to.
pub const CLEAR_COLOR: Color = (0.2, 0.3, 0.3, 1.0);

/// The colour of the triangles.
const BASE_COLOR: Color = (1.0, 0.5, 0.2, 1.0);

/// The colour of the triangles while the left mouse button is down.
const HIGHLIGHT_COLOR: Color = (1.0, 0.8, 0.4, 1.0);

/// How much one unit of scrolling zooms in or out.
const SCROLL_ZOOM_STEP: f32 = 1.1;

const MIN_SCALE: f32 = 0.1;
const MAX_SCALE: f32 = 4.0;

/// Two triangles that share the center vertex.
const VERTICES: [Vertex; 5] = [
    Vertex::new(-0.5, 1.0, 0.0), // top left
    Vertex::new( 0.0, 0.0, 0.0), // center
    Vertex::new(-1.0, 0.0, 0.0), // mid left
    Vertex::new( 0.5, 1.0, 0.0), // top right
    Vertex::new( 1.0, 0.0, 0.0), // mid right
];

const INDICES: [u16; 6] = [
    0, 1, 2,
    1, 3, 4,
];

/// How the triangles are laid out in gpu memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// One vertex buffer with an index buffer, sharing the center vertex.
    Indexed,

    /// One vertex buffer per triangle.
    Separate,
}

/// The gpu independent part of the scene, driven by input once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub layout: Layout,
    pub wireframe: bool,
    pub scale: f32,
    pub color: Color,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            layout: Layout::Indexed,
            wireframe: false,
            scale: 1.0,
            color: BASE_COLOR,
        }
    }
}

impl SceneState {
    /// Update the scene from this frame's input.
    pub fn update(&mut self, input: &InputState) {
        if input.key(Key::TAB).just_pressed() {
            self.layout = match self.layout {
                Layout::Indexed => Layout::Separate,
                Layout::Separate => Layout::Indexed,
            };
            log::info!("Switched to {:?} layout", self.layout);
        }

        if input.key(Key::SPACE).just_pressed() || input.button(MouseButton::Right).just_pressed() {
            self.wireframe = !self.wireframe;
            log::info!("Wireframe {}", if self.wireframe { "on" } else { "off" });
        }

        let scroll_y = input.scroll_y();
        if scroll_y != 0.0 {
            self.scale = (self.scale * SCROLL_ZOOM_STEP.powf(scroll_y)).clamp(MIN_SCALE, MAX_SCALE);
        }

        let left_button = input.button(MouseButton::Left);
        if left_button.just_released() {
            log::debug!("Highlight released at {:?}", input.cursor());
        }

        self.color = if left_button.is_down() {
            HIGHLIGHT_COLOR
        }
        else {
            BASE_COLOR
        };
    }
}

/// The scene we draw: the same two triangles, in either layout.
pub struct Scene {
    pub state: SceneState,
    fill_pipeline: Pipeline,
    wireframe_pipeline: Pipeline,
    indexed: Mesh,
    separate: [Mesh; 2],
}

impl Scene {
    /// Create the scene's gpu resources.
    pub fn new(ctx: &mut Context) -> Result<Self, Error> {
        let fill_pipeline = flat_pipeline(ctx, PrimitiveType::Triangles)?;
        let wireframe_pipeline = flat_pipeline(ctx, PrimitiveType::Lines)?;

        let indexed = Mesh::new(ctx, &VERTICES, &INDICES);

        let separate = [
            Mesh::new(ctx, &[VERTICES[0], VERTICES[1], VERTICES[2]], &[0, 1, 2]),
            Mesh::new(ctx, &[VERTICES[1], VERTICES[3], VERTICES[4]], &[0, 1, 2]),
        ];

        Ok(Self {
            state: SceneState::default(),
            fill_pipeline,
            wireframe_pipeline,
            indexed,
            separate,
        })
    }

    pub fn update(&mut self, input: &InputState) {
        self.state.update(input);
    }

    /// Draw the scene. Must be called inside a render pass.
    pub fn draw(&self, ctx: &mut Context) {
        let state = &self.state;

        ctx.apply_pipeline(if state.wireframe { &self.wireframe_pipeline } else { &self.fill_pipeline });
        ctx.apply_uniforms(&flat::Uniforms {
            color: state.color,
            scale: state.scale,
        });

        match state.layout {
            Layout::Indexed => self.indexed.draw(ctx, state.wireframe),
            Layout::Separate => {
                for mesh in &self.separate {
                    mesh.draw(ctx, state.wireframe);
                }
            },
        }
    }
}
