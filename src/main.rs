mod error;
mod input;
mod primitives;
mod scene;
mod shaders;
mod types;
mod window;

use std::error::Error;

use input::{Action, InputState, Key, MouseButton};
use miniquad::{conf, Context, EventHandler, KeyCode, KeyMods, PassAction};
use scene::{Scene, CLEAR_COLOR};

/// The window title.
const WINDOW_TITLE: &str = "OpenGL experiment";

/// The window width.
const WINDOW_WIDTH: i32 = 1280;

/// The window height.
const WINDOW_HEIGHT: i32 = 720;

/// The event handler that owns the input state and the scene, and renders them via miniquad.
pub struct Stage {
    input: InputState,
    scene: Scene,
}

impl Stage {
    pub fn new(ctx: &mut Context) -> Result<Stage, Box<dyn Error>> {
        let (width, height) = ctx.screen_size();
        let input = InputState::new((width as i32, height as i32));

        let scene = Scene::new(ctx)?;

        Ok(Stage {
            input,
            scene,
        })
    }

    fn key_event(&mut self, ctx: &mut Context, keycode: KeyCode, action: Action) {
        log::trace!("Key {keycode:?} {action:?}");

        match Key::try_from(keycode) {
            Ok(key) => self.input.on_key(key, action, ctx),
            Err(err) => log::warn!("Ignoring key event: {err}"),
        }
    }

    fn mouse_button_event(&mut self, button: miniquad::MouseButton, action: Action) {
        log::trace!("Mouse button {button:?} {action:?}");

        if let Some(button) = MouseButton::from_miniquad(button) {
            self.input.on_mouse_button(button, action);
        }
    }
}

impl EventHandler for Stage {
    fn update(&mut self, _ctx: &mut Context) {
        // All of this frame's callbacks have been delivered by now.
        if self.input.any_key_pressed() {
            log::debug!("Key pressed with cursor at {:?} in {:?} window",
                self.input.cursor(), self.input.window_size());
        }

        self.scene.update(&self.input);
        self.input.advance_frame();
    }

    fn draw(&mut self, ctx: &mut Context) {
        let (r, g, b, a) = CLEAR_COLOR;
        ctx.begin_default_pass(PassAction::clear_color(r, g, b, a));

        self.scene.draw(ctx);

        ctx.end_render_pass();
        ctx.commit_frame();
    }

    fn resize_event(&mut self, ctx: &mut Context, width: f32, height: f32) {
        self.input.on_window_resize(width as i32, height as i32, ctx);
    }

    fn key_down_event(&mut self, ctx: &mut Context, keycode: KeyCode, _keymods: KeyMods, repeat: bool) {
        let action = if repeat { Action::Repeat } else { Action::Press };
        self.key_event(ctx, keycode, action);
    }

    fn key_up_event(&mut self, ctx: &mut Context, keycode: KeyCode, _keymods: KeyMods) {
        self.key_event(ctx, keycode, Action::Release);
    }

    fn mouse_button_down_event(&mut self, _ctx: &mut Context, button: miniquad::MouseButton, _x: f32, _y: f32) {
        self.mouse_button_event(button, Action::Press);
    }

    fn mouse_button_up_event(&mut self, _ctx: &mut Context, button: miniquad::MouseButton, _x: f32, _y: f32) {
        self.mouse_button_event(button, Action::Release);
    }

    fn mouse_motion_event(&mut self, _ctx: &mut Context, x: f32, y: f32) {
        self.input.on_cursor_move(x, y);
    }

    fn mouse_wheel_event(&mut self, _ctx: &mut Context, _x: f32, y: f32) {
        log::trace!("Scroll {y}");
        self.input.on_scroll(y);
    }
}

fn main() {
    // Initialize logging.
    env_logger::init();
    log::info!("Hello! Tab switches layout, space or right click toggles wireframe, scroll zooms");

    // Create window config.
    let config = conf::Conf {
        window_title: WINDOW_TITLE.to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: true,
        ..Default::default()
    };

    miniquad::start(config, |mut ctx| {
        match Stage::new(&mut ctx) {
            Ok(stage) => Box::new(stage),
            Err(err) => {
                log::error!("Failed to create stage: {err}");
                std::process::exit(1);
            }
        }
    });
}
