use miniquad::Context;

/// Something that owns a window and can be asked to close it.
pub trait WindowControl {
    fn request_close(&mut self);
}

/// Something that can resize the rendering viewport.
pub trait Viewport {
    /// Set the viewport to cover `(0, 0)..(width, height)`.
    fn set_viewport(&mut self, width: i32, height: i32);
}

impl WindowControl for Context {
    fn request_close(&mut self) {
        log::debug!("Window close requested");
        self.quit();
    }
}

impl Viewport for Context {
    fn set_viewport(&mut self, width: i32, height: i32) {
        self.apply_viewport(0, 0, width, height);
    }
}
