use miniquad::KeyCode;

use crate::error::Error;
use crate::window::{Viewport, WindowControl};

/// The size of the key table, one past the highest key code any platform reports.
pub const KEY_COUNT: usize = 349;

/// The per-frame state of a key or mouse button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ButtonState {
    /// Not pressed, and not released this frame.
    #[default]
    Default,

    /// Went down during this frame's callbacks.
    PressedThisFrame,

    /// Down since an earlier frame.
    Held,

    /// Went up during this frame's callbacks.
    Released,
}

impl ButtonState {
    /// Whether the button is currently down, regardless of when it went down.
    pub fn is_down(self) -> bool {
        matches!(self, ButtonState::PressedThisFrame | ButtonState::Held)
    }

    pub fn just_pressed(self) -> bool {
        self == ButtonState::PressedThisFrame
    }

    pub fn just_released(self) -> bool {
        self == ButtonState::Released
    }

    /// Apply a press or release. Presses only latch from `Default`, so a repeated press on a
    /// held button doesn't re-trigger it. Releases always latch.
    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Press if *self == ButtonState::Default => {
                *self = ButtonState::PressedThisFrame;
                true
            },
            Action::Release => {
                *self = ButtonState::Released;
                false
            },
            _ => false,
        }
    }

    /// Decay one-frame states at the end of a frame.
    fn advance(&mut self) {
        *self = match *self {
            ButtonState::PressedThisFrame => ButtonState::Held,
            ButtonState::Released => ButtonState::Default,
            other => other,
        };
    }
}

/// What happened to a key or button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Press,
    /// Key repeat while held, which never changes latched state.
    Repeat,
    Release,
}

/// The mouse buttons we track.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    /// Convert from miniquad's mouse button, returning None for buttons we don't track.
    pub fn from_miniquad(button: miniquad::MouseButton) -> Option<MouseButton> {
        match button {
            miniquad::MouseButton::Left => Some(MouseButton::Left),
            miniquad::MouseButton::Right => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// A key code that is known to index into the key table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u16);

impl Key {
    pub const ESCAPE: Key = Key(KeyCode::Escape as u16);
    pub const TAB: Key = Key(KeyCode::Tab as u16);
    pub const SPACE: Key = Key(KeyCode::Space as u16);

    /// Validate a raw key code.
    pub fn new(code: u16) -> Result<Key, Error> {
        if (code as usize) < KEY_COUNT {
            Ok(Key(code))
        }
        else {
            Err(Error::KeyOutOfRange { code })
        }
    }
}

impl TryFrom<KeyCode> for Key {
    type Error = Error;

    fn try_from(keycode: KeyCode) -> Result<Key, Error> {
        Key::new(keycode as u16)
    }
}

/// Latched input state, so that not everything has to hook into countless messages to respond
/// to input.
///
/// Window callbacks write into it between frames, and `advance_frame` is called once per frame
/// after everything that wants to read it has done so. Between those two points the state is
/// stable, and one-frame edges (`PressedThisFrame`, `Released`) are visible exactly once.
pub struct InputState {
    cursor: (i32, i32),
    scroll_y: f32,
    left_button: ButtonState,
    right_button: ButtonState,
    keys: [ButtonState; KEY_COUNT],
    any_key_pressed: bool,
    window_size: (i32, i32),
}

impl Default for InputState {
    fn default() -> Self {
        Self::new((0, 0))
    }
}

impl InputState {
    /// Create input state for a window of the given size.
    pub fn new(window_size: (i32, i32)) -> Self {
        Self {
            cursor: (0, 0),
            scroll_y: 0.0,
            left_button: ButtonState::Default,
            right_button: ButtonState::Default,
            keys: [ButtonState::Default; KEY_COUNT],
            any_key_pressed: false,
            window_size,
        }
    }

    /// Handle a key event. Pressing escape also asks the window to close.
    pub fn on_key<W: WindowControl + ?Sized>(&mut self, key: Key, action: Action, window: &mut W) {
        if key == Key::ESCAPE && action == Action::Press {
            window.request_close();
        }

        if self.keys[key.0 as usize].apply(action) {
            self.any_key_pressed = true;
        }
    }

    /// Handle a key event with an unvalidated key code. Out of range codes are rejected without
    /// touching any state.
    pub fn on_raw_key<W: WindowControl + ?Sized>(&mut self, code: u16, action: Action, window: &mut W)
        -> Result<(), Error>
    {
        let key = Key::new(code)?;
        self.on_key(key, action, window);
        Ok(())
    }

    /// Handle a scroll event. Only the latest delta in a frame is kept.
    pub fn on_scroll(&mut self, delta_y: f32) {
        self.scroll_y = delta_y;
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, action: Action) {
        match button {
            MouseButton::Left => self.left_button.apply(action),
            MouseButton::Right => self.right_button.apply(action),
        };
    }

    /// Handle cursor movement, truncating to whole pixels.
    pub fn on_cursor_move(&mut self, x: f32, y: f32) {
        self.cursor = (x as i32, y as i32);
    }

    /// Handle a window resize, passing the new size on to the viewport.
    pub fn on_window_resize<V: Viewport + ?Sized>(&mut self, width: i32, height: i32, viewport: &mut V) {
        log::debug!("Window resized to {width}x{height}");
        self.window_size = (width, height);
        viewport.set_viewport(width, height);
    }

    /// Decay one-frame states. Must be called exactly once per frame, after the frame's
    /// callbacks have been delivered and the frame's logic has read the state.
    pub fn advance_frame(&mut self) {
        for key in self.keys.iter_mut() {
            key.advance();
        }
        self.left_button.advance();
        self.right_button.advance();

        self.any_key_pressed = false;

        if self.scroll_y != 0.0 {
            self.scroll_y = 0.0;
        }
    }

    pub fn key(&self, key: Key) -> ButtonState {
        self.keys[key.0 as usize]
    }

    pub fn button(&self, button: MouseButton) -> ButtonState {
        match button {
            MouseButton::Left => self.left_button,
            MouseButton::Right => self.right_button,
        }
    }

    /// The last cursor position in window coordinates.
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// The mousewheel movement this frame.
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Whether any key went down this frame.
    pub fn any_key_pressed(&self) -> bool {
        self.any_key_pressed
    }

    pub fn window_size(&self) -> (i32, i32) {
        self.window_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    /// Records the side effects the latch asks of the window.
    #[derive(Default)]
    struct MockWindow {
        close_requests: usize,
        viewports: Vec<(i32, i32)>,
    }

    impl WindowControl for MockWindow {
        fn request_close(&mut self) {
            self.close_requests += 1;
        }
    }

    impl Viewport for MockWindow {
        fn set_viewport(&mut self, width: i32, height: i32) {
            self.viewports.push((width, height));
        }
    }

    fn key_a() -> Key {
        Key::try_from(KeyCode::A).unwrap()
    }

    #[test]
    fn starts_with_everything_default() {
        let input = InputState::default();

        for code in 0..KEY_COUNT as u16 {
            assert_eq!(input.key(Key::new(code).unwrap()), ButtonState::Default);
        }
        assert_eq!(input.button(MouseButton::Left), ButtonState::Default);
        assert_eq!(input.button(MouseButton::Right), ButtonState::Default);
        assert!(!input.any_key_pressed());
        assert_eq!(input.scroll_y(), 0.0);
        assert_eq!(input.cursor(), (0, 0));
    }

    #[test]
    fn press_latches_pressed_this_frame() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();

        input.on_key(key_a(), Action::Press, &mut window);

        assert_eq!(input.key(key_a()), ButtonState::PressedThisFrame);
        assert!(input.key(key_a()).just_pressed());
        assert!(input.any_key_pressed());
    }

    #[test]
    fn repeated_press_does_not_retrigger() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();

        input.on_key(key_a(), Action::Press, &mut window);
        input.on_key(key_a(), Action::Press, &mut window);
        assert_eq!(input.key(key_a()), ButtonState::PressedThisFrame);

        input.advance_frame();
        input.on_key(key_a(), Action::Press, &mut window);
        assert_eq!(input.key(key_a()), ButtonState::Held);
        assert!(!input.any_key_pressed());
    }

    #[test]
    fn release_always_latches() {
        let mut window = MockWindow::default();

        // From default, pressed, and held.
        for presses in 0..3 {
            let mut input = InputState::default();
            if presses > 0 {
                input.on_key(key_a(), Action::Press, &mut window);
            }
            if presses > 1 {
                input.advance_frame();
            }

            input.on_key(key_a(), Action::Release, &mut window);
            assert_eq!(input.key(key_a()), ButtonState::Released);
        }
    }

    #[test]
    fn repeat_never_changes_state() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();

        input.on_key(key_a(), Action::Repeat, &mut window);
        assert_eq!(input.key(key_a()), ButtonState::Default);
        assert!(!input.any_key_pressed());

        input.on_key(key_a(), Action::Press, &mut window);
        input.advance_frame();
        input.on_key(key_a(), Action::Repeat, &mut window);
        assert_eq!(input.key(key_a()), ButtonState::Held);
    }

    #[test]
    fn full_key_lifecycle() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();

        input.on_key(key_a(), Action::Press, &mut window);
        input.advance_frame();
        assert_eq!(input.key(key_a()), ButtonState::Held);
        assert!(input.key(key_a()).is_down());

        input.on_key(key_a(), Action::Press, &mut window);
        assert_eq!(input.key(key_a()), ButtonState::Held);

        input.on_key(key_a(), Action::Release, &mut window);
        assert_eq!(input.key(key_a()), ButtonState::Released);
        assert!(input.key(key_a()).just_released());

        input.advance_frame();
        assert_eq!(input.key(key_a()), ButtonState::Default);
        assert!(!input.key(key_a()).is_down());
    }

    #[test]
    fn advance_frame_clears_any_key_pressed() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();

        input.on_key(key_a(), Action::Press, &mut window);
        input.advance_frame();

        assert!(!input.any_key_pressed());
    }

    #[test]
    fn escape_press_requests_close() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();

        input.on_key(Key::ESCAPE, Action::Press, &mut window);
        assert_eq!(window.close_requests, 1);
        assert_eq!(input.key(Key::ESCAPE), ButtonState::PressedThisFrame);

        input.on_key(Key::ESCAPE, Action::Release, &mut window);
        input.on_key(key_a(), Action::Press, &mut window);
        assert_eq!(window.close_requests, 1);
    }

    #[test]
    fn raw_key_out_of_range_is_rejected() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();

        let result = input.on_raw_key(KEY_COUNT as u16, Action::Press, &mut window);

        assert_eq!(result, Err(Error::KeyOutOfRange { code: KEY_COUNT as u16 }));
        assert!(!input.any_key_pressed());
        assert_eq!(Key::new(u16::MAX), Err(Error::KeyOutOfRange { code: u16::MAX }));
    }

    #[test]
    fn raw_key_in_range_is_applied() {
        let mut input = InputState::default();
        let mut window = MockWindow::default();
        let last = KEY_COUNT as u16 - 1;

        input.on_raw_key(last, Action::Press, &mut window).unwrap();

        assert_eq!(input.key(Key::new(last).unwrap()), ButtonState::PressedThisFrame);
    }

    #[test]
    fn mouse_buttons_are_independent() {
        let mut input = InputState::default();

        input.on_mouse_button(MouseButton::Left, Action::Press);
        assert_eq!(input.button(MouseButton::Left), ButtonState::PressedThisFrame);
        assert_eq!(input.button(MouseButton::Right), ButtonState::Default);

        input.advance_frame();
        input.on_mouse_button(MouseButton::Right, Action::Press);
        input.on_mouse_button(MouseButton::Left, Action::Release);
        assert_eq!(input.button(MouseButton::Left), ButtonState::Released);
        assert_eq!(input.button(MouseButton::Right), ButtonState::PressedThisFrame);

        input.advance_frame();
        assert_eq!(input.button(MouseButton::Left), ButtonState::Default);
        assert_eq!(input.button(MouseButton::Right), ButtonState::Held);
    }

    #[test]
    fn mouse_buttons_do_not_count_as_keys() {
        let mut input = InputState::default();

        input.on_mouse_button(MouseButton::Left, Action::Press);

        assert!(!input.any_key_pressed());
    }

    #[test]
    fn untracked_mouse_buttons_are_ignored() {
        assert_eq!(MouseButton::from_miniquad(miniquad::MouseButton::Middle), None);
        assert_eq!(MouseButton::from_miniquad(miniquad::MouseButton::Left), Some(MouseButton::Left));
    }

    #[test]
    fn scroll_last_write_wins() {
        let mut input = InputState::default();

        input.on_scroll(2.5);
        input.on_scroll(-1.0);
        assert_eq!(input.scroll_y(), -1.0);

        input.advance_frame();
        assert_eq!(input.scroll_y(), 0.0);
    }

    #[test]
    fn cursor_is_truncated() {
        let mut input = InputState::default();

        input.on_cursor_move(12.9, 7.2);

        assert_eq!(input.cursor(), (12, 7));
    }

    #[test]
    fn resize_updates_size_and_viewport_once() {
        let mut input = InputState::new((1280, 720));
        let mut window = MockWindow::default();

        input.on_window_resize(800, 600, &mut window);

        assert_eq!(input.window_size(), (800, 600));
        assert_eq!(window.viewports, vec![(800, 600)]);
    }

    /// Decode an arbitrary byte pair into an input event and apply it.
    fn apply_event(input: &mut InputState, window: &mut MockWindow, (kind, value): (u8, u16)) {
        let action = match value % 3 {
            0 => Action::Press,
            1 => Action::Repeat,
            _ => Action::Release,
        };

        match kind % 5 {
            0 | 1 => input.on_key(Key::new(value % KEY_COUNT as u16).unwrap(), action, window),
            2 => input.on_mouse_button(if value % 2 == 0 { MouseButton::Left } else { MouseButton::Right }, action),
            3 => input.on_scroll(value as f32 - 100.0),
            _ => input.on_cursor_move(value as f32, value as f32 * 0.5),
        }
    }

    fn settled(state: ButtonState) -> bool {
        state == ButtonState::Default || state == ButtonState::Held
    }

    quickcheck! {
        fn advance_frame_leaves_only_settled_states(frames: Vec<Vec<(u8, u16)>>) -> bool {
            let mut input = InputState::default();
            let mut window = MockWindow::default();

            frames.into_iter().all(|events| {
                for event in events {
                    apply_event(&mut input, &mut window, event);
                }
                input.advance_frame();

                input.keys.iter().all(|&state| settled(state))
                    && settled(input.button(MouseButton::Left))
                    && settled(input.button(MouseButton::Right))
                    && !input.any_key_pressed()
                    && input.scroll_y() == 0.0
            })
        }

        fn press_from_default_is_seen_for_exactly_one_frame(code: u16, frames: u8) -> bool {
            let mut input = InputState::default();
            let mut window = MockWindow::default();
            let key = Key::new(code % KEY_COUNT as u16).unwrap();

            input.on_key(key, Action::Press, &mut window);
            let pressed = input.key(key).just_pressed() && input.any_key_pressed();

            input.advance_frame();
            let mut held = true;
            for _ in 0..frames % 8 {
                held &= input.key(key) == ButtonState::Held;
                input.advance_frame();
            }

            pressed && held && input.key(key) == ButtonState::Held
        }
    }
}
