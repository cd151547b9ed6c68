//! # Input Module
//!
//! Translates raw macroquad keyboard and mouse input into [`InputEvent`]s,
//! the only thing the screen state machine consumes.

pub mod commands;

pub use commands::*;

use crate::game::Position;
use macroquad::prelude::{
    get_char_pressed, is_key_down, is_key_pressed, is_mouse_button_pressed, is_quit_requested,
    mouse_position, KeyCode, MouseButton,
};

/// A single discrete input delivered to the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A movement key: arrows, keypad, Home/End/PgUp/PgDn, or `.` to wait
    Direction(Position),
    /// Enter
    Confirm,
    /// Escape
    Cancel,
    /// Any other typed character
    Hotkey(char),
    /// The pointer entered a new console cell
    PointerMoved(Position),
    /// Left click on a console cell
    PointerClicked(Position),
    /// The window was asked to close
    Quit,
}

/// Input handler polling macroquad once per frame.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Console cell under the pointer at the last poll
    last_cell: Option<Position>,
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects this frame's events.
    ///
    /// `cell_size` converts pointer pixels into console cells.
    pub fn poll(&mut self, cell_size: (f32, f32)) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if is_quit_requested() {
            events.push(InputEvent::Quit);
            return events;
        }

        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
        for key in DIRECTION_KEYS {
            if is_key_pressed(key) {
                if let Some(dir) = direction_for_key(key, shift, ctrl) {
                    events.push(InputEvent::Direction(dir));
                }
            }
        }
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            events.push(InputEvent::Confirm);
        }
        if is_key_pressed(KeyCode::Escape) {
            events.push(InputEvent::Cancel);
        }

        while let Some(ch) = get_char_pressed() {
            if let Some(event) = char_event(ch) {
                events.push(event);
            }
        }

        let (x, y) = mouse_position();
        let cell = pixel_to_cell(x, y, cell_size);
        if self.last_cell != Some(cell) {
            self.last_cell = Some(cell);
            events.push(InputEvent::PointerMoved(cell));
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            events.push(InputEvent::PointerClicked(cell));
        }

        events
    }
}

/// Event for a typed character; control characters and digits are handled
/// through key codes instead.
pub fn char_event(ch: char) -> Option<InputEvent> {
    match ch {
        '.' => Some(InputEvent::Direction(Position::ZERO)),
        c if c.is_control() || c.is_ascii_digit() => None,
        c => Some(InputEvent::Hotkey(c)),
    }
}

/// Console cell containing the pixel `(x, y)`.
pub fn pixel_to_cell(x: f32, y: f32, cell_size: (f32, f32)) -> Position {
    let (width, height) = cell_size;
    Position::new((x / width).floor() as i32, (y / height).floor() as i32)
}
