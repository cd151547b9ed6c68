//! # Command Definitions
//!
//! Key and character bindings shared by the input handler and the screens.

use crate::game::Position;
use macroquad::input::KeyCode;

/// Direction for a vi-style movement letter.
///
/// # Examples
///
/// ```
/// use burrow::{vi_direction, Position};
///
/// assert_eq!(vi_direction('h'), Some(Position::new(-1, 0)));
/// assert_eq!(vi_direction('n'), Some(Position::new(1, 1)));
/// assert_eq!(vi_direction('x'), None);
/// ```
pub fn vi_direction(ch: char) -> Option<Position> {
    let (dx, dy) = match ch {
        'h' => (-1, 0),
        'j' => (0, 1),
        'k' => (0, -1),
        'l' => (1, 0),
        'y' => (-1, -1),
        'u' => (1, -1),
        'b' => (-1, 1),
        'n' => (1, 1),
        _ => return None,
    };
    Some(Position::new(dx, dy))
}

/// Direction bound to a key, if any.
///
/// With shift or ctrl held, left and right become the upper and lower
/// diagonals respectively, for keyboards without a keypad.
pub fn direction_for_key(key: KeyCode, shift: bool, ctrl: bool) -> Option<Position> {
    let (dx, dy) = match key {
        KeyCode::Left if shift => (-1, -1),
        KeyCode::Right if shift => (1, -1),
        KeyCode::Left if ctrl => (-1, 1),
        KeyCode::Right if ctrl => (1, 1),
        KeyCode::Up | KeyCode::Kp8 => (0, -1),
        KeyCode::Down | KeyCode::Kp2 => (0, 1),
        KeyCode::Left | KeyCode::Kp4 => (-1, 0),
        KeyCode::Right | KeyCode::Kp6 => (1, 0),
        KeyCode::Home | KeyCode::Kp7 => (-1, -1),
        KeyCode::PageUp | KeyCode::Kp9 => (1, -1),
        KeyCode::End | KeyCode::Kp1 => (-1, 1),
        KeyCode::PageDown | KeyCode::Kp3 => (1, 1),
        KeyCode::Kp5 => (0, 0),
        _ => return None,
    };
    Some(Position::new(dx, dy))
}

/// Keys polled for directions each frame.
pub const DIRECTION_KEYS: [KeyCode; 17] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Home,
    KeyCode::End,
    KeyCode::PageUp,
    KeyCode::PageDown,
    KeyCode::Kp1,
    KeyCode::Kp2,
    KeyCode::Kp3,
    KeyCode::Kp4,
    KeyCode::Kp5,
    KeyCode::Kp6,
    KeyCode::Kp7,
    KeyCode::Kp8,
    KeyCode::Kp9,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_vi_letter_is_a_unit_step() {
        for ch in "hjklyubn".chars() {
            let dir = vi_direction(ch).unwrap();
            assert_eq!(dir.chebyshev_distance(Position::ZERO), 1);
        }
    }

    #[test]
    fn test_modified_arrows_are_diagonals() {
        assert_eq!(direction_for_key(KeyCode::Left, true, false), Some(Position::new(-1, -1)));
        assert_eq!(direction_for_key(KeyCode::Right, false, true), Some(Position::new(1, 1)));
        assert_eq!(direction_for_key(KeyCode::Left, false, false), Some(Position::new(-1, 0)));
    }

    #[test]
    fn test_keypad_center_waits() {
        assert_eq!(direction_for_key(KeyCode::Kp5, false, false), Some(Position::ZERO));
        assert_eq!(direction_for_key(KeyCode::A, false, false), None);
    }
}
