//! # Display Management
//!
//! Blits a [`Console`] to the macroquad window.

use crate::config;
use crate::game::Color;
use crate::rendering::Console;
use macroquad::color::Color as ScreenColor;
use macroquad::prelude::{clear_background, draw_rectangle, draw_text_ex, Font, TextParams, BLACK};

/// Width of a console cell in pixels
pub const CELL_WIDTH: f32 = 10.0;
/// Height of a console cell in pixels
pub const CELL_HEIGHT: f32 = 16.0;

/// Macroquad display for the character console.
pub struct MacroquadDisplay {
    /// Font for glyphs; macroquad's built-in font when `None`
    pub font: Option<Font>,
    /// Glyph size in pixels
    pub font_size: u16,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl MacroquadDisplay {
    pub fn new(font: Option<Font>) -> Self {
        Self {
            font,
            font_size: CELL_HEIGHT as u16,
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
        }
    }

    /// Size of one cell, for converting pointer pixels to cells.
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_width, self.cell_height)
    }

    /// Window size that fits the whole console.
    pub fn window_size() -> (i32, i32) {
        (
            (config::CONSOLE_WIDTH as f32 * CELL_WIDTH) as i32,
            (config::CONSOLE_HEIGHT as f32 * CELL_HEIGHT) as i32,
        )
    }

    /// Draws every cell of `console`.
    pub fn present(&self, console: &Console) {
        clear_background(BLACK);

        let mut buf = [0u8; 4];
        for (pos, cell) in console.cells() {
            let x = pos.x as f32 * self.cell_width;
            let y = pos.y as f32 * self.cell_height;
            if cell.bg != Color::BLACK {
                draw_rectangle(x, y, self.cell_width, self.cell_height, to_screen(cell.bg));
            }
            if cell.glyph != ' ' {
                draw_text_ex(
                    cell.glyph.encode_utf8(&mut buf),
                    x,
                    y + self.cell_height * 0.8,
                    TextParams {
                        font: self.font.as_ref(),
                        font_size: self.font_size,
                        color: to_screen(cell.fg),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

fn to_screen(color: Color) -> ScreenColor {
    ScreenColor::from_rgba(color.r, color.g, color.b, 255)
}
