//! # User Interface Elements
//!
//! Bars, menus, the inventory overlay and the message log.

use crate::config;
use crate::game::{Color, Item, Message, Position};
use crate::rendering::Console;

/// Draws a labelled bar `width` cells wide, filled in proportion to `value / maximum`.
pub fn draw_bar(
    console: &mut Console,
    pos: Position,
    width: i32,
    label: &str,
    value: i32,
    maximum: i32,
    fill: Color,
    back: Color,
) {
    let filled = if maximum > 0 {
        (width * value.clamp(0, maximum) / maximum).clamp(0, width)
    } else {
        0
    };
    for x in 0..width {
        let bg = if x < filled { fill } else { back };
        console.set_bg(Position::new(pos.x + x, pos.y), bg);
    }
    let text = format!("{}: {}/{}", label, value, maximum);
    console.print(Position::new(pos.x + 1, pos.y), &text, config::TEXT_COLOR_DEFAULT);
}

/// Draws a vertical menu at [`config::MENU_ORIGIN`], one option per row.
pub fn draw_menu(console: &mut Console, title: &str, options: &[String], selected: Option<usize>) {
    let origin = config::MENU_ORIGIN;
    let width = options
        .iter()
        .map(|option| option.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0) as i32
        + 4;
    console.fill_rect(
        Position::new(origin.x - 2, origin.y - 2),
        width,
        options.len() as i32 + 3,
        Color::BLACK,
    );
    console.print(Position::new(origin.x, origin.y - 2), title, config::TEXT_COLOR_STATUS);

    for (i, option) in options.iter().enumerate() {
        let color = if Some(i) == selected {
            config::MENU_COLOR_HIGHLIGHT
        } else {
            config::MENU_COLOR_DEFAULT
        };
        console.print(Position::new(origin.x, origin.y + i as i32), option, color);
    }
}

/// Inventory lines as shown to the player.
///
/// # Examples
///
/// ```
/// use burrow::{inventory_lines, Item, ItemKind};
///
/// let lines = inventory_lines(&[Item::with_count(ItemKind::HealthPotion, 2)]);
/// assert_eq!(lines, vec!["(a) health potion (2)".to_string()]);
/// assert_eq!(inventory_lines(&[]), vec!["You have no items.".to_string()]);
/// ```
pub fn inventory_lines(items: &[Item]) -> Vec<String> {
    if items.is_empty() {
        return vec!["You have no items.".to_string()];
    }
    items
        .iter()
        .zip('a'..='z')
        .map(|(item, letter)| {
            if item.count > 1 {
                format!("({}) {} ({})", letter, item.name(), item.count)
            } else {
                format!("({}) {}", letter, item.name())
            }
        })
        .collect()
}

/// Draws the inventory overlay in the top-left corner.
pub fn draw_inventory(console: &mut Console, items: &[Item]) {
    let title = "Select an item to use, escape to cancel";
    let lines = inventory_lines(items);
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0) as i32
        + 2;
    let top_left = Position::new(1, 1);
    console.fill_rect(top_left, width, lines.len() as i32 + 2, Color::rgb(32, 32, 32));
    console.print(Position::new(2, 1), title, config::TEXT_COLOR_STATUS);
    for (i, line) in lines.iter().enumerate() {
        console.print(Position::new(2, 2 + i as i32), line, config::TEXT_COLOR_DEFAULT);
    }
}

/// Greedy word wrap at `width` columns.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draws the newest messages that fit in the box, oldest at the top.
pub fn draw_log(console: &mut Console, messages: &[Message], top_left: Position, width: i32, height: i32) {
    let mut lines: Vec<(String, Color)> = Vec::new();
    for message in messages.iter().rev() {
        let wrapped = wrap(&message.display_text(), width.max(1) as usize);
        for line in wrapped.into_iter().rev() {
            lines.push((line, message.color));
        }
        if lines.len() >= height as usize {
            break;
        }
    }
    lines.truncate(height.max(0) as usize);

    for (row, (line, color)) in lines.iter().rev().enumerate() {
        console.print(Position::new(top_left.x, top_left.y + row as i32), line, *color);
    }
}
