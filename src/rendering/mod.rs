//! # Rendering Module
//!
//! Draws the world and HUD into a [`Console`]; [`MacroquadDisplay`] puts the
//! console on screen.

pub mod console;
pub mod display;
pub mod ui;

pub use console::*;
pub use display::*;
pub use ui::*;

use crate::config;
use crate::game::{Color, Position, Tile, World};

const WALL_LIT: Color = Color::rgb(200, 180, 50);
const FLOOR_LIT: Color = Color::rgb(130, 110, 50);
const AREA_HIGHLIGHT: Color = Color::rgb(128, 32, 0);

fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Wall => WALL_LIT,
        Tile::Floor => FLOOR_LIT,
    }
}

/// Draws the map, HUD and message log, plus mouse-look under `cursor`.
pub fn render_all(console: &mut Console, world: &World, cursor: Option<Position>) {
    render_map(console, world, cursor);
    render_gui(console, world);
    if let Some(pos) = cursor {
        render_mouse_look(console, world, pos);
    }
}

/// Draws terrain, fixtures, items and actors.
///
/// Visible tiles are drawn at full brightness, remembered ones dimmed, and
/// only visible items and actors are shown. The player is always drawn.
pub fn render_map(console: &mut Console, world: &World, cursor: Option<Position>) {
    let Ok(map) = world.active_map() else {
        return;
    };

    for (pos, tile) in map.tiles.iter() {
        let visible = map.is_visible(pos);
        if !visible && !map.is_explored(pos) {
            continue;
        }
        let (glyph, color) = match map.fixture_at(pos) {
            Some(fixture) => (fixture.glyph, fixture.color),
            None => (tile.glyph(), tile_color(*tile)),
        };
        console.put(pos, glyph, if visible { color } else { color.dimmed() });
    }

    for (pos, stacks) in &map.items {
        if let Some(item) = stacks.first() {
            if map.is_visible(*pos) {
                console.put(*pos, item.glyph(), item.color());
            }
        }
    }

    for actor in world.active() {
        if actor.is_player() || map.is_visible(actor.pos) {
            console.put(actor.pos, actor.glyph, actor.color);
        }
    }
    // Keep the player on top of anything sharing its tile.
    if let Ok(player) = world.player() {
        console.put(player.pos, player.glyph, player.color);
    }

    if let Some(pos) = cursor {
        if map.in_bounds(pos) {
            console.invert(pos);
        }
    }
}

/// Draws the hp and xp bars, depth and message log below the map.
pub fn render_gui(console: &mut Console, world: &World) {
    let top = config::MAP_HEIGHT + 1;
    if let Ok(player) = world.player() {
        let stats = &player.stats;
        draw_bar(
            console,
            Position::new(1, top),
            config::BAR_WIDTH,
            "HP",
            stats.hp,
            stats.max_hp,
            config::HP_BAR_FILL,
            config::HP_BAR_BACK,
        );
        draw_bar(
            console,
            Position::new(1, top + 1),
            config::BAR_WIDTH,
            "XP",
            stats.xp,
            config::next_level_xp(stats.level),
            config::XP_BAR_FILL,
            config::XP_BAR_BACK,
        );
        console.print(
            Position::new(1, top + 2),
            &format!("Player level: {}", stats.level),
            config::TEXT_COLOR_DEFAULT,
        );
    }
    console.print(
        Position::new(1, top + 3),
        &format!("Dungeon level: {}", world.current_map_id.level),
        config::TEXT_COLOR_DEFAULT,
    );

    draw_log(
        console,
        &world.log.messages,
        Position::new(config::LOG_X, top),
        config::CONSOLE_WIDTH - config::LOG_X - 1,
        config::CONSOLE_HEIGHT - top,
    );
}

/// Names of the visible fixture and actors under `pos`, comma separated.
pub fn names_at(world: &World, pos: Position) -> String {
    let Ok(map) = world.active_map() else {
        return String::new();
    };
    if !map.is_visible(pos) {
        return String::new();
    }

    let mut names: Vec<String> = Vec::new();
    if let Some(fixture) = map.fixture_at(pos) {
        names.push(fixture.name.clone());
    }
    names.extend(map.items_at(pos).iter().map(|item| item.name().to_string()));
    names.extend(
        world
            .active()
            .filter(|actor| actor.pos == pos)
            .map(|actor| actor.name.clone()),
    );
    names.join(", ")
}

/// Prints what is under the cursor on the row just below the map.
pub fn render_mouse_look(console: &mut Console, world: &World, pos: Position) {
    let names = names_at(world, pos);
    if !names.is_empty() {
        console.print(Position::new(1, config::MAP_HEIGHT), &names, config::TEXT_COLOR_DEFAULT);
    }
}

/// Tints every map tile strictly within `radius_squared` of `center`.
pub fn render_area(console: &mut Console, world: &World, center: Position, radius_squared: i32) {
    let Ok(map) = world.active_map() else {
        return;
    };
    for pos in map.tiles.positions() {
        if pos.distance_squared(center) < radius_squared {
            console.set_bg(pos, AREA_HIGHLIGHT);
        }
    }
}
