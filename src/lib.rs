//! # Burrow
//!
//! The turn-based simulation core of a small dungeon crawler.
//!
//! ## Architecture Overview
//!
//! - **Game**: the world model (maps, actors, items), combat resolution,
//!   field of view, the action protocol and the turn scheduler
//! - **Generation**: room-and-corridor level generation with monster and item placement
//! - **Scenes**: the screen state machine driven one input event at a time
//! - **Persistence**: save/load of the whole world as JSON
//! - **Input / Rendering**: the thin macroquad front end translating keys into
//!   [`InputEvent`]s and blitting a character [`Console`]
//!
//! Everything in the core is single-threaded and synchronous: an event is fully
//! resolved (including the non-player sweep) before the next one is accepted.

pub mod game;
pub mod generation;
pub mod input;
pub mod persistence;
pub mod rendering;
pub mod scenes;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use persistence::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Burrow engine.
///
/// In-world problems (walking into a wall, an empty inventory slot) are not
/// errors; they are [`ActionResult::Failure`] values. This type is reserved for
/// I/O, serialization and broken invariants, all of which halt the game.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is missing something an operation needs
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// A structural invariant was broken (turn order, stale inventory index)
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A required file or asset is absent
    #[error("Missing resource: {0}")]
    ResourceMissing(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    use crate::game::{Color, Position};

    /// Console width in character cells
    pub const CONSOLE_WIDTH: i32 = 80;

    /// Console height in character cells
    pub const CONSOLE_HEIGHT: i32 = 50;

    /// Dungeon map width in tiles
    pub const MAP_WIDTH: i32 = 80;

    /// Dungeon map height in tiles; the HUD uses the rows below it
    pub const MAP_HEIGHT: i32 = 43;

    /// Sight radius used for the player's field of view
    pub const FOV_RADIUS: i32 = 8;

    /// Experience needed for the first level up
    pub const LEVEL_UP_BASE: i32 = 200;

    /// Additional experience needed per level
    pub const LEVEL_UP_FACTOR: i32 = 150;

    /// Width of the hp/xp bars
    pub const BAR_WIDTH: i32 = 20;

    /// Left edge of the message log
    pub const LOG_X: i32 = 22;

    /// Top-left corner of every menu
    pub const MENU_ORIGIN: Position = Position::new(10, 10);

    /// Name of the dungeon branch used in every [`crate::MapId`]
    pub const DUNGEON_NAME: &str = "dungeon";

    pub const TEXT_COLOR_DEFAULT: Color = Color::rgb(255, 255, 255);
    pub const TEXT_COLOR_PLAYER_ATTACK: Color = Color::rgb(224, 224, 224);
    pub const TEXT_COLOR_ENEMY_ATTACK: Color = Color::rgb(255, 192, 192);
    pub const TEXT_COLOR_PLAYER_DIE: Color = Color::rgb(255, 48, 48);
    pub const TEXT_COLOR_ENEMY_DIE: Color = Color::rgb(255, 160, 48);
    pub const TEXT_COLOR_HEALTH_RECOVERED: Color = Color::rgb(0, 255, 0);
    pub const TEXT_COLOR_IMPOSSIBLE: Color = Color::rgb(128, 128, 128);
    pub const TEXT_COLOR_STATUS: Color = Color::rgb(63, 255, 255);
    pub const TEXT_COLOR_WELCOME: Color = Color::rgb(32, 160, 255);

    pub const MENU_COLOR_DEFAULT: Color = Color::rgb(255, 255, 255);
    pub const MENU_COLOR_HIGHLIGHT: Color = Color::rgb(255, 255, 0);

    pub const HP_BAR_FILL: Color = Color::rgb(0, 96, 0);
    pub const HP_BAR_BACK: Color = Color::rgb(64, 16, 16);
    pub const XP_BAR_FILL: Color = Color::rgb(96, 0, 128);
    pub const XP_BAR_BACK: Color = Color::rgb(24, 16, 32);

    /// Experience required to advance past `level`.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::config::next_level_xp;
    ///
    /// assert_eq!(next_level_xp(1), 350);
    /// assert_eq!(next_level_xp(2), 500);
    /// ```
    pub const fn next_level_xp(level: i32) -> i32 {
        LEVEL_UP_BASE + level * LEVEL_UP_FACTOR
    }
}
