//! # Game Module
//!
//! Core simulation: the world model, combat, visibility, actions and turn order.
//!
//! This module contains the fundamental building blocks of Burrow:
//! - World, map and message log representation
//! - Actors, stats and items
//! - Combat resolution and field of view
//! - The action protocol and the non-player turn sweep

pub mod actions;
pub mod combat;
pub mod entities;
pub mod fov;
pub mod item;
pub mod scheduler;
pub mod world;

pub use actions::*;
pub use entities::*;
pub use item::*;
pub use scheduler::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate in the game world, or a step between two of them.
///
/// # Examples
///
/// ```
/// use burrow::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos + Position::new(1, -1), Position::new(11, 4));
/// assert_eq!(pos - Position::new(10, 5), Position::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The null step, used for "wait a turn".
    pub const ZERO: Position = Position::new(0, 0);

    /// Creates a new position with the given coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Distance where diagonal steps count as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Position;
    ///
    /// assert_eq!(Position::new(0, 0).chebyshev_distance(Position::new(3, -4)), 4);
    /// ```
    pub fn chebyshev_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Squared Euclidean distance, for radius checks without floating point.
    pub fn distance_squared(self, other: Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns all 8 adjacent positions (including diagonals).
    pub fn adjacent_positions(self) -> [Position; 8] {
        [
            Position::new(self.x - 1, self.y - 1),
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y - 1),
            Position::new(self.x - 1, self.y),
            Position::new(self.x + 1, self.y),
            Position::new(self.x - 1, self.y + 1),
            Position::new(self.x, self.y + 1),
            Position::new(self.x + 1, self.y + 1),
        ]
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Identifier of an actor. `ActorId(0)` is always the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    /// The single player actor.
    pub const PLAYER: ActorId = ActorId(0);

    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a map: the dungeon branch name plus the depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId {
    pub name: String,
    pub level: i32,
}

impl MapId {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// The main dungeon map at `level`.
    pub fn dungeon(level: i32) -> Self {
        Self::new(crate::config::DUNGEON_NAME, level)
    }
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.level)
    }
}

/// 24-bit display color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The same hue at half intensity, used for remembered-but-unseen tiles.
    pub fn dimmed(self) -> Self {
        Self::rgb(self.r / 2, self.g / 2, self.b / 2)
    }
}
