//! # Entities Module
//!
//! Actors, their combat statistics and the AI tag that drives non-player turns.

use crate::game::{Action, ActorId, Color, Item, MapId, Position};
use serde::{Deserialize, Serialize};

/// Combat statistics and belongings of an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub level: i32,
    /// Experience held by the player, or awarded for killing a monster
    pub xp: i32,
    /// Remaining turns of confused stumbling
    pub confused_turns: i32,
    pub inventory: Vec<Item>,
}

impl Stats {
    /// Fresh stats at full health with an empty inventory.
    pub fn new(max_hp: i32, attack: i32, defense: i32, xp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            attack,
            defense,
            level: 1,
            xp,
            confused_turns: 0,
            inventory: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_confused(&self) -> bool {
        self.confused_turns > 0
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(1, 0, 0, 0)
    }
}

/// Behavior driving a non-player actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    /// Chases and attacks the player while the player can see it
    Hostile,
}

impl Ai {
    /// The action this behavior takes on a normal turn.
    pub fn action(self) -> Action {
        match self {
            Ai::Hostile => Action::HostileAi,
        }
    }
}

/// A creature in the world: the player or a monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub glyph: char,
    pub color: Color,
    pub pos: Position,
    /// The map this actor lives on
    pub map_id: MapId,
    pub stats: Stats,
    /// `None` for the player, who is driven by input
    pub ai: Option<Ai>,
}

impl Actor {
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        glyph: char,
        color: Color,
        map_id: MapId,
        pos: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            glyph,
            color,
            pos,
            map_id,
            stats: Stats::default(),
            ai: None,
        }
    }

    /// Builder-style stats setter.
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    /// Builder-style AI setter.
    pub fn with_ai(mut self, ai: Ai) -> Self {
        self.ai = Some(ai);
        self
    }

    /// The player at the start of a new game.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Actor, MapId, Position};
    ///
    /// let player = Actor::player(MapId::dungeon(1), Position::new(3, 4));
    /// assert!(player.id.is_player());
    /// assert_eq!(player.stats.hp, 30);
    /// assert_eq!(player.stats.level, 1);
    /// ```
    pub fn player(map_id: MapId, pos: Position) -> Self {
        Self::new(ActorId::PLAYER, "Player", '@', Color::WHITE, map_id, pos)
            .with_stats(Stats::new(30, 5, 2, 0))
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    /// The action to take this turn, or `None` for an actor without AI.
    ///
    /// Confusion overrides the actor's own behavior.
    pub fn next_action(&self) -> Option<Action> {
        if self.stats.is_confused() {
            Some(Action::ConfusedAi)
        } else {
            self.ai.map(Ai::action)
        }
    }
}
