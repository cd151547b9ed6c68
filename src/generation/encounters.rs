//! # Encounter Generation
//!
//! Monster templates and per-room monster placement.

use crate::game::{Actor, ActorId, Ai, Color, MapId, Position, Stats, WorldRng};
use crate::generation::{GenerationConfig, Generator, Room};
use crate::{BurrowError, BurrowResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Every kind of monster the dungeon spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonsterKind {
    Orc,
    Troll,
}

impl MonsterKind {
    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Orc => "orc",
            MonsterKind::Troll => "troll",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            MonsterKind::Orc => 'o',
            MonsterKind::Troll => 'T',
        }
    }

    pub fn color(self) -> Color {
        match self {
            MonsterKind::Orc => Color::rgb(63, 127, 63),
            MonsterKind::Troll => Color::rgb(0, 127, 0),
        }
    }

    /// Starting stats; `xp` is what killing it awards.
    pub fn stats(self) -> Stats {
        match self {
            MonsterKind::Orc => Stats::new(10, 3, 0, 35),
            MonsterKind::Troll => Stats::new(16, 4, 1, 100),
        }
    }

    /// Builds a hostile actor of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{ActorId, MapId, MonsterKind, Position};
    ///
    /// let troll = MonsterKind::Troll.spawn(ActorId(4), MapId::dungeon(2), Position::new(3, 3));
    /// assert_eq!(troll.glyph, 'T');
    /// assert_eq!(troll.stats.xp, 100);
    /// assert!(troll.ai.is_some());
    /// ```
    pub fn spawn(self, id: ActorId, map_id: MapId, pos: Position) -> Actor {
        Actor::new(id, self.name(), self.glyph(), self.color(), map_id, pos)
            .with_stats(self.stats())
            .with_ai(Ai::Hostile)
    }

    /// Chance that a spawned monster is a troll rather than an orc.
    pub fn troll_chance(level: i32) -> f64 {
        (0.2 + 0.1 * f64::from(level.max(1) - 1)).min(0.6)
    }
}

/// Picks monsters and their positions for one room.
pub struct EncounterGenerator {
    pub room: Room,
    pub level: i32,
}

impl EncounterGenerator {
    pub fn new(room: Room, level: i32) -> Self {
        Self { room, level }
    }
}

impl Generator<Vec<(MonsterKind, Position)>> for EncounterGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut WorldRng) -> BurrowResult<Vec<(MonsterKind, Position)>> {
        let floor = self.room.floor_positions();
        let count = rng.gen_range(0..=config.max_monsters(self.level));
        let mut spawns = Vec::new();

        for _ in 0..count {
            let Some(&pos) = floor.choose(rng) else {
                break;
            };
            if spawns.iter().any(|(_, taken)| *taken == pos) {
                continue;
            }
            let kind = if rng.gen_bool(MonsterKind::troll_chance(self.level)) {
                MonsterKind::Troll
            } else {
                MonsterKind::Orc
            };
            spawns.push((kind, pos));
        }
        Ok(spawns)
    }

    fn validate(&self, spawns: &Vec<(MonsterKind, Position)>, config: &GenerationConfig) -> BurrowResult<()> {
        if spawns.len() as u32 > config.max_monsters(self.level) {
            return Err(BurrowError::GenerationFailed(format!(
                "Room {} got {} monsters",
                self.room.id,
                spawns.len()
            )));
        }
        if let Some((_, pos)) = spawns.iter().find(|(_, pos)| !self.room.floor_positions().contains(pos)) {
            return Err(BurrowError::GenerationFailed(format!(
                "Monster at {:?} outside room {}",
                pos, self.room.id
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}
