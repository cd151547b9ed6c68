//! # Item Generation
//!
//! Per-room item placement.

use crate::game::{ItemKind, Position, WorldRng};
use crate::generation::{GenerationConfig, Generator, Room};
use crate::{BurrowError, BurrowResult};
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks items and their positions for one room.
pub struct ItemGenerator {
    pub room: Room,
    pub level: i32,
}

impl ItemGenerator {
    pub fn new(room: Room, level: i32) -> Self {
        Self { room, level }
    }

    /// Rolls an item kind: mostly potions, scrolls become available deeper.
    fn roll_kind(&self, rng: &mut WorldRng) -> ItemKind {
        let roll = rng.gen_range(0..100);
        match roll {
            0..=69 => ItemKind::HealthPotion,
            70..=84 => ItemKind::ConfusionScroll,
            _ if self.level >= 2 => ItemKind::FireballScroll,
            _ => ItemKind::ConfusionScroll,
        }
    }
}

impl Generator<Vec<(ItemKind, Position)>> for ItemGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut WorldRng) -> BurrowResult<Vec<(ItemKind, Position)>> {
        let floor = self.room.floor_positions();
        let count = rng.gen_range(0..=config.max_items(self.level));
        let mut drops = Vec::new();

        for _ in 0..count {
            let Some(&pos) = floor.choose(rng) else {
                break;
            };
            drops.push((self.roll_kind(rng), pos));
        }
        Ok(drops)
    }

    fn validate(&self, drops: &Vec<(ItemKind, Position)>, config: &GenerationConfig) -> BurrowResult<()> {
        if drops.len() as u32 > config.max_items(self.level) {
            return Err(BurrowError::GenerationFailed(format!(
                "Room {} got {} items",
                self.room.id,
                drops.len()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}
