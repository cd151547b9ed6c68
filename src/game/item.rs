//! # Item Module
//!
//! Consumable items and their effects.
//!
//! Using an item either resolves immediately (a potion) or asks for a target
//! tile through [`ActionResult::Poll`]. Targeted effects are resolved later by
//! [`Action::ConfuseAt`] and [`Action::FireballAt`]. An item is consumed only
//! when its effect actually happens.

use crate::game::{combat, ActionResult, ActorId, Color, PickTarget, Targeting, TilePrompt, World};
use crate::{BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};

/// Hit points restored by a health potion
pub const HEALTH_POTION_AMOUNT: i32 = 4;
/// Turns a confusion scroll keeps its target stumbling
pub const CONFUSION_TURNS: i32 = 10;
/// Damage dealt by a fireball to everything in the blast
pub const FIREBALL_DAMAGE: i32 = 12;
/// Squared blast radius of a fireball; tiles strictly inside are hit
pub const FIREBALL_RADIUS_SQUARED: i32 = 9;

/// Every kind of item the dungeon can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPotion,
    ConfusionScroll,
    FireballScroll,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "health potion",
            ItemKind::ConfusionScroll => "confusion scroll",
            ItemKind::FireballScroll => "fireball scroll",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            ItemKind::HealthPotion => '!',
            ItemKind::ConfusionScroll | ItemKind::FireballScroll => '~',
        }
    }

    pub fn color(self) -> Color {
        match self {
            ItemKind::HealthPotion => Color::rgb(127, 0, 255),
            ItemKind::ConfusionScroll => Color::rgb(207, 63, 255),
            ItemKind::FireballScroll => Color::rgb(255, 0, 0),
        }
    }
}

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub count: u32,
}

impl Item {
    /// A single item.
    pub fn new(kind: ItemKind) -> Self {
        Self { kind, count: 1 }
    }

    pub fn with_count(kind: ItemKind, count: u32) -> Self {
        Self { kind, count }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Inventory label, with the stack size when more than one.
    pub fn label(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.name(), self.count)
        } else {
            self.name().to_string()
        }
    }

    /// Applies this item, held by `user` at `index` in their inventory.
    pub fn use_item(&self, world: &mut World, user: ActorId, index: usize) -> BurrowResult<ActionResult> {
        match self.kind {
            ItemKind::HealthPotion => {
                let stats = &world.actor(user)?.stats;
                if stats.hp >= stats.max_hp {
                    return Ok(ActionResult::Failure("You are already at full health.".to_string()));
                }
                world.message(format!("You drink the {}.", self.name()));
                combat::heal(world, user, HEALTH_POTION_AMOUNT)?;
                consume_item(world, user, index, self.kind)?;
                Ok(ActionResult::Success)
            }
            ItemKind::ConfusionScroll => {
                let cursor = initial_cursor(world, user)?;
                Ok(ActionResult::Poll(TilePrompt {
                    cursor,
                    targeting: Targeting::Single,
                    on_pick: PickTarget::Confuse {
                        item_index: index,
                        turns: CONFUSION_TURNS,
                    },
                }))
            }
            ItemKind::FireballScroll => {
                let cursor = initial_cursor(world, user)?;
                Ok(ActionResult::Poll(TilePrompt {
                    cursor,
                    targeting: Targeting::Area {
                        radius_squared: FIREBALL_RADIUS_SQUARED,
                    },
                    on_pick: PickTarget::Fireball {
                        item_index: index,
                        damage: FIREBALL_DAMAGE,
                        radius_squared: FIREBALL_RADIUS_SQUARED,
                    },
                }))
            }
        }
    }
}

/// Targeting starts on the nearest visible other actor, else on the user.
fn initial_cursor(world: &World, user: ActorId) -> BurrowResult<crate::game::Position> {
    let origin = world.actor(user)?.pos;
    let nearest = world.nearest_actor(origin, |actor| actor.id != user && world.is_visible(actor.pos));
    Ok(nearest.map_or(origin, |actor| actor.pos))
}

/// Removes one item of `kind` from `holder`'s inventory slot `index`.
///
/// The slot must still hold an item of the expected kind; anything else means
/// the index went stale and is reported as an invariant violation.
pub fn consume_item(world: &mut World, holder: ActorId, index: usize, kind: ItemKind) -> BurrowResult<()> {
    let inventory = &mut world.actor_mut(holder)?.stats.inventory;
    let stack = inventory.get_mut(index).ok_or_else(|| {
        BurrowError::InvariantViolation(format!("Inventory slot {} of {} is empty", index, holder))
    })?;
    if stack.kind != kind {
        return Err(BurrowError::InvariantViolation(format!(
            "Inventory slot {} of {} holds {}, expected {}",
            index,
            holder,
            stack.name(),
            kind.name()
        )));
    }
    stack.count = stack.count.saturating_sub(1);
    if stack.count == 0 {
        inventory.remove(index);
    }
    Ok(())
}

/// Adds `item` to `holder`'s inventory, merging with an existing stack.
pub fn give_item(world: &mut World, holder: ActorId, item: Item) -> BurrowResult<()> {
    let inventory = &mut world.actor_mut(holder)?.stats.inventory;
    match inventory.iter_mut().find(|stack| stack.kind == item.kind) {
        Some(stack) => stack.count += item.count,
        None => inventory.push(item),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{scheduler, Actor, Map, MapId, Position};
    use crate::generation::GenerationConfig;

    fn world_with_player() -> World {
        let mut world = World::new(1, GenerationConfig::for_testing(1));
        world.insert_map(Map::from_rows(MapId::dungeon(1), &["#####", "#...#", "#####"]));
        world.set_current_map(MapId::dungeon(1)).unwrap();
        world.add_actor(Actor::player(MapId::dungeon(1), Position::new(1, 1)));
        scheduler::update_fov(&mut world).unwrap();
        world
    }

    #[test]
    fn test_give_item_merges_stacks() {
        let mut world = world_with_player();
        give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::HealthPotion)).unwrap();
        give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::FireballScroll)).unwrap();
        give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::HealthPotion)).unwrap();

        let inventory = &world.player().unwrap().stats.inventory;
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory[0], Item::with_count(ItemKind::HealthPotion, 2));
        assert_eq!(inventory[0].label(), "health potion (x2)");
    }

    #[test]
    fn test_consume_item_decrements_then_removes() {
        let mut world = world_with_player();
        give_item(&mut world, ActorId::PLAYER, Item::with_count(ItemKind::HealthPotion, 2)).unwrap();

        consume_item(&mut world, ActorId::PLAYER, 0, ItemKind::HealthPotion).unwrap();
        assert_eq!(world.player().unwrap().stats.inventory[0].count, 1);
        consume_item(&mut world, ActorId::PLAYER, 0, ItemKind::HealthPotion).unwrap();
        assert!(world.player().unwrap().stats.inventory.is_empty());
    }

    #[test]
    fn test_consume_item_stale_index() {
        let mut world = world_with_player();
        give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::HealthPotion)).unwrap();

        let wrong_kind = consume_item(&mut world, ActorId::PLAYER, 0, ItemKind::ConfusionScroll);
        assert!(matches!(wrong_kind, Err(BurrowError::InvariantViolation(_))));
        let missing = consume_item(&mut world, ActorId::PLAYER, 4, ItemKind::HealthPotion);
        assert!(matches!(missing, Err(BurrowError::InvariantViolation(_))));
    }

    #[test]
    fn test_potion_at_full_health_is_kept() {
        let mut world = world_with_player();
        give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::HealthPotion)).unwrap();

        let item = Item::new(ItemKind::HealthPotion);
        let result = item.use_item(&mut world, ActorId::PLAYER, 0).unwrap();
        assert!(matches!(result, ActionResult::Failure(_)));
        assert_eq!(world.player().unwrap().stats.inventory.len(), 1);
    }

    #[test]
    fn test_potion_heals_and_is_consumed() {
        let mut world = world_with_player();
        give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::HealthPotion)).unwrap();
        world.player_mut().unwrap().stats.hp = 20;

        let item = Item::new(ItemKind::HealthPotion);
        let result = item.use_item(&mut world, ActorId::PLAYER, 0).unwrap();
        assert_eq!(result, ActionResult::Success);
        assert_eq!(world.player().unwrap().stats.hp, 24);
        assert!(world.player().unwrap().stats.inventory.is_empty());
        assert!(world.log.contains("Player heals 4 HP."));
    }

    #[test]
    fn test_scroll_asks_for_target() {
        let mut world = world_with_player();
        give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::FireballScroll)).unwrap();

        let item = Item::new(ItemKind::FireballScroll);
        match item.use_item(&mut world, ActorId::PLAYER, 0).unwrap() {
            ActionResult::Poll(prompt) => {
                assert_eq!(prompt.cursor, Position::new(1, 1));
                assert_eq!(prompt.targeting, Targeting::Area { radius_squared: FIREBALL_RADIUS_SQUARED });
            }
            other => panic!("expected a prompt, got {:?}", other),
        }
        // Nothing consumed until a tile is chosen.
        assert_eq!(world.player().unwrap().stats.inventory.len(), 1);
    }
}
