//! # Actions Module
//!
//! Everything an actor can do in one turn.
//!
//! [`Action::perform`] returns an [`ActionResult`]:
//! - `Success`: the action happened and the actor's turn is over
//! - `Failure`: nothing happened; the reason is shown to the player
//! - `Poll`: the action needs a target tile before it can happen
//!
//! `Err` is reserved for broken invariants, never for in-world refusals.

use crate::config;
use crate::game::{combat, item, ActorId, ItemKind, Position, World, STAIRS_DOWN, STAIRS_UP};
use crate::generation;
use crate::utils::first_step_toward;
use crate::BurrowResult;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which way a staircase leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StairDirection {
    Down,
    Up,
}

/// Shape of the tile selection a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Targeting {
    /// A single tile
    Single,
    /// A tile plus everything strictly within the squared radius around it
    Area { radius_squared: i32 },
}

/// What happens once a tile has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickTarget {
    Confuse { item_index: usize, turns: i32 },
    Fireball { item_index: usize, damage: i32, radius_squared: i32 },
}

impl PickTarget {
    /// The action that resolves this effect at `target`.
    pub fn at(self, target: Position) -> Action {
        match self {
            PickTarget::Confuse { item_index, turns } => Action::ConfuseAt {
                item_index,
                turns,
                target,
            },
            PickTarget::Fireball {
                item_index,
                damage,
                radius_squared,
            } => Action::FireballAt {
                item_index,
                damage,
                radius_squared,
                target,
            },
        }
    }
}

/// Request for a target tile, raised by an item that needs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePrompt {
    /// Where the selection cursor starts
    pub cursor: Position,
    pub targeting: Targeting,
    pub on_pick: PickTarget,
}

/// Outcome of performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Success,
    Failure(String),
    Poll(TilePrompt),
}

/// A single turn's worth of behavior for any actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Step by the given offset, attacking whoever stands there.
    /// The zero offset waits a turn.
    Bump(Position),
    /// Pick up the first item stack underfoot
    Pickup,
    /// Use the inventory item at this index
    UseItem(usize),
    /// Follow the staircase underfoot
    TakeStairs(StairDirection),
    /// Chase and attack the player
    HostileAi,
    /// Stumble in a random direction
    ConfusedAi,
    ConfuseAt {
        item_index: usize,
        turns: i32,
        target: Position,
    },
    FireballAt {
        item_index: usize,
        damage: i32,
        radius_squared: i32,
        target: Position,
    },
}

impl Action {
    /// Performs this action on behalf of `actor`.
    pub fn perform(&self, world: &mut World, actor: ActorId) -> BurrowResult<ActionResult> {
        match self {
            Action::Bump(offset) => bump(world, actor, *offset),
            Action::Pickup => pickup(world, actor),
            Action::UseItem(index) => use_item(world, actor, *index),
            Action::TakeStairs(direction) => take_stairs(world, actor, *direction),
            Action::HostileAi => hostile_ai(world, actor),
            Action::ConfusedAi => confused_ai(world, actor),
            Action::ConfuseAt {
                item_index,
                turns,
                target,
            } => confuse_at(world, actor, *item_index, *turns, *target),
            Action::FireballAt {
                item_index,
                damage,
                radius_squared,
                target,
            } => fireball_at(world, actor, *item_index, *damage, *radius_squared, *target),
        }
    }
}

fn bump(world: &mut World, actor: ActorId, offset: Position) -> BurrowResult<ActionResult> {
    if offset == Position::ZERO {
        return Ok(ActionResult::Success);
    }

    let target = world.actor(actor)?.pos + offset;
    if let Some(other) = world.actors_at(target).into_iter().find(|id| *id != actor) {
        combat::attack(world, actor, other)?;
        return Ok(ActionResult::Success);
    }

    if world.active_map()?.is_walkable(target) {
        world.actor_mut(actor)?.pos = target;
        Ok(ActionResult::Success)
    } else {
        Ok(ActionResult::Failure("That way is blocked.".to_string()))
    }
}

fn pickup(world: &mut World, actor: ActorId) -> BurrowResult<ActionResult> {
    let pos = world.actor(actor)?.pos;
    let Some(found) = world.active_map_mut()?.take_first_item(pos) else {
        return Ok(ActionResult::Failure("Nothing to pickup!".to_string()));
    };

    let name = found.name();
    item::give_item(world, actor, found)?;
    if actor.is_player() {
        world.message(format!("You take the {}.", name));
    }
    Ok(ActionResult::Success)
}

fn use_item(world: &mut World, actor: ActorId, index: usize) -> BurrowResult<ActionResult> {
    let Some(held) = world.actor(actor)?.stats.inventory.get(index).cloned() else {
        return Ok(ActionResult::Failure("You don't have that item.".to_string()));
    };
    held.use_item(world, actor, index)
}

fn take_stairs(world: &mut World, actor: ActorId, direction: StairDirection) -> BurrowResult<ActionResult> {
    if direction == StairDirection::Up && world.current_map_id.level <= 1 {
        return Ok(ActionResult::Failure("You can't leave the dungeon that way.".to_string()));
    }

    let pos = world.actor(actor)?.pos;
    let wanted = match direction {
        StairDirection::Down => STAIRS_DOWN,
        StairDirection::Up => STAIRS_UP,
    };
    let on_stairs = world
        .active_map()?
        .fixture_at(pos)
        .is_some_and(|fixture| fixture.name == wanted);
    if !on_stairs {
        return Ok(ActionResult::Failure("There are no stairs here.".to_string()));
    }

    let current = world.current_map_id.clone();
    let level = match direction {
        StairDirection::Down => current.level + 1,
        StairDirection::Up => current.level - 1,
    };
    let destination = crate::game::MapId::new(current.name.clone(), level);

    if world.maps.contains_key(&destination) {
        world.set_current_map(destination.clone())?;
    } else {
        generation::generate_level(world, level)?;
    }

    let arrival = {
        let map = world.active_map()?;
        match direction {
            StairDirection::Down => map.entrance,
            StairDirection::Up => map.find_fixture(STAIRS_DOWN).unwrap_or(map.entrance),
        }
    };
    {
        let traveler = world.actor_mut(actor)?;
        traveler.pos = arrival;
        traveler.map_id = destination.clone();
    }
    world.refresh_active_actors();

    info!("{} moved from {} to {}", actor, current, destination);
    let text = match direction {
        StairDirection::Down => "You descend deeper into the dungeon.",
        StairDirection::Up => "You climb back up the stairs.",
    };
    world.log.append(text, config::TEXT_COLOR_STATUS);
    Ok(ActionResult::Success)
}

fn hostile_ai(world: &mut World, actor: ActorId) -> BurrowResult<ActionResult> {
    let pos = world.actor(actor)?.pos;
    if !world.is_visible(pos) || !world.player_is_alive() {
        return Ok(ActionResult::Success);
    }

    let goal = world.player()?.pos;
    if pos.chebyshev_distance(goal) <= 1 {
        return bump(world, actor, goal - pos);
    }

    let step = first_step_toward(pos, goal, |next| world.is_free(next));
    match step {
        Some(next) => bump(world, actor, next - pos),
        None => Ok(ActionResult::Success),
    }
}

fn confused_ai(world: &mut World, actor: ActorId) -> BurrowResult<ActionResult> {
    let offset = Position::new(world.rng.gen_range(-1..=1), world.rng.gen_range(-1..=1));
    // Stumbling into a wall still uses up the turn.
    match bump(world, actor, offset)? {
        ActionResult::Failure(reason) => {
            debug!("{} stumbles in place: {}", actor, reason);
            Ok(ActionResult::Success)
        }
        other => Ok(other),
    }
}

fn confuse_at(
    world: &mut World,
    actor: ActorId,
    item_index: usize,
    turns: i32,
    target: Position,
) -> BurrowResult<ActionResult> {
    if !world.is_visible(target) {
        return Ok(ActionResult::Failure("You can't see anything there!".to_string()));
    }
    let victims: Vec<ActorId> = world
        .actors_at(target)
        .into_iter()
        .filter(|id| *id != actor)
        .collect();
    if victims.is_empty() {
        return Ok(ActionResult::Failure("There is no one there to confuse.".to_string()));
    }

    for id in victims {
        let victim = world.actor_mut(id)?;
        victim.stats.confused_turns = victim.stats.confused_turns.max(turns);
        let name = victim.name.clone();
        world.log.append(
            format!("The eyes of the {} look vacant, as it starts to stumble around!", name),
            config::TEXT_COLOR_STATUS,
        );
    }
    item::consume_item(world, actor, item_index, ItemKind::ConfusionScroll)?;
    Ok(ActionResult::Success)
}

fn fireball_at(
    world: &mut World,
    actor: ActorId,
    item_index: usize,
    damage: i32,
    radius_squared: i32,
    target: Position,
) -> BurrowResult<ActionResult> {
    if !world.is_visible(target) {
        return Ok(ActionResult::Failure("You can't see anything there!".to_string()));
    }
    let caught: Vec<(ActorId, String)> = world
        .active()
        .filter(|other| other.pos.distance_squared(target) < radius_squared)
        .map(|other| (other.id, other.name.clone()))
        .collect();
    if caught.is_empty() {
        return Ok(ActionResult::Failure("There are no targets in the blast radius.".to_string()));
    }

    world.log.append(
        "The fireball explodes, burning everything within range!",
        config::TEXT_COLOR_ENEMY_ATTACK,
    );
    for (id, name) in caught {
        let text = if id.is_player() {
            format!("You are engulfed in a fiery explosion, taking {} damage!", damage)
        } else {
            format!("The {} is engulfed in a fiery explosion, taking {} damage!", name, damage)
        };
        world.log.append(text, config::TEXT_COLOR_ENEMY_ATTACK);
        combat::apply_damage(world, id, damage)?;
    }
    item::consume_item(world, actor, item_index, ItemKind::FireballScroll)?;
    Ok(ActionResult::Success)
}
