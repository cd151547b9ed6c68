//! # Combat Module
//!
//! Melee resolution, damage, healing and death.
//!
//! Messages about actors the player cannot see are suppressed; the player's
//! own attacks, wounds and death are always reported.

use crate::config;
use crate::game::{ActorId, World};
use crate::{BurrowError, BurrowResult};
use log::debug;

/// Damage of a single hit: attack minus defense, never negative.
///
/// # Examples
///
/// ```
/// use burrow::game::combat::calculate_damage;
///
/// assert_eq!(calculate_damage(5, 2), 3);
/// assert_eq!(calculate_damage(3, 4), 0);
/// ```
pub fn calculate_damage(attack: i32, defense: i32) -> i32 {
    (attack - defense).max(0)
}

/// Resolves a melee attack from `attacker` on `defender`.
///
/// The message is logged only if either tile is visible.
pub fn attack(world: &mut World, attacker: ActorId, defender: ActorId) -> BurrowResult<()> {
    let (attacker_name, attack_power, attacker_pos) = {
        let actor = world.actor(attacker)?;
        (actor.name.clone(), actor.stats.attack, actor.pos)
    };
    let (defender_name, defense, defender_pos) = {
        let actor = world.actor(defender)?;
        (actor.name.clone(), actor.stats.defense, actor.pos)
    };

    let damage = calculate_damage(attack_power, defense);
    if world.is_visible(attacker_pos) || world.is_visible(defender_pos) {
        let color = if attacker.is_player() {
            config::TEXT_COLOR_PLAYER_ATTACK
        } else {
            config::TEXT_COLOR_ENEMY_ATTACK
        };
        let text = if damage > 0 {
            format!("{} attacks {} for {} hit points.", attacker_name, defender_name, damage)
        } else {
            format!("{} attacks {} but it has no effect!", attacker_name, defender_name)
        };
        world.log.append(text, color);
    }

    apply_damage(world, defender, damage)
}

/// Subtracts `amount` hit points from `target`, killing it at zero.
pub fn apply_damage(world: &mut World, target: ActorId, amount: i32) -> BurrowResult<()> {
    let stats = &mut world.actor_mut(target)?.stats;
    stats.hp -= amount;
    if stats.hp <= 0 {
        kill(world, target)?;
    }
    Ok(())
}

/// Restores up to `amount` hit points without exceeding the maximum.
///
/// Returns the number of hit points actually recovered. The message is logged
/// only if the target's tile is visible.
pub fn heal(world: &mut World, target: ActorId, amount: i32) -> BurrowResult<i32> {
    let actor = world.actor_mut(target)?;
    let recovered = amount.min(actor.stats.max_hp - actor.stats.hp).max(0);
    actor.stats.hp += recovered;
    let (name, pos) = (actor.name.clone(), actor.pos);

    if world.is_visible(pos) {
        world.log.append(
            format!("{} heals {} HP.", name, recovered),
            config::TEXT_COLOR_HEALTH_RECOVERED,
        );
    }
    Ok(recovered)
}

/// Handles an actor reaching zero hit points.
///
/// The player stays in place and in the world; the scene layer notices the
/// death after the turn. A monster awards its experience to the player and is
/// removed.
pub fn kill(world: &mut World, target: ActorId) -> BurrowResult<()> {
    if target.is_player() {
        world.log.append("You have died!", config::TEXT_COLOR_PLAYER_DIE);
        return Ok(());
    }

    let (name, xp, pos) = {
        let actor = world.actor(target)?;
        (actor.name.clone(), actor.stats.xp, actor.pos)
    };
    world.player_mut()?.stats.xp += xp;
    if world.is_visible(pos) {
        world
            .log
            .append(format!("The {} dies! You gain {} xp.", name, xp), config::TEXT_COLOR_ENEMY_DIE);
    }
    debug!("{} ({}) destroyed, awarding {} xp", name, target, xp);
    destroy(world, target)
}

/// Removes an actor from the world entirely.
pub fn destroy(world: &mut World, target: ActorId) -> BurrowResult<()> {
    if target.is_player() {
        return Err(BurrowError::InvariantViolation(
            "The player cannot be removed from the world".to_string(),
        ));
    }
    world.active_actors.remove(&target);
    world.schedule.retain(|id| *id != target);
    world
        .actors
        .remove(&target)
        .map(|_| ())
        .ok_or_else(|| BurrowError::InvalidState(format!("Actor {} not found", target)))
}
