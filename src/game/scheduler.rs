//! # Scheduler Module
//!
//! Ends the player's turn: refreshes the field of view, lets every other
//! active actor act once, then reports whether the player leveled up or died.

use crate::config;
use crate::game::{fov, Action, ActionResult, ActorId, World};
use crate::{BurrowError, BurrowResult};
use log::{debug, trace};

/// What the screen layer should do after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Back to normal play
    Continue,
    /// The player has enough experience for the next level
    LevelUp,
    /// The player has no hit points left
    Dead,
}

/// Recomputes the player's field of view on the active map.
pub fn update_fov(world: &mut World) -> BurrowResult<()> {
    let origin = world.player()?.pos;
    let map = world.active_map_mut()?;
    fov::compute_fov(map, origin, config::FOV_RADIUS);
    Ok(())
}

/// Finishes a player turn that completed successfully.
///
/// The field of view is recomputed once, before anyone else acts. The player
/// must be at the front of the schedule both before and after the sweep;
/// anything else is an invariant violation.
pub fn end_player_turn(world: &mut World) -> BurrowResult<TurnOutcome> {
    ensure_player_first(world)?;
    update_fov(world)?;

    if world.player_is_alive() {
        run_non_player_turns(world)?;
        ensure_player_first(world)?;
    }

    let player = world.player()?;
    if player.stats.hp <= 0 {
        return Ok(TurnOutcome::Dead);
    }
    if player.stats.xp >= config::next_level_xp(player.stats.level) {
        return Ok(TurnOutcome::LevelUp);
    }
    Ok(TurnOutcome::Continue)
}

/// Gives each active non-player actor one action, in id order.
///
/// Actors killed earlier in the sweep are skipped. Failures are dropped:
/// a monster that cannot act simply loses its turn.
pub fn run_non_player_turns(world: &mut World) -> BurrowResult<()> {
    let ids: Vec<ActorId> = world
        .active_actors
        .iter()
        .copied()
        .filter(|id| !id.is_player())
        .collect();

    for id in ids {
        let Some(actor) = world.actors.get(&id) else {
            trace!("{} removed earlier in the sweep", id);
            continue;
        };
        let Some(action) = actor.next_action() else {
            continue;
        };

        match action.perform(world, id)? {
            ActionResult::Success => {}
            ActionResult::Failure(reason) => debug!("{} failed to act: {}", id, reason),
            ActionResult::Poll(_) => debug!("{} asked for a target; ignored", id),
        }

        if action == Action::ConfusedAi {
            recover_from_confusion(world, id)?;
        }

        if !world.player_is_alive() {
            break;
        }
    }
    Ok(())
}

/// Stat raised when the player levels up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUpChoice {
    /// +20 hp and max hp
    Constitution,
    /// +1 attack
    Strength,
    /// +1 defense
    Agility,
}

/// Spends the experience for the player's next level on `choice`.
pub fn apply_level_up(world: &mut World, choice: LevelUpChoice) -> BurrowResult<()> {
    let stats = &mut world.player_mut()?.stats;
    let threshold = config::next_level_xp(stats.level);
    if stats.xp < threshold {
        return Err(BurrowError::InvalidState(format!(
            "Level up needs {} xp, player has {}",
            threshold, stats.xp
        )));
    }
    match choice {
        LevelUpChoice::Constitution => {
            stats.max_hp += 20;
            stats.hp += 20;
        }
        LevelUpChoice::Strength => stats.attack += 1,
        LevelUpChoice::Agility => stats.defense += 1,
    }
    stats.xp -= threshold;
    stats.level += 1;
    debug!("Player reached level {} choosing {:?}", stats.level, choice);
    Ok(())
}

fn recover_from_confusion(world: &mut World, id: ActorId) -> BurrowResult<()> {
    let Some(actor) = world.actors.get_mut(&id) else {
        return Ok(());
    };
    actor.stats.confused_turns = (actor.stats.confused_turns - 1).max(0);
    if actor.stats.confused_turns == 0 {
        let (name, pos) = (actor.name.clone(), actor.pos);
        if world.is_visible(pos) {
            world
                .log
                .append(format!("The {} is no longer confused.", name), config::TEXT_COLOR_STATUS);
        }
    }
    Ok(())
}

fn ensure_player_first(world: &World) -> BurrowResult<()> {
    match world.schedule.front() {
        Some(id) if id.is_player() => Ok(()),
        other => Err(BurrowError::InvariantViolation(format!(
            "Player must be first in the schedule, found {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, Ai, Color, Map, MapId, Position, Stats};
    use crate::generation::GenerationConfig;

    fn room_world() -> World {
        let mut world = World::new(5, GenerationConfig::for_testing(5));
        world.insert_map(Map::from_rows(
            MapId::dungeon(1),
            &["#######", "#.....#", "#.....#", "#######"],
        ));
        world.set_current_map(MapId::dungeon(1)).unwrap();
        world.add_actor(Actor::player(MapId::dungeon(1), Position::new(1, 1)));
        world.schedule.push_back(ActorId::PLAYER);
        world
    }

    fn spawn(world: &mut World, pos: Position, attack: i32) -> ActorId {
        let id = world.allocate_actor_id();
        world.add_actor(
            Actor::new(id, "orc", 'o', Color::WHITE, MapId::dungeon(1), pos)
                .with_stats(Stats::new(10, attack, 0, 35))
                .with_ai(Ai::Hostile),
        );
        id
    }

    #[test]
    fn test_player_must_lead_schedule() {
        let mut world = room_world();
        world.schedule.clear();
        world.schedule.push_back(ActorId(9));
        assert!(matches!(
            end_player_turn(&mut world),
            Err(BurrowError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_adjacent_monster_attacks_during_sweep() {
        let mut world = room_world();
        spawn(&mut world, Position::new(2, 1), 3);
        let outcome = end_player_turn(&mut world).unwrap();
        assert_eq!(outcome, TurnOutcome::Continue);
        assert_eq!(world.player().unwrap().stats.hp, 29);
        assert!(world.log.contains("orc attacks Player for 1 hit points."));
    }

    #[test]
    fn test_death_reported() {
        let mut world = room_world();
        spawn(&mut world, Position::new(2, 1), 50);
        assert_eq!(end_player_turn(&mut world).unwrap(), TurnOutcome::Dead);
        assert!(world.player().is_ok());
    }

    #[test]
    fn test_level_up_reported() {
        let mut world = room_world();
        world.player_mut().unwrap().stats.xp = config::next_level_xp(1);
        assert_eq!(end_player_turn(&mut world).unwrap(), TurnOutcome::LevelUp);
    }

    #[test]
    fn test_confusion_wears_off() {
        let mut world = room_world();
        let orc = spawn(&mut world, Position::new(5, 2), 3);
        world.actor_mut(orc).unwrap().stats.confused_turns = 2;

        end_player_turn(&mut world).unwrap();
        assert_eq!(world.actor(orc).unwrap().stats.confused_turns, 1);
        end_player_turn(&mut world).unwrap();
        assert_eq!(world.actor(orc).unwrap().stats.confused_turns, 0);
        assert!(world.log.contains("The orc is no longer confused."));
    }

    #[test]
    fn test_monsters_on_other_maps_do_not_act() {
        let mut world = room_world();
        let id = world.allocate_actor_id();
        world.add_actor(
            Actor::new(id, "troll", 'T', Color::WHITE, MapId::dungeon(2), Position::new(2, 1))
                .with_stats(Stats::new(16, 50, 1, 100))
                .with_ai(Ai::Hostile),
        );
        assert_eq!(end_player_turn(&mut world).unwrap(), TurnOutcome::Continue);
        assert_eq!(world.player().unwrap().stats.hp, 30);
    }

    #[test]
    fn test_apply_level_up() {
        let mut world = room_world();
        world.player_mut().unwrap().stats.xp = 400;
        apply_level_up(&mut world, LevelUpChoice::Constitution).unwrap();
        let stats = &world.player().unwrap().stats;
        assert_eq!((stats.hp, stats.max_hp), (50, 50));
        assert_eq!(stats.level, 2);
        assert_eq!(stats.xp, 50);

        assert!(apply_level_up(&mut world, LevelUpChoice::Strength).is_err());
    }

    #[test]
    fn test_fov_refreshed_before_monsters_act() {
        let mut world = room_world();
        let orc = spawn(&mut world, Position::new(2, 1), 3);
        world.active_map_mut().unwrap().visible.fill(false);

        end_player_turn(&mut world).unwrap();
        assert!(world.is_visible(Position::new(5, 2)));
        // Hostile AI only acts from a visible tile.
        assert_eq!(world.player().unwrap().stats.hp, 29);
        assert!(world.actor(orc).is_ok());
    }
}
