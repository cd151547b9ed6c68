//! End-to-end play through the scene manager, one input event at a time.

use burrow::{
    config, give_item, update_fov, Actor, ActorId, Ai, BurrowResult, Color, GameContext,
    GenerationConfig, InputEvent, Item, ItemKind, Map, MapId, MemoryStore, Position,
    SceneManager, Screen, Stats, World, STAIRS_DOWN,
};

const ROOM: [&str; 5] = [
    "#########",
    "#.......#",
    "#.......#",
    "#.......#",
    "#########",
];

fn room_world() -> World {
    let mut world = World::new(9, GenerationConfig::for_testing(9));
    world.insert_map(Map::from_rows(MapId::dungeon(1), &ROOM));
    world.set_current_map(MapId::dungeon(1)).unwrap();
    world.add_actor(Actor::player(MapId::dungeon(1), Position::new(1, 1)));
    world.schedule.push_back(ActorId::PLAYER);
    world
}

fn spawn_orc(world: &mut World, pos: Position, stats: Stats) -> ActorId {
    let id = world.allocate_actor_id();
    world.add_actor(
        Actor::new(id, "orc", 'o', Color::WHITE, MapId::dungeon(1), pos)
            .with_stats(stats)
            .with_ai(Ai::Hostile),
    )
}

/// A scene manager already playing `world`.
fn playing(mut world: World) -> SceneManager {
    update_fov(&mut world).unwrap();
    let ctx = GameContext::new(Box::new(MemoryStore::new()))
        .with_generation(GenerationConfig::for_testing(9))
        .with_seed(Some(9));
    let mut scenes = SceneManager::new(ctx);
    scenes.context_mut().world = Some(world);
    scenes.handle_event(InputEvent::Hotkey('c')).unwrap();
    assert_eq!(*scenes.screen(), Screen::InGame);
    scenes
}

fn current(scenes: &SceneManager) -> &World {
    scenes.context().world().unwrap()
}

#[test]
fn test_new_game_starts_in_game() -> BurrowResult<()> {
    let ctx = GameContext::new(Box::new(MemoryStore::new()))
        .with_generation(GenerationConfig::for_testing(1))
        .with_seed(Some(1));
    let mut scenes = SceneManager::new(ctx);
    scenes.handle_event(InputEvent::Hotkey('n'))?;

    assert_eq!(*scenes.screen(), Screen::InGame);
    let world = scenes.context().world()?;
    assert_eq!(world.current_map_id, MapId::dungeon(1));
    assert!(world.is_visible(world.player()?.pos));
    assert!(world.log.contains("Hello and welcome, adventurer, to yet another dungeon!"));
    Ok(())
}

#[test]
fn test_bump_attacks_and_monsters_answer() -> BurrowResult<()> {
    let mut world = room_world();
    let orc = spawn_orc(&mut world, Position::new(2, 1), Stats::new(10, 3, 0, 35));
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Direction(Position::new(1, 0)))?;

    assert_eq!(*scenes.screen(), Screen::InGame);
    let world = current(&scenes);
    assert_eq!(world.actor(orc)?.stats.hp, 5);
    assert!(world.log.contains("Player attacks orc for 5 hit points."));
    assert_eq!(world.player()?.stats.hp, 29);
    assert_eq!(world.player()?.pos, Position::new(1, 1));
    Ok(())
}

#[test]
fn test_walking_into_a_wall_does_not_end_the_turn() -> BurrowResult<()> {
    let mut world = room_world();
    spawn_orc(&mut world, Position::new(2, 2), Stats::new(10, 3, 0, 35));
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Direction(Position::new(0, -1)))?;

    let world = current(&scenes);
    assert_eq!(world.log.last_text(), Some("That way is blocked."));
    assert_eq!(world.player()?.stats.hp, 30);
    Ok(())
}

#[test]
fn test_level_up_constitution() -> BurrowResult<()> {
    let mut world = room_world();
    world.player_mut()?.stats.xp = config::next_level_xp(1) - 1;
    spawn_orc(&mut world, Position::new(2, 1), Stats::new(1, 0, 0, 35));
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Direction(Position::new(1, 0)))?;
    assert!(matches!(scenes.screen(), Screen::LevelUp(_)));
    assert!(current(&scenes)
        .log
        .contains("Your battle skills grow stronger! You reached level 2."));

    scenes.handle_event(InputEvent::Confirm)?;
    assert_eq!(*scenes.screen(), Screen::InGame);
    let stats = &current(&scenes).player()?.stats;
    assert_eq!((stats.hp, stats.max_hp), (50, 50));
    assert_eq!(stats.level, 2);
    assert_eq!(stats.xp, 34);
    Ok(())
}

#[test]
fn test_death_wins_over_level_up() -> BurrowResult<()> {
    let mut world = room_world();
    world.player_mut()?.stats.xp = 10_000;
    spawn_orc(&mut world, Position::new(2, 1), Stats::new(10, 100, 0, 35));
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Direction(Position::ZERO))?;
    assert_eq!(*scenes.screen(), Screen::Dead);
    assert!(current(&scenes).log.contains("You have died!"));

    // Anything but escape is ignored once dead.
    scenes.handle_event(InputEvent::Direction(Position::new(1, 0)))?;
    assert_eq!(*scenes.screen(), Screen::Dead);

    scenes.handle_event(InputEvent::Cancel)?;
    assert!(matches!(scenes.screen(), Screen::MainMenu(_)));
    assert!(scenes.context().world.is_none());
    assert!(scenes.context_mut().store.load()?.is_none());
    Ok(())
}

#[test]
fn test_fireball_cancel_keeps_scroll() -> BurrowResult<()> {
    let mut world = room_world();
    spawn_orc(&mut world, Position::new(5, 2), Stats::new(10, 3, 0, 35));
    give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::FireballScroll))?;
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Hotkey('i'))?;
    scenes.handle_event(InputEvent::Hotkey('a'))?;
    assert!(matches!(scenes.screen(), Screen::PickTileAreaOfEffect { .. }));
    assert_eq!(scenes.context().controller.cursor, Some(Position::new(5, 2)));

    scenes.handle_event(InputEvent::Cancel)?;
    assert!(matches!(scenes.screen(), Screen::PickInventory(_)));
    scenes.handle_event(InputEvent::Cancel)?;
    assert_eq!(*scenes.screen(), Screen::InGame);
    assert_eq!(current(&scenes).player()?.stats.inventory.len(), 1);
    Ok(())
}

#[test]
fn test_fireball_kills_target() -> BurrowResult<()> {
    let mut world = room_world();
    let orc = spawn_orc(&mut world, Position::new(6, 2), Stats::new(10, 3, 0, 35));
    give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::FireballScroll))?;
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Hotkey('i'))?;
    scenes.handle_event(InputEvent::Hotkey('a'))?;
    scenes.handle_event(InputEvent::Confirm)?;

    assert_eq!(*scenes.screen(), Screen::InGame);
    let world = current(&scenes);
    assert!(world.actor(orc).is_err());
    assert!(world.log.contains("The orc dies! You gain 35 xp."));
    assert_eq!(world.player()?.stats.xp, 35);
    assert!(world.player()?.stats.inventory.is_empty());
    assert_eq!(scenes.context().controller.cursor, None);
    Ok(())
}

#[test]
fn test_confusion_on_empty_tile_returns_to_inventory() -> BurrowResult<()> {
    let mut world = room_world();
    give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::ConfusionScroll))?;
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Hotkey('i'))?;
    scenes.handle_event(InputEvent::Hotkey('a'))?;
    assert!(matches!(scenes.screen(), Screen::PickTile(_)));
    assert_eq!(scenes.context().controller.cursor, Some(Position::new(1, 1)));

    scenes.handle_event(InputEvent::Hotkey('l'))?;
    assert_eq!(scenes.context().controller.cursor, Some(Position::new(2, 1)));
    scenes.handle_event(InputEvent::Confirm)?;

    assert!(matches!(scenes.screen(), Screen::PickInventory(_)));
    let world = current(&scenes);
    assert_eq!(world.log.last_text(), Some("There is no one there to confuse."));
    assert_eq!(world.player()?.stats.inventory.len(), 1);
    Ok(())
}

#[test]
fn test_confused_monster_stumbles() -> BurrowResult<()> {
    let mut world = room_world();
    let orc = spawn_orc(&mut world, Position::new(4, 2), Stats::new(10, 3, 0, 35));
    give_item(&mut world, ActorId::PLAYER, Item::new(ItemKind::ConfusionScroll))?;
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Hotkey('i'))?;
    scenes.handle_event(InputEvent::Hotkey('a'))?;
    scenes.handle_event(InputEvent::PointerClicked(Position::new(4, 2)))?;

    assert_eq!(*scenes.screen(), Screen::InGame);
    let world = current(&scenes);
    assert!(world
        .log
        .contains("The eyes of the orc look vacant, as it starts to stumble around!"));
    assert_eq!(world.actor(orc)?.stats.confused_turns, 9);
    assert!(world.player()?.stats.inventory.is_empty());
    Ok(())
}

#[test]
fn test_drinking_a_potion() -> BurrowResult<()> {
    let mut world = room_world();
    world.player_mut()?.stats.hp = 20;
    give_item(&mut world, ActorId::PLAYER, Item::with_count(ItemKind::HealthPotion, 2))?;
    let mut scenes = playing(world);

    scenes.handle_event(InputEvent::Hotkey('i'))?;
    scenes.handle_event(InputEvent::Hotkey('a'))?;

    assert_eq!(*scenes.screen(), Screen::InGame);
    let player = current(&scenes).player()?;
    assert_eq!(player.stats.hp, 24);
    assert_eq!(player.stats.inventory[0].count, 1);
    Ok(())
}

#[test]
fn test_stairs_round_trip() -> BurrowResult<()> {
    let ctx = GameContext::new(Box::new(MemoryStore::new()))
        .with_generation(GenerationConfig::for_testing(3))
        .with_seed(Some(3));
    let mut scenes = SceneManager::new(ctx);
    scenes.handle_event(InputEvent::Hotkey('n'))?;

    let stairs = {
        let world = scenes.context_mut().world_mut()?;
        let stairs = world
            .active_map()?
            .find_fixture(STAIRS_DOWN)
            .expect("level 1 has stairs down");
        world.player_mut()?.pos = stairs;
        stairs
    };

    scenes.handle_event(InputEvent::Hotkey('>'))?;
    {
        let world = current(&scenes);
        assert_eq!(world.current_map_id, MapId::dungeon(2));
        assert_eq!(world.player()?.map_id, MapId::dungeon(2));
        assert!(world.log.contains("You descend deeper into the dungeon."));
    }

    assert_eq!(*scenes.screen(), Screen::InGame);
    let entrance = current(&scenes).active_map()?.entrance;
    assert_eq!(current(&scenes).player()?.pos, entrance);

    scenes.handle_event(InputEvent::Hotkey('<'))?;
    let world = current(&scenes);
    assert_eq!(world.current_map_id, MapId::dungeon(1));
    assert_eq!(world.player()?.pos, stairs);
    assert!(world.log.contains("You climb back up the stairs."));
    Ok(())
}

#[test]
fn test_no_stairs_here() -> BurrowResult<()> {
    let mut scenes = playing(room_world());
    scenes.handle_event(InputEvent::Hotkey('>'))?;
    assert_eq!(current(&scenes).log.last_text(), Some("There are no stairs here."));
    assert_eq!(*scenes.screen(), Screen::InGame);
    Ok(())
}
