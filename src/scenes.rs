//! # Scene Management System
//!
//! The screen state machine. Each [`Screen`] turns one [`InputEvent`] into a
//! [`StateResult`], and the [`SceneManager`] applies that result: switching
//! screens, running the non-player sweep, saving or quitting.

use crate::config;
use crate::game::{
    apply_level_up, end_player_turn, Action, ActionResult, ActorId, LevelUpChoice, PickTarget,
    Position, StairDirection, TilePrompt, Targeting, TurnOutcome, World,
};
use crate::generation::{new_world, GenerationConfig};
use crate::input::{vi_direction, InputEvent};
use crate::persistence::SaveStore;
use crate::rendering::{draw_inventory, draw_menu, render_all, render_area, Console};
use crate::{BurrowError, BurrowResult};
use log::{debug, info, warn};

/// Per-session UI state that is not part of the saved world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controller {
    /// Tile under the pointer or the targeting cursor
    pub cursor: Option<Position>,
}

/// Everything a screen may touch while handling an event.
pub struct GameContext {
    /// The game in progress, if any
    pub world: Option<World>,
    pub controller: Controller,
    pub store: Box<dyn SaveStore>,
    /// Settings for new games; the seed is replaced per game
    pub generation: GenerationConfig,
    /// Fixed seed for new games, otherwise a random one is drawn
    pub seed: Option<u64>,
}

impl GameContext {
    /// Creates a context with no game loaded.
    pub fn new(store: Box<dyn SaveStore>) -> Self {
        Self {
            world: None,
            controller: Controller::default(),
            store,
            generation: GenerationConfig::default(),
            seed: None,
        }
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn world(&self) -> BurrowResult<&World> {
        self.world
            .as_ref()
            .ok_or_else(|| BurrowError::InvalidState("No game in progress".to_string()))
    }

    pub fn world_mut(&mut self) -> BurrowResult<&mut World> {
        self.world
            .as_mut()
            .ok_or_else(|| BurrowError::InvalidState("No game in progress".to_string()))
    }

    /// Saves the world if there is one and the player is still alive.
    pub fn save_if_live(&mut self) -> BurrowResult<()> {
        if let Some(world) = &self.world {
            if world.player_is_alive() {
                self.store.save(world)?;
            }
        }
        Ok(())
    }

    /// Drops the current game and deletes its save.
    pub fn discard_world(&mut self) -> BurrowResult<()> {
        self.world = None;
        self.controller.cursor = None;
        self.store.clear()
    }

    fn start_new_game(&mut self) -> BurrowResult<()> {
        let mut generation = self.generation.clone();
        generation.seed = self.seed.unwrap_or_else(rand::random);
        info!("Starting a new game with seed {}", generation.seed);
        self.world = Some(new_world(generation)?);
        self.controller.cursor = None;
        Ok(())
    }

    fn continue_game(&mut self) -> BurrowResult<bool> {
        if self.world.as_ref().is_some_and(World::player_is_alive) {
            return Ok(true);
        }
        match self.store.load()? {
            Some(world) => {
                self.world = Some(world);
                self.controller.cursor = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// What a screen asks the manager to do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum StateResult {
    /// Stay on the current screen
    None,
    /// Switch to another screen
    Change(Screen),
    /// Save if the player is alive, then stop
    Quit,
    /// The player's turn is over; run everyone else
    EndTurn,
    /// Back to plain in-game play
    Reset,
}

/// Commands a menu row can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    NewGame,
    Continue,
    Exit,
    LevelUp(LevelUpChoice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub hotkey: Option<char>,
    pub command: MenuCommand,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, hotkey: Option<char>, command: MenuCommand) -> Self {
        Self {
            label: label.into(),
            hotkey,
            command,
        }
    }
}

/// A vertical list of options with a highlighted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
    /// Highlighted row; may point past the list when the pointer is elsewhere
    pub selected: i32,
}

impl Menu {
    pub fn new(title: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
        }
    }

    /// The title screen menu.
    pub fn main_menu() -> Self {
        Self::new(
            "BURROW",
            vec![
                MenuItem::new("[N] Play a new game", Some('n'), MenuCommand::NewGame),
                MenuItem::new("[C] Continue last game", Some('c'), MenuCommand::Continue),
                MenuItem::new("[Q] Quit", Some('q'), MenuCommand::Exit),
            ],
        )
    }

    /// The stat choice offered when the player levels up.
    pub fn level_up() -> Self {
        Self::new(
            "Level up! Choose a stat to raise:",
            vec![
                MenuItem::new(
                    "Constitution (+20 HP)",
                    None,
                    MenuCommand::LevelUp(LevelUpChoice::Constitution),
                ),
                MenuItem::new(
                    "Strength (+1 attack)",
                    None,
                    MenuCommand::LevelUp(LevelUpChoice::Strength),
                ),
                MenuItem::new(
                    "Agility (+1 defense)",
                    None,
                    MenuCommand::LevelUp(LevelUpChoice::Agility),
                ),
            ],
        )
    }

    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(|item| item.label.clone()).collect()
    }

    /// The highlighted row, if it is a real one.
    pub fn selected_index(&self) -> Option<usize> {
        usize::try_from(self.selected)
            .ok()
            .filter(|&index| index < self.items.len())
    }

    pub fn selected_command(&self) -> Option<MenuCommand> {
        self.selected_index().map(|index| self.items[index].command)
    }

    /// Moves the highlight by `delta` rows, wrapping around.
    pub fn move_selection(&mut self, delta: i32) {
        let len = self.items.len() as i32;
        if len == 0 {
            return;
        }
        let current = self.selected.clamp(0, len - 1);
        self.selected = (current + delta).rem_euclid(len);
    }

    /// Updates the highlight and returns the command chosen by `event`, if any.
    pub fn handle(&mut self, event: InputEvent) -> Option<MenuCommand> {
        match event {
            InputEvent::Direction(dir) if dir.x == 0 && dir.y != 0 => {
                self.move_selection(dir.y.signum());
                None
            }
            InputEvent::Confirm => self.selected_command(),
            InputEvent::Hotkey(ch) => {
                let ch = ch.to_ascii_lowercase();
                let index = self.items.iter().position(|item| item.hotkey == Some(ch))?;
                self.selected = index as i32;
                Some(self.items[index].command)
            }
            InputEvent::PointerMoved(pos) => {
                self.selected = pos.y - config::MENU_ORIGIN.y;
                None
            }
            InputEvent::PointerClicked(pos) => {
                self.selected = pos.y - config::MENU_ORIGIN.y;
                self.selected_command()
            }
            _ => None,
        }
    }
}

/// Targeting state waiting for the player to choose a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePicker {
    /// Screen restored on cancel
    pub parent: Box<Screen>,
    pub on_pick: PickTarget,
}

/// Inventory letter prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryPicker {
    /// Screen restored on cancel
    pub parent: Box<Screen>,
}

/// Every interactive screen of the game.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu(Menu),
    InGame,
    PickTile(TilePicker),
    PickTileAreaOfEffect { picker: TilePicker, radius_squared: i32 },
    PickInventory(InventoryPicker),
    LevelUp(Menu),
    Dead,
}

impl Screen {
    pub fn main_menu() -> Self {
        Screen::MainMenu(Menu::main_menu())
    }

    /// Builds the targeting screen a prompt asks for, returning to `parent`.
    pub fn tile_picker(parent: Screen, prompt: TilePrompt) -> Self {
        let picker = TilePicker {
            parent: Box::new(parent),
            on_pick: prompt.on_pick,
        };
        match prompt.targeting {
            Targeting::Single => Screen::PickTile(picker),
            Targeting::Area { radius_squared } => Screen::PickTileAreaOfEffect {
                picker,
                radius_squared,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainMenu(_) => "MainMenu",
            Screen::InGame => "InGame",
            Screen::PickTile(_) => "PickTile",
            Screen::PickTileAreaOfEffect { .. } => "PickTileAreaOfEffect",
            Screen::PickInventory(_) => "PickInventory",
            Screen::LevelUp(_) => "LevelUp",
            Screen::Dead => "Dead",
        }
    }

    /// Handles one input event.
    pub fn on_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> BurrowResult<StateResult> {
        if event == InputEvent::Quit {
            if *self == Screen::Dead {
                ctx.discard_world()?;
            }
            return Ok(StateResult::Quit);
        }

        match self {
            Screen::MainMenu(_) => self.main_menu_event(ctx, event),
            Screen::InGame => self.in_game_event(ctx, event),
            Screen::PickTile(_) | Screen::PickTileAreaOfEffect { .. } => self.pick_tile_event(ctx, event),
            Screen::PickInventory(_) => self.inventory_event(ctx, event),
            Screen::LevelUp(_) => self.level_up_event(ctx, event),
            Screen::Dead => self.dead_event(ctx, event),
        }
    }

    fn main_menu_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> BurrowResult<StateResult> {
        let command = match self {
            Screen::MainMenu(menu) => menu.handle(event),
            _ => None,
        };
        match command {
            Some(MenuCommand::NewGame) => {
                ctx.start_new_game()?;
                Ok(StateResult::Change(Screen::InGame))
            }
            Some(MenuCommand::Continue) => {
                if ctx.continue_game()? {
                    Ok(StateResult::Change(Screen::InGame))
                } else {
                    warn!("No saved game to continue");
                    Ok(StateResult::None)
                }
            }
            Some(MenuCommand::Exit) => Ok(StateResult::Quit),
            Some(MenuCommand::LevelUp(_)) | None => Ok(StateResult::None),
        }
    }

    fn in_game_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> BurrowResult<StateResult> {
        let action = match event {
            InputEvent::Direction(dir) => Action::Bump(dir),
            InputEvent::Hotkey(ch) => match ch {
                'g' | ',' => Action::Pickup,
                '>' => Action::TakeStairs(StairDirection::Down),
                '<' => Action::TakeStairs(StairDirection::Up),
                'i' => {
                    return Ok(StateResult::Change(Screen::PickInventory(InventoryPicker {
                        parent: Box::new(Screen::InGame),
                    })));
                }
                other => match vi_direction(other) {
                    Some(dir) => Action::Bump(dir),
                    None => return Ok(StateResult::None),
                },
            },
            InputEvent::Cancel => {
                ctx.save_if_live()?;
                return Ok(StateResult::Change(Screen::main_menu()));
            }
            InputEvent::PointerMoved(pos) => {
                ctx.controller.cursor = Some(pos);
                return Ok(StateResult::None);
            }
            _ => return Ok(StateResult::None),
        };
        self.perform_player_action(ctx, action)
    }

    fn inventory_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> BurrowResult<StateResult> {
        match event {
            InputEvent::Cancel => Ok(StateResult::Change(self.take_parent()?)),
            InputEvent::Hotkey(ch) if ch.is_ascii_lowercase() => {
                let index = (ch as u8 - b'a') as usize;
                self.perform_player_action(ctx, Action::UseItem(index))
            }
            _ => Ok(StateResult::None),
        }
    }

    fn pick_tile_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> BurrowResult<StateResult> {
        let on_pick = match self {
            Screen::PickTile(picker) | Screen::PickTileAreaOfEffect { picker, .. } => picker.on_pick,
            _ => {
                return Err(BurrowError::InvalidState(format!(
                    "{} is not a targeting screen",
                    self.name()
                )))
            }
        };

        let step = match event {
            InputEvent::Direction(dir) => Some(dir),
            InputEvent::Hotkey(ch) => vi_direction(ch),
            _ => None,
        };
        if let Some(dir) = step {
            let world = ctx.world()?;
            let start = match ctx.controller.cursor {
                Some(pos) => pos,
                None => world.player()?.pos,
            };
            let moved = clamp_to_map(world, start + dir)?;
            ctx.controller.cursor = Some(moved);
            return Ok(StateResult::None);
        }

        match event {
            InputEvent::PointerMoved(pos) => {
                if ctx.world()?.active_map()?.in_bounds(pos) {
                    ctx.controller.cursor = Some(pos);
                }
                Ok(StateResult::None)
            }
            InputEvent::PointerClicked(pos) => {
                ctx.controller.cursor = Some(pos);
                self.resolve_pick(ctx, on_pick)
            }
            InputEvent::Confirm => self.resolve_pick(ctx, on_pick),
            InputEvent::Cancel => {
                ctx.controller.cursor = None;
                Ok(StateResult::Change(self.take_parent()?))
            }
            _ => Ok(StateResult::None),
        }
    }

    fn level_up_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> BurrowResult<StateResult> {
        let command = match self {
            Screen::LevelUp(menu) => menu.handle(event),
            _ => None,
        };
        match command {
            Some(MenuCommand::LevelUp(choice)) => {
                apply_level_up(ctx.world_mut()?, choice)?;
                Ok(StateResult::Reset)
            }
            _ => Ok(StateResult::None),
        }
    }

    fn dead_event(&mut self, ctx: &mut GameContext, event: InputEvent) -> BurrowResult<StateResult> {
        match event {
            InputEvent::Cancel => {
                ctx.discard_world()?;
                Ok(StateResult::Change(Screen::main_menu()))
            }
            _ => Ok(StateResult::None),
        }
    }

    /// Performs a player action and turns its outcome into a screen result.
    fn perform_player_action(&mut self, ctx: &mut GameContext, action: Action) -> BurrowResult<StateResult> {
        let world = ctx.world_mut()?;
        match action.perform(world, ActorId::PLAYER)? {
            ActionResult::Success => Ok(StateResult::EndTurn),
            ActionResult::Failure(reason) => {
                world.log.append(reason, config::TEXT_COLOR_IMPOSSIBLE);
                Ok(StateResult::None)
            }
            ActionResult::Poll(prompt) => {
                ctx.controller.cursor = Some(prompt.cursor);
                let parent = std::mem::replace(self, Screen::InGame);
                Ok(StateResult::Change(Screen::tile_picker(parent, prompt)))
            }
        }
    }

    /// Runs the targeted effect at the cursor.
    ///
    /// A failed effect is reported and the parent screen comes back with the
    /// item still in the inventory.
    fn resolve_pick(&mut self, ctx: &mut GameContext, on_pick: PickTarget) -> BurrowResult<StateResult> {
        let Some(target) = ctx.controller.cursor.take() else {
            return Ok(StateResult::Change(self.take_parent()?));
        };
        let world = ctx.world_mut()?;
        match on_pick.at(target).perform(world, ActorId::PLAYER)? {
            ActionResult::Success => Ok(StateResult::EndTurn),
            ActionResult::Failure(reason) => {
                world.log.append(reason, config::TEXT_COLOR_IMPOSSIBLE);
                Ok(StateResult::Change(self.take_parent()?))
            }
            ActionResult::Poll(_) => Err(BurrowError::InvariantViolation(
                "A targeted effect asked for another target".to_string(),
            )),
        }
    }

    /// Takes the screen a picker returns to, leaving `InGame` in its slot.
    fn take_parent(&mut self) -> BurrowResult<Screen> {
        let slot = match self {
            Screen::PickTile(picker) | Screen::PickTileAreaOfEffect { picker, .. } => &mut picker.parent,
            Screen::PickInventory(picker) => &mut picker.parent,
            other => {
                return Err(BurrowError::InvalidState(format!(
                    "{} has no parent screen",
                    other.name()
                )))
            }
        };
        Ok(std::mem::replace(slot.as_mut(), Screen::InGame))
    }

    /// Draws the screen into `console`.
    pub fn draw(&self, ctx: &GameContext, console: &mut Console) {
        match self {
            Screen::MainMenu(menu) => {
                draw_menu(console, &menu.title, &menu.labels(), menu.selected_index());
            }
            Screen::InGame | Screen::PickTile(_) => {
                if let Some(world) = &ctx.world {
                    render_all(console, world, ctx.controller.cursor);
                }
            }
            Screen::PickTileAreaOfEffect { radius_squared, .. } => {
                if let Some(world) = &ctx.world {
                    render_all(console, world, ctx.controller.cursor);
                    if let Some(cursor) = ctx.controller.cursor {
                        render_area(console, world, cursor, *radius_squared);
                        console.invert(cursor);
                    }
                }
            }
            Screen::PickInventory(picker) => {
                picker.parent.draw(ctx, console);
                if let Some(player) = ctx.world.as_ref().and_then(|world| world.player().ok()) {
                    draw_inventory(console, &player.stats.inventory);
                }
            }
            Screen::LevelUp(menu) => {
                if let Some(world) = &ctx.world {
                    render_all(console, world, None);
                }
                draw_menu(console, &menu.title, &menu.labels(), menu.selected_index());
            }
            Screen::Dead => {
                if let Some(world) = &ctx.world {
                    render_all(console, world, None);
                }
                console.print(
                    Position::new(1, config::MAP_HEIGHT),
                    "You died. Press Escape to return to the menu.",
                    config::TEXT_COLOR_PLAYER_DIE,
                );
            }
        }
    }
}

fn clamp_to_map(world: &World, pos: Position) -> BurrowResult<Position> {
    let map = world.active_map()?;
    Ok(Position::new(
        pos.x.clamp(0, map.width() - 1),
        pos.y.clamp(0, map.height() - 1),
    ))
}

/// The main scene manager that coordinates all game screens.
pub struct SceneManager {
    screen: Screen,
    ctx: GameContext,
    running: bool,
}

impl SceneManager {
    /// Creates a manager showing the main menu.
    pub fn new(ctx: GameContext) -> Self {
        Self {
            screen: Screen::main_menu(),
            ctx,
            running: true,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feeds one event to the current screen and applies the result.
    pub fn handle_event(&mut self, event: InputEvent) -> BurrowResult<()> {
        if !self.running {
            return Ok(());
        }
        let result = self.screen.on_event(&mut self.ctx, event)?;
        self.apply(result)
    }

    /// Applies a screen result.
    pub fn apply(&mut self, result: StateResult) -> BurrowResult<()> {
        match result {
            StateResult::None => {}
            StateResult::Change(next) => self.switch_to(next),
            StateResult::Quit => {
                self.ctx.save_if_live()?;
                self.running = false;
                info!("Quitting from {}", self.screen.name());
            }
            StateResult::EndTurn => {
                let world = self.ctx.world_mut()?;
                let next = match end_player_turn(world)? {
                    TurnOutcome::Continue => Screen::InGame,
                    TurnOutcome::LevelUp => {
                        let level = world.player()?.stats.level + 1;
                        world.log.append(
                            format!("Your battle skills grow stronger! You reached level {}.", level),
                            config::TEXT_COLOR_STATUS,
                        );
                        Screen::LevelUp(Menu::level_up())
                    }
                    TurnOutcome::Dead => {
                        info!("The player has died");
                        Screen::Dead
                    }
                };
                self.switch_to(next);
            }
            StateResult::Reset => self.switch_to(Screen::InGame),
        }
        Ok(())
    }

    fn switch_to(&mut self, next: Screen) {
        debug!("Screen {} -> {}", self.screen.name(), next.name());
        self.screen = next;
    }

    /// Draws the current screen.
    pub fn draw(&self, console: &mut Console) {
        self.screen.draw(&self.ctx, console);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{give_item, Item, ItemKind};
    use crate::persistence::MemoryStore;

    fn manager() -> SceneManager {
        let ctx = GameContext::new(Box::new(MemoryStore::new()))
            .with_generation(GenerationConfig::for_testing(0))
            .with_seed(Some(17));
        SceneManager::new(ctx)
    }

    fn in_game() -> SceneManager {
        let mut scenes = manager();
        scenes.handle_event(InputEvent::Hotkey('n')).unwrap();
        assert_eq!(*scenes.screen(), Screen::InGame);
        scenes
    }

    #[test]
    fn test_menu_wraps_and_confirms() {
        let mut menu = Menu::main_menu();
        assert_eq!(menu.handle(InputEvent::Direction(Position::new(0, -1))), None);
        assert_eq!(menu.selected, 2);
        assert_eq!(menu.handle(InputEvent::Confirm), Some(MenuCommand::Exit));
        menu.handle(InputEvent::Direction(Position::new(0, 1)));
        assert_eq!(menu.selected, 0);
    }

    #[test]
    fn test_menu_pointer_selection() {
        let mut menu = Menu::main_menu();
        let row = Position::new(config::MENU_ORIGIN.x, config::MENU_ORIGIN.y + 1);
        assert_eq!(menu.handle(InputEvent::PointerClicked(row)), Some(MenuCommand::Continue));

        menu.handle(InputEvent::PointerMoved(Position::new(0, 0)));
        assert_eq!(menu.selected_index(), None);
        assert_eq!(menu.handle(InputEvent::Confirm), None);
    }

    #[test]
    fn test_continue_without_save_stays() {
        let mut scenes = manager();
        scenes.handle_event(InputEvent::Hotkey('c')).unwrap();
        assert!(matches!(scenes.screen(), Screen::MainMenu(_)));
    }

    #[test]
    fn test_escape_saves_and_continue_restores() {
        let mut scenes = in_game();
        let pos = scenes.context().world().unwrap().player().unwrap().pos;
        scenes.handle_event(InputEvent::Cancel).unwrap();
        assert!(matches!(scenes.screen(), Screen::MainMenu(_)));

        scenes.context_mut().world = None;
        scenes.handle_event(InputEvent::Hotkey('c')).unwrap();
        assert_eq!(*scenes.screen(), Screen::InGame);
        assert_eq!(scenes.context().world().unwrap().player().unwrap().pos, pos);
    }

    #[test]
    fn test_failed_action_keeps_turn() {
        let mut scenes = in_game();
        scenes.handle_event(InputEvent::Hotkey('g')).unwrap();
        assert_eq!(*scenes.screen(), Screen::InGame);
        assert!(scenes.context().world().unwrap().log.contains("Nothing to pickup!"));
    }

    #[test]
    fn test_inventory_cancel_returns_to_game() {
        let mut scenes = in_game();
        scenes.handle_event(InputEvent::Hotkey('i')).unwrap();
        assert!(matches!(scenes.screen(), Screen::PickInventory(_)));
        scenes.handle_event(InputEvent::Hotkey('z')).unwrap();
        assert!(scenes.context().world().unwrap().log.contains("You don't have that item."));
        scenes.handle_event(InputEvent::Cancel).unwrap();
        assert_eq!(*scenes.screen(), Screen::InGame);
    }

    #[test]
    fn test_confusion_picker_cancel_restores_inventory() {
        let mut scenes = in_game();
        {
            let world = scenes.context_mut().world_mut().unwrap();
            give_item(world, ActorId::PLAYER, Item::new(ItemKind::ConfusionScroll)).unwrap();
        }
        scenes.handle_event(InputEvent::Hotkey('i')).unwrap();
        scenes.handle_event(InputEvent::Hotkey('a')).unwrap();
        assert!(matches!(scenes.screen(), Screen::PickTile(_)));
        assert!(scenes.context().controller.cursor.is_some());

        scenes.handle_event(InputEvent::Cancel).unwrap();
        assert!(matches!(scenes.screen(), Screen::PickInventory(_)));
        assert_eq!(scenes.context().controller.cursor, None);
        let inventory = &scenes.context().world().unwrap().player().unwrap().stats.inventory;
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_cursor_is_clamped_to_map() {
        let mut scenes = in_game();
        {
            let world = scenes.context_mut().world_mut().unwrap();
            give_item(world, ActorId::PLAYER, Item::new(ItemKind::FireballScroll)).unwrap();
        }
        scenes.handle_event(InputEvent::Hotkey('i')).unwrap();
        scenes.handle_event(InputEvent::Hotkey('a')).unwrap();
        assert!(matches!(scenes.screen(), Screen::PickTileAreaOfEffect { .. }));

        scenes.context_mut().controller.cursor = Some(Position::new(0, 0));
        scenes.handle_event(InputEvent::Hotkey('y')).unwrap();
        assert_eq!(scenes.context().controller.cursor, Some(Position::new(0, 0)));
    }

    #[test]
    fn test_quit_saves_live_game() {
        let mut scenes = in_game();
        scenes.handle_event(InputEvent::Quit).unwrap();
        assert!(!scenes.is_running());
        assert!(scenes.context_mut().store.load().unwrap().is_some());
    }

    #[test]
    fn test_draw_main_menu() {
        let scenes = manager();
        let mut console = Console::new(config::CONSOLE_WIDTH, config::CONSOLE_HEIGHT);
        scenes.draw(&mut console);
        assert!(console.contains_text("Play a new game"));
    }
}
