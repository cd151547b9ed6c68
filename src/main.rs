//! # Burrow Main Entry Point
//!
//! Parses the command line, sets up logging and the macroquad window, and
//! feeds input events to the scene manager once per frame.

use burrow::{
    config, BurrowError, BurrowResult, Console, GameContext, GenerationConfig, InputHandler,
    JsonSaveStore, MacroquadDisplay, SceneManager,
};
use clap::Parser;
use log::{error, info};
use macroquad::prelude::{load_ttf_font, next_frame, prevent_quit, Conf};
use std::path::PathBuf;

/// Command line arguments for Burrow.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "A turn-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Random seed for new games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the saved game is kept
    #[arg(long, default_value = "saves/save.json")]
    save_file: PathBuf,

    /// TrueType font for the console glyphs
    #[arg(long)]
    font: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    let (width, height) = MacroquadDisplay::window_size();
    Conf {
        window_title: "Burrow".to_string(),
        window_width: width,
        window_height: height,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);
    info!("Starting Burrow v{}", burrow::VERSION);

    if let Err(e) = run(args).await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

/// Initializes `env_logger`, letting `RUST_LOG` override the command line.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

async fn load_display(font: Option<&PathBuf>) -> BurrowResult<MacroquadDisplay> {
    let Some(path) = font else {
        return Ok(MacroquadDisplay::new(None));
    };
    if !path.exists() {
        return Err(BurrowError::ResourceMissing(format!(
            "Font file {} does not exist",
            path.display()
        )));
    }
    let font = load_ttf_font(&path.to_string_lossy())
        .await
        .map_err(|e| BurrowError::ResourceMissing(format!("Failed to load font {}: {}", path.display(), e)))?;
    info!("Loaded font {}", path.display());
    Ok(MacroquadDisplay::new(Some(font)))
}

/// Runs the main loop until a screen asks to quit.
async fn run(args: Args) -> BurrowResult<()> {
    let display = load_display(args.font.as_ref()).await?;

    let store = JsonSaveStore::new(args.save_file.clone());
    info!("Saving to {}", store.path().display());
    let ctx = GameContext::new(Box::new(store))
        .with_generation(GenerationConfig::default())
        .with_seed(args.seed);

    let mut scenes = SceneManager::new(ctx);
    let mut input = InputHandler::new();
    let mut console = Console::new(config::CONSOLE_WIDTH, config::CONSOLE_HEIGHT);

    // Window close arrives as InputEvent::Quit.
    prevent_quit();

    while scenes.is_running() {
        for event in input.poll(display.cell_size()) {
            scenes.handle_event(event)?;
            if !scenes.is_running() {
                break;
            }
        }

        console.clear();
        scenes.draw(&mut console);
        display.present(&console);

        next_frame().await;
    }

    info!("Game loop ended");
    Ok(())
}
