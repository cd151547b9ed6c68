//! # Persistence
//!
//! Saving and loading the whole [`World`] as JSON.

use crate::{BurrowResult, World};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Somewhere a single saved game can live.
pub trait SaveStore {
    /// Replaces any existing save with `world`.
    fn save(&mut self, world: &World) -> BurrowResult<()>;

    /// Loads the saved game, or `None` if there is none.
    fn load(&mut self) -> BurrowResult<Option<World>>;

    /// Deletes the saved game if there is one.
    fn clear(&mut self) -> BurrowResult<()>;
}

/// Saves to a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonSaveStore {
    path: PathBuf,
}

impl JsonSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonSaveStore {
    fn save(&mut self, world: &World) -> BurrowResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(world)?;
        fs::write(&self.path, json)?;
        info!("Saved game to {}", self.path.display());
        Ok(())
    }

    fn load(&mut self) -> BurrowResult<Option<World>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let world = serde_json::from_str(&json)?;
        info!("Loaded game from {}", self.path.display());
        Ok(Some(world))
    }

    fn clear(&mut self) -> BurrowResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Deleted save {}", self.path.display());
        }
        Ok(())
    }
}

/// Keeps the serialized game in memory, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_save(&self) -> bool {
        self.json.is_some()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, world: &World) -> BurrowResult<()> {
        self.json = Some(serde_json::to_string(world)?);
        Ok(())
    }

    fn load(&mut self) -> BurrowResult<Option<World>> {
        match &self.json {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> BurrowResult<()> {
        self.json = None;
        Ok(())
    }
}
