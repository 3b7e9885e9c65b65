//! Engine configuration resource.
//!
//! Manages engine settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [assets]
//! root = assets/pets
//! default_type = Patamon Shimeji
//!
//! [screen]
//! width = 1920
//! height = 1080
//!
//! [loop]
//! tick_ms = 1000
//!
//! [movement]
//! max_step = 10
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_ASSETS_ROOT: &str = "assets/pets";
const DEFAULT_PET_TYPE: &str = "Patamon Shimeji";
const DEFAULT_SCREEN_WIDTH: u32 = 1920;
const DEFAULT_SCREEN_HEIGHT: u32 = 1080;
const DEFAULT_TICK_MS: u32 = 1000;
const DEFAULT_MAX_STEP: u32 = 10;
const DEFAULT_CONFIG_PATH: &str = "./petengine.ini";

/// Engine configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding one sub-directory per visual type.
    pub assets_root: PathBuf,
    /// Visual type used when none is given.
    pub default_type: String,
    /// Width of the surface pets wander on, in pixels.
    pub screen_width: u32,
    /// Height of the surface pets wander on, in pixels.
    pub screen_height: u32,
    /// Interval of the driving loop in milliseconds.
    pub tick_ms: u32,
    /// Largest per-axis step of the random walk, in pixels.
    pub max_step: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            default_type: DEFAULT_PET_TYPE.to_string(),
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            tick_ms: DEFAULT_TICK_MS,
            max_step: DEFAULT_MAX_STEP,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new_cs();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.assets_root = PathBuf::from(root);
        }
        if let Some(default_type) = config.get("assets", "default_type") {
            self.default_type = default_type;
        }

        // [screen] section
        if let Some(width) = read_u32(&config, "screen", "width") {
            self.screen_width = width;
        }
        if let Some(height) = read_u32(&config, "screen", "height") {
            self.screen_height = height;
        }

        // [loop] section
        if let Some(tick_ms) = read_u32(&config, "loop", "tick_ms") {
            self.tick_ms = tick_ms;
        }

        // [movement] section
        if let Some(max_step) = read_u32(&config, "movement", "max_step") {
            self.max_step = max_step;
        }

        info!(
            "Loaded config: assets={:?}, type='{}', screen {}x{}, tick={}ms, max_step={}",
            self.assets_root,
            self.default_type,
            self.screen_width,
            self.screen_height,
            self.tick_ms,
            self.max_step
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new_cs();

        // [assets] section
        config.set(
            "assets",
            "root",
            Some(self.assets_root.to_string_lossy().into_owned()),
        );
        config.set("assets", "default_type", Some(self.default_type.clone()));

        // [screen] section
        config.set("screen", "width", Some(self.screen_width.to_string()));
        config.set("screen", "height", Some(self.screen_height.to_string()));

        // [loop] section
        config.set("loop", "tick_ms", Some(self.tick_ms.to_string()));

        // [movement] section
        config.set("movement", "max_step", Some(self.max_step.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Set the wander surface size.
    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Get the wander surface size.
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}

/// Unsigned value of `section.key` if it is present and fits in a `u32`.
fn read_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    config
        .getuint(section, key)
        .ok()
        .flatten()
        .and_then(|v| u32::try_from(v).ok())
}
