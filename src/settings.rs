//! Game tuning
//!
//! Loaded from JSON (a file on native, LocalStorage on web). Missing
//! fields take their defaults from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable overriding the settings file path
pub const SETTINGS_PATH_ENV: &str = "PLANE_FIGHT_SETTINGS";
/// Default settings file (native)
pub const DEFAULT_SETTINGS_PATH: &str = "plane_fight_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,

    // === Actor extents ===
    pub player_width: f32,
    pub player_height: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub bullet_size: f32,

    // === Spawning ===
    /// Seconds between enemies
    pub enemy_interval: f32,
    /// Seconds for an enemy to cross the screen
    pub enemy_travel_seconds: f32,
    /// Per-tick probability of an enemy bullet (0 disables, 1 fires every tick)
    pub enemy_fire_chance: f32,

    // === Bullets ===
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,

    // === Steering ===
    pub steering_gain: f32,
    pub steering_deadzone: f32,

    /// Skip the logo and start in Playing
    pub start_playing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            bullet_size: BULLET_SIZE,

            enemy_interval: ENEMY_INTERVAL,
            enemy_travel_seconds: ENEMY_TRAVEL_SECONDS,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,

            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,

            steering_gain: STEERING_GAIN,
            steering_deadzone: STEERING_DEADZONE,

            start_playing: false,
        }
    }
}

/// Positive and finite, else the fallback
fn positive(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Clamp values into usable ranges
    pub fn sanitized(mut self) -> Self {
        let d = Settings::default();
        self.world_width = positive(self.world_width, d.world_width);
        self.world_height = positive(self.world_height, d.world_height);
        self.ground_height = if self.ground_height.is_finite() {
            self.ground_height.clamp(0.0, self.world_height)
        } else {
            d.ground_height
        };
        self.player_width = positive(self.player_width, d.player_width);
        self.player_height = positive(self.player_height, d.player_height);
        self.enemy_width = positive(self.enemy_width, d.enemy_width);
        self.enemy_height = positive(self.enemy_height, d.enemy_height);
        self.bullet_size = positive(self.bullet_size, d.bullet_size);
        self.enemy_interval = positive(self.enemy_interval, d.enemy_interval);
        self.enemy_travel_seconds = positive(self.enemy_travel_seconds, d.enemy_travel_seconds);
        self.enemy_fire_chance = if self.enemy_fire_chance.is_finite() {
            self.enemy_fire_chance.clamp(0.0, 1.0)
        } else {
            d.enemy_fire_chance
        };
        self.player_bullet_speed = positive(self.player_bullet_speed, d.player_bullet_speed);
        self.enemy_bullet_speed = positive(self.enemy_bullet_speed, d.enemy_bullet_speed);
        self.steering_gain = positive(self.steering_gain, d.steering_gain);
        self.steering_deadzone = if self.steering_deadzone.is_finite() {
            self.steering_deadzone.clamp(0.0, 1.0)
        } else {
            d.steering_deadzone
        };
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "plane_fight_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from `$PLANE_FIGHT_SETTINGS` or the default file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var(SETTINGS_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        Self::load_from(std::path::Path::new(&path))
    }

    /// Load from a file; missing or invalid files fall back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
