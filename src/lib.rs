//! Plane Fight - a side-scrolling shooter core
//!
//! Core modules:
//! - `sim`: Simulation (actors, contact filtering, spawning, game phases)
//! - `game`: Session driving the simulation from presentation callbacks
//! - `presenter`: Outbound interface to the rendering/audio layer
//! - `persistence`: Key-value stores for the high score
//! - `settings`: Data-driven tuning

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod presenter;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::ScoreTracker;
pub use presenter::{Effect, Presenter, Sound};
pub use settings::Settings;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Visible world size (landscape phone, points)
    pub const WORLD_WIDTH: f32 = 667.0;
    pub const WORLD_HEIGHT: f32 = 375.0;

    /// Player sprite extent
    pub const PLAYER_WIDTH: f32 = 88.0;
    pub const PLAYER_HEIGHT: f32 = 73.0;
    /// Player start, as fractions of the world size
    pub const PLAYER_START_X: f32 = 0.1;
    pub const PLAYER_START_Y: f32 = 0.66;

    /// Enemy sprite extent
    pub const ENEMY_WIDTH: f32 = 84.0;
    pub const ENEMY_HEIGHT: f32 = 70.0;
    /// Seconds between enemy spawns
    pub const ENEMY_INTERVAL: f32 = 5.0;
    /// Seconds for an enemy to cross the screen
    pub const ENEMY_TRAVEL_SECONDS: f32 = 10.0;
    /// Extra distance past the left edge before an enemy despawns
    pub const ENEMY_EXIT_MARGIN: f32 = 10.0;
    /// Per-tick chance that an enemy opens fire
    pub const ENEMY_FIRE_CHANCE: f32 = 0.01;

    /// Bullets are square
    pub const BULLET_SIZE: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 140.0;
    pub const ENEMY_BULLET_SPEED: f32 = 200.0;

    /// Height of the scrolling ground strip
    pub const GROUND_HEIGHT: f32 = 40.0;

    /// Steering signal below this magnitude is ignored
    pub const STEERING_DEADZONE: f32 = 0.1;
    /// Vertical speed per unit of steering signal
    pub const STEERING_GAIN: f32 = 300.0;

    /// Fixed timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}
