//! Meteor Dodge - A meteor avoidance arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame timing and input mapping shared by both front ends
//! - `settings`: Preferences and window size overrides

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed to the accumulator (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.25;

    /// Default window/arena dimensions
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Spaceship
    pub const SHIP_WIDTH: f32 = 50.0;
    pub const SHIP_HEIGHT: f32 = 30.0;
    pub const SHIP_BOTTOM_MARGIN: f32 = 20.0;
    /// Horizontal speed (pixels/s)
    pub const SHIP_SPEED: f32 = 300.0;

    /// Shield extends this far past the ship on every side
    pub const SHIELD_PADDING: f32 = 8.0;
    /// Dodged meteors between shield recharges
    pub const SHIELD_RECHARGE_SCORE: u64 = 25;

    /// Meteor size range (square side, pixels)
    pub const METEOR_MIN_SIZE: f32 = 20.0;
    pub const METEOR_MAX_SIZE: f32 = 40.0;
    /// Meteor fall speed range (pixels/s)
    pub const METEOR_MIN_SPEED: f32 = 120.0;
    pub const METEOR_MAX_SPEED: f32 = 240.0;

    /// Zigzag meteors
    pub const ZIGZAG_SPEED: f32 = 90.0;
    pub const ZIGZAG_PERIOD_TICKS: u32 = 30;

    /// Homing meteors: max horizontal drift (pixels/s) and steering accel (pixels/s²)
    pub const HOMING_MAX_DRIFT: f32 = 90.0;
    pub const HOMING_STEER: f32 = 180.0;
    /// Score at which homing meteors start to appear
    pub const HOMING_UNLOCK_SCORE: u64 = 10;

    /// Spawn pacing (ticks between meteors)
    pub const SPAWN_INTERVAL_START_TICKS: u32 = 48;
    pub const SPAWN_INTERVAL_MIN_TICKS: u32 = 15;
    /// Ticks of play per one-tick reduction of the spawn interval
    pub const SPAWN_RAMP_TICKS: u64 = 5 * 60;

    /// Star field
    pub const STAR_MIN_SPEED: f32 = 60.0;
    pub const STAR_MAX_SPEED: f32 = 180.0;
    pub const STAR_MIN_SIZE: f32 = 1.0;
    pub const STAR_MAX_SIZE: f32 = 3.0;
}
