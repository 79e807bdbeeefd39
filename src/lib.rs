//! Kokaton Musou - a fixed-timestep arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `session`: Outer frame loop wired to input, renderer and clock
//! - `autopilot`: Scripted input source for headless runs
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod error;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1100.0;
    pub const SCREEN_HEIGHT: f32 = 650.0;

    /// Fixed simulation rate. Every speed below is in pixels per frame at this rate.
    pub const TARGET_FPS: u32 = 50;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (900.0, 400.0);
    pub const PLAYER_SIZE: (f32, f32) = (90.0, 90.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_MAX_HP: u32 = 100;
    /// Invulnerability window after a hit (frames)
    pub const HYPER_DURATION: i32 = 60;

    /// Player beam
    pub const BEAM_SIZE: (f32, f32) = (60.0, 20.0);
    pub const BEAM_SPEED: f32 = 10.0;
    pub const BEAM_DAMAGE: i32 = 10;

    /// Enemy bomb
    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_DAMAGE: u32 = 34;
    pub const BOMB_RADIUS_MIN: u32 = 10;
    pub const BOMB_RADIUS_MAX: u32 = 40;

    /// Enemy defaults
    pub const ENEMY_SIZE: (f32, f32) = (80.0, 70.0);
    pub const ENEMY_SPEED: f32 = 6.0;
    pub const ENEMY_HP: i32 = 30;
    pub const ENEMY_SPRITE_VARIANTS: u8 = 3;
    pub const ENEMY_SPAWN_INTERVAL: u64 = 150;
    pub const ENEMY_ATTACK_INTERVAL_MIN: u32 = 50;
    pub const ENEMY_ATTACK_INTERVAL_MAX: u32 = 150;
    pub const ENEMY_REST_DEPTH_MIN: u32 = 50;
    pub const ENEMY_REST_DEPTH_MAX: u32 = (SCREEN_HEIGHT as u32) / 2;

    /// Damage popup
    pub const POPUP_LIFETIME: i32 = 30;
    pub const POPUP_SPEED: f32 = -2.0;

    /// Presentation pause before the session ends on defeat (1 second)
    pub const DEFEAT_DELAY_FRAMES: u32 = TARGET_FPS;
}
