//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through `Tuning`.
//! The default reproduces `consts` exactly; a JSON document may override
//! any subset of fields. Tuning is fixed for the whole session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{TuningError, TuningResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub player_max_hp: u32,
    /// Invulnerability frames granted by a hit
    pub hyper_duration: i32,

    // === Beams ===
    pub beam_speed: f32,
    /// Damage dealt to an enemy per overlapping beam
    pub beam_damage: i32,

    // === Bombs ===
    pub bomb_speed: f32,
    pub bomb_damage: u32,
    pub bomb_radius_min: u32,
    pub bomb_radius_max: u32,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_hp: i32,
    /// Global frames between enemy spawns
    pub enemy_spawn_interval: u64,
    pub enemy_attack_interval_min: u32,
    pub enemy_attack_interval_max: u32,
    pub enemy_rest_depth_min: u32,
    pub enemy_rest_depth_max: u32,

    // === Popups ===
    pub popup_lifetime: i32,
    pub popup_speed: f32,

    // === Session ===
    pub defeat_delay_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_max_hp: PLAYER_MAX_HP,
            hyper_duration: HYPER_DURATION,

            beam_speed: BEAM_SPEED,
            beam_damage: BEAM_DAMAGE,

            bomb_speed: BOMB_SPEED,
            bomb_damage: BOMB_DAMAGE,
            bomb_radius_min: BOMB_RADIUS_MIN,
            bomb_radius_max: BOMB_RADIUS_MAX,

            enemy_speed: ENEMY_SPEED,
            enemy_hp: ENEMY_HP,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            enemy_attack_interval_min: ENEMY_ATTACK_INTERVAL_MIN,
            enemy_attack_interval_max: ENEMY_ATTACK_INTERVAL_MAX,
            enemy_rest_depth_min: ENEMY_REST_DEPTH_MIN,
            enemy_rest_depth_max: ENEMY_REST_DEPTH_MAX,

            popup_lifetime: POPUP_LIFETIME,
            popup_speed: POPUP_SPEED,

            defeat_delay_frames: DEFEAT_DELAY_FRAMES,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> TuningResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> TuningResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> TuningResult<()> {
        check_range("bomb_radius", self.bomb_radius_min, self.bomb_radius_max)?;
        check_range(
            "enemy_attack_interval",
            self.enemy_attack_interval_min,
            self.enemy_attack_interval_max,
        )?;
        check_range("enemy_rest_depth", self.enemy_rest_depth_min, self.enemy_rest_depth_max)?;

        if self.player_max_hp == 0 {
            return Err(out_of_range("player_max_hp", 0.0, "[1, ∞)"));
        }
        if self.enemy_spawn_interval == 0 {
            return Err(out_of_range("enemy_spawn_interval", 0.0, "[1, ∞)"));
        }
        if self.enemy_attack_interval_min == 0 {
            return Err(out_of_range("enemy_attack_interval_min", 0.0, "[1, ∞)"));
        }
        if self.bomb_radius_min == 0 {
            return Err(out_of_range("bomb_radius_min", 0.0, "[1, ∞)"));
        }
        if self.beam_damage <= 0 {
            return Err(out_of_range("beam_damage", self.beam_damage as f64, "[1, ∞)"));
        }
        if self.enemy_hp <= 0 {
            return Err(out_of_range("enemy_hp", self.enemy_hp as f64, "[1, ∞)"));
        }
        if self.enemy_rest_depth_max as f32 > SCREEN_HEIGHT {
            let value = self.enemy_rest_depth_max as f64;
            return Err(out_of_range("enemy_rest_depth_max", value, "[0, screen height]"));
        }
        if self.hyper_duration < 0 {
            return Err(out_of_range("hyper_duration", self.hyper_duration as f64, "[0, ∞)"));
        }
        if self.popup_lifetime < 0 {
            return Err(out_of_range("popup_lifetime", self.popup_lifetime as f64, "[0, ∞)"));
        }
        for (name, speed) in [
            ("player_speed", self.player_speed),
            ("beam_speed", self.beam_speed),
            ("bomb_speed", self.bomb_speed),
            ("enemy_speed", self.enemy_speed),
        ] {
            if !speed.is_finite() || speed < 0.0 {
                return Err(out_of_range(name, speed as f64, "[0, ∞)"));
            }
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: u32, max: u32) -> TuningResult<()> {
    if min > max {
        Err(TuningError::InvertedRange { name, min, max })
    } else {
        Ok(())
    }
}

fn out_of_range(name: &'static str, value: f64, accepted: &'static str) -> TuningError {
    TuningError::OutOfRange {
        name,
        value,
        accepted,
    }
}
