//! Input sources that need no input device
//!
//! `Autopilot` plays the game for headless demo runs. `ScriptedInput`
//! replays a fixed tape of per-frame inputs.

use std::collections::VecDeque;

use crate::sim::{Facing, GameState, HeldKeys, InputEvent, TickInput};
use crate::session::InputSource;

/// Frames per aim/fire/return cycle
const FIRE_CYCLE: u64 = 12;
/// Horizontal distance at which a bomb triggers a sidestep
const DODGE_RADIUS: f32 = 140.0;

/// Deterministic bot: lines up under the lowest enemy, faces north, fires
///
/// Facing follows movement, so each shot takes three frames: a one-frame
/// step up to face north, the fire press, then a step back down.
#[derive(Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    fn steer(&self, state: &GameState) -> HeldKeys {
        let player = state.player.center();
        let speed = state.player.speed;

        // Sidestep the closest bomb still heading our way
        let threat = state
            .bombs
            .iter()
            .filter(|b| b.vel.y > 0.0 && b.rect.center.y < player.y)
            .map(|b| b.rect.center)
            .filter(|c| c.distance(player) < DODGE_RADIUS * 2.0)
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
        if let Some(bomb) = threat {
            if (bomb.x - player.x).abs() < DODGE_RADIUS && !state.player.is_hyper() {
                return HeldKeys {
                    left: bomb.x >= player.x,
                    right: bomb.x < player.x,
                    ..Default::default()
                };
            }
        }

        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.center().y.total_cmp(&b.center().y))
            .map(|e| e.center().x);
        match target {
            Some(x) if x < player.x - speed => HeldKeys {
                left: true,
                ..Default::default()
            },
            Some(x) if x > player.x + speed => HeldKeys {
                right: true,
                ..Default::default()
            },
            _ => HeldKeys::default(),
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, frame: u64, state: &GameState) -> TickInput {
        match frame % FIRE_CYCLE {
            0 => TickInput {
                held: HeldKeys {
                    up: true,
                    ..Default::default()
                },
                events: Vec::new(),
            },
            1 if state.player.facing == Facing::North && !state.enemies.is_empty() => {
                TickInput::fire(1)
            }
            2 => TickInput {
                held: HeldKeys {
                    down: true,
                    ..Default::default()
                },
                events: Vec::new(),
            },
            _ => TickInput {
                held: self.steer(state),
                events: Vec::new(),
            },
        }
    }
}

/// Replays a tape; once exhausted emits `fallback` (Quit by default)
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    tape: VecDeque<TickInput>,
    fallback: TickInput,
}

impl ScriptedInput {
    pub fn new(tape: Vec<TickInput>) -> Self {
        Self {
            tape: tape.into(),
            fallback: TickInput {
                held: HeldKeys::default(),
                events: vec![InputEvent::Quit],
            },
        }
    }

    /// Keep emitting `input` after the tape runs out instead of quitting
    pub fn repeat_last(mut self, input: TickInput) -> Self {
        self.fallback = input;
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _frame: u64, _state: &GameState) -> TickInput {
        self.tape.pop_front().unwrap_or_else(|| self.fallback.clone())
    }
}
