//! Per-frame input snapshot consumed by the simulation

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Vector sum of the unit offsets of every held key (not normalized)
    pub fn offset(&self) -> IVec2 {
        let mut sum = IVec2::ZERO;
        if self.up {
            sum.y -= 1;
        }
        if self.down {
            sum.y += 1;
        }
        if self.left {
            sum.x -= 1;
        }
        if self.right {
            sum.x += 1;
        }
        sum
    }
}

/// Discrete input events, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Fire key pressed (one beam per press, not per held frame)
    Fire,
    /// Window closed / quit requested
    Quit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

impl TickInput {
    /// Input with `n` fire presses and nothing held
    pub fn fire(n: usize) -> Self {
        Self {
            held: HeldKeys::default(),
            events: vec![InputEvent::Fire; n],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_sums_keys() {
        let keys = HeldKeys {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(keys.offset(), IVec2::new(1, -1));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let keys = HeldKeys {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(keys.offset(), IVec2::ZERO);
    }
}
