//! Read-only frame views for the renderer
//!
//! Building a snapshot never modifies the game state.

use glam::Vec2;
use serde::Serialize;

use super::state::{Facing, GameEvent, GamePhase, GameState, SessionStats};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub center: Vec2,
    pub size: Vec2,
    /// Selects one of the eight pre-rotated player images
    pub facing: Facing,
    /// 128 on blink frames during Hyper, else 255
    pub alpha: u8,
    pub hyper: bool,
    pub hp: u32,
    pub health_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub center: Vec2,
    pub size: Vec2,
    pub sprite: u8,
    pub health_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamView {
    pub id: u32,
    pub center: Vec2,
    /// Image rotation in degrees, counter-clockwise from east
    pub angle_deg: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BombView {
    pub id: u32,
    pub center: Vec2,
    pub radius: u32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupView {
    pub center: Vec2,
    pub label: String,
    pub color: [u8; 3],
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub beams: Vec<BeamView>,
    pub bombs: Vec<BombView>,
    pub popups: Vec<PopupView>,
    pub stats: SessionStats,
    pub events: Vec<GameEvent>,
}

/// Build a complete FrameSnapshot from the current state
pub fn build_snapshot(state: &GameState, frame: u64) -> FrameSnapshot {
    let player = &state.player;
    FrameSnapshot {
        frame,
        phase: state.phase,
        player: PlayerView {
            center: player.center(),
            size: player.rect.size,
            facing: player.facing,
            alpha: player.alpha(),
            hyper: player.is_hyper(),
            hp: player.hp,
            health_fraction: player.health_fraction(),
        },
        enemies: state
            .enemies
            .iter()
            .map(|e| EnemyView {
                id: e.id,
                center: e.center(),
                size: e.rect.size,
                sprite: e.sprite,
                health_fraction: e.health_fraction(),
            })
            .collect(),
        beams: state
            .beams
            .iter()
            .map(|b| BeamView {
                id: b.id,
                center: b.rect.center,
                // Screen y is flipped relative to the image rotation convention
                angle_deg: (-b.vel.y).atan2(b.vel.x).to_degrees(),
            })
            .collect(),
        bombs: state
            .bombs
            .iter()
            .map(|b| BombView {
                id: b.id,
                center: b.rect.center,
                radius: b.radius,
                color: [b.red, 0, 0],
            })
            .collect(),
        popups: state
            .popups
            .iter()
            .map(|p| PopupView {
                center: p.pos,
                label: p.label(),
                color: p.color,
            })
            .collect(),
        stats: state.stats.clone(),
        events: state.events.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Beam, Guard};
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(Tuning::default());
        state.player.hp = 50;
        state.player.guard = Guard::Hyper { timer: 10 };
        let snap = build_snapshot(&state, 7);

        assert_eq!(snap.frame, 7);
        assert_eq!(snap.player.hp, 50);
        assert!((snap.player.health_fraction - 0.5).abs() < 1e-6);
        assert_eq!(snap.player.alpha, 128);
        assert!(snap.player.hyper);
        assert!(snap.enemies.is_empty());
    }

    #[test]
    fn test_beam_angle() {
        let mut state = GameState::new(Tuning::default());
        state.player.facing = Facing::North;
        let id = state.next_entity_id();
        let beam = Beam::fire(id, &state.player, state.tuning.beam_speed);
        state.beams.push(beam);
        let snap = build_snapshot(&state, 0);
        assert!((snap.beams[0].angle_deg - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Tuning::default());
        let json = serde_json::to_string(&build_snapshot(&state, 0)).unwrap();
        assert!(json.contains("\"facing\":\"East\""));
    }
}
