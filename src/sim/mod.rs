//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame at `TARGET_FPS`)
//! - Seeded RNG only, threaded through `SimContext`
//! - No rendering or platform dependencies

pub mod geometry;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use geometry::{Rect, fully_in_bounds, in_bounds, unit_direction};
pub use input::{HeldKeys, InputEvent, TickInput};
pub use snapshot::{FrameSnapshot, build_snapshot};
pub use state::{
    Beam, Bomb, DamagePopup, Enemy, Facing, GameEvent, GamePhase, GameState, Guard, Player,
    SessionStats, SimContext,
};
pub use tick::{TickOutcome, tick};
