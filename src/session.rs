//! Outer frame loop
//!
//! Glues the deterministic core to its collaborators: an input source, a
//! renderer that only ever sees read-only snapshots, and a clock that holds
//! the loop to `TARGET_FPS`.

use std::time::{Duration, Instant};

use crate::consts::TARGET_FPS;
use crate::sim::{
    FrameSnapshot, GameState, SimContext, TickInput, TickOutcome, build_snapshot, tick,
};

/// Supplies one input snapshot per frame
pub trait InputSource {
    fn poll(&mut self, frame: u64, state: &GameState) -> TickInput;
}

/// Draws a frame; has no write access to the simulation
pub trait Renderer {
    fn present(&mut self, snapshot: &FrameSnapshot);
}

/// Frame pacing contract
pub trait FrameClock {
    /// Block until the next frame is due (no earlier than last + 1/fps)
    fn wait_next_frame(&mut self);

    /// Hold for a number of frames (e.g. the defeat pause)
    fn hold(&mut self, frames: u32) {
        for _ in 0..frames {
            self.wait_next_frame();
        }
    }
}

/// Wall-clock pacing at a fixed rate
#[derive(Debug)]
pub struct FixedRateClock {
    frame: Duration,
    deadline: Instant,
}

impl FixedRateClock {
    pub fn new(fps: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        Self {
            frame,
            deadline: Instant::now() + frame,
        }
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl FrameClock for FixedRateClock {
    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        if now < self.deadline {
            std::thread::sleep(self.deadline - now);
        }
        // Late frames do not accumulate debt
        self.deadline = self.deadline.max(now) + self.frame;
    }
}

/// Counts frames without sleeping (tests, benchmarks, --unpaced)
#[derive(Debug, Default)]
pub struct UnpacedClock {
    pub frames_waited: u64,
}

impl FrameClock for UnpacedClock {
    fn wait_next_frame(&mut self) {
        self.frames_waited += 1;
    }
}

/// Renderer that logs a one-line summary every `every` frames
#[derive(Debug)]
pub struct LogRenderer {
    pub every: u64,
}

impl Renderer for LogRenderer {
    fn present(&mut self, snapshot: &FrameSnapshot) {
        if self.every == 0 || snapshot.frame % self.every != 0 {
            return;
        }
        log::info!(
            "frame {:>6} | hp {:>3}{} | enemies {:>2} | beams {:>2} | bombs {:>2} | destroyed {}",
            snapshot.frame,
            snapshot.player.hp,
            if snapshot.player.hyper { "*" } else { " " },
            snapshot.enemies.len(),
            snapshot.beams.len(),
            snapshot.bombs.len(),
            snapshot.stats.enemies_destroyed
        );
    }
}

/// Why the session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Defeated,
    /// Caller-imposed frame cap reached
    FrameLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub frames: u64,
    pub enemies_destroyed: u32,
    pub damage_taken: u32,
}

/// Run frames until quit, defeat, or `max_frames`
pub fn run_session(
    state: &mut GameState,
    ctx: &mut SimContext,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
    clock: &mut impl FrameClock,
    max_frames: Option<u64>,
) -> SessionReport {
    log::info!("Session starting with seed {}", ctx.seed);

    let end = loop {
        if max_frames.is_some_and(|max| ctx.frame >= max) {
            break SessionEnd::FrameLimit;
        }

        let frame_input = input.poll(ctx.frame, state);
        match tick(state, ctx, &frame_input) {
            TickOutcome::Continue => {
                renderer.present(&build_snapshot(state, ctx.frame));
                clock.wait_next_frame();
            }
            TickOutcome::Quit => break SessionEnd::Quit,
            TickOutcome::Defeated => {
                renderer.present(&build_snapshot(state, ctx.frame));
                clock.hold(state.tuning.defeat_delay_frames);
                break SessionEnd::Defeated;
            }
        }
    };

    let report = SessionReport {
        end,
        frames: ctx.frame,
        enemies_destroyed: state.stats.enemies_destroyed,
        damage_taken: state.stats.damage_taken,
    };
    log::info!(
        "Session ended ({:?}) after {} frames: {} enemies destroyed, {} damage taken",
        report.end,
        report.frames,
        report.enemies_destroyed,
        report.damage_taken
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopilot::ScriptedInput;
    use crate::sim::{GamePhase, HeldKeys, InputEvent};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<u64>,
    }

    impl Renderer for Recorder {
        fn present(&mut self, snapshot: &FrameSnapshot) {
            self.frames.push(snapshot.frame);
        }
    }

    #[test]
    fn test_quit_ends_session() {
        let mut state = GameState::new(Tuning::default());
        let mut ctx = SimContext::new(1);
        let mut input = ScriptedInput::new(vec![TickInput::default(); 5]);
        let mut renderer = Recorder::default();
        let mut clock = UnpacedClock::default();

        let report = run_session(&mut state, &mut ctx, &mut input, &mut renderer, &mut clock, None);

        assert_eq!(report.end, SessionEnd::Quit);
        assert_eq!(report.frames, 5);
        assert_eq!(renderer.frames, vec![1, 2, 3, 4, 5]);
        assert_eq!(clock.frames_waited, 5);
    }

    #[test]
    fn test_frame_limit() {
        let mut state = GameState::new(Tuning::default());
        let mut ctx = SimContext::new(1);
        let mut input = ScriptedInput::new(Vec::new()).repeat_last(TickInput::default());
        let mut renderer = Recorder::default();
        let mut clock = UnpacedClock::default();

        let report = run_session(
            &mut state,
            &mut ctx,
            &mut input,
            &mut renderer,
            &mut clock,
            Some(20),
        );
        assert_eq!(report.end, SessionEnd::FrameLimit);
        assert_eq!(report.frames, 20);
    }

    #[test]
    fn test_defeat_holds_for_delay() {
        let mut state = GameState::new(Tuning::default());
        state.player.hp = 1;
        let mut ctx = SimContext::new(1);
        ctx.frame = 1;

        // Drop a bomb right on the player
        let mut rng = SimContext::new(2).rng;
        let center = state.player.center();
        state.launch_bomb(0, center + glam::Vec2::new(1.0, 0.0), &mut rng);

        let mut input = ScriptedInput::new(vec![TickInput {
            held: HeldKeys::default(),
            events: vec![InputEvent::Fire],
        }]);
        let mut renderer = Recorder::default();
        let mut clock = UnpacedClock::default();

        let report = run_session(&mut state, &mut ctx, &mut input, &mut renderer, &mut clock, None);

        assert_eq!(report.end, SessionEnd::Defeated);
        assert_eq!(state.phase, GamePhase::Defeated);
        assert_eq!(report.damage_taken, 1);
        assert_eq!(clock.frames_waited, 50);
        assert_eq!(renderer.frames.len(), 1);
    }

    #[test]
    fn test_fixed_rate_clock_paces() {
        let mut clock = FixedRateClock::new(200);
        let start = Instant::now();
        clock.hold(4);
        // 4 frames at 5 ms, minus the first partial frame
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
