//! Time-based quarter-turn animation.

use std::f64::consts::FRAC_PI_2;
use std::time::Instant;

/// Default turning speed in radians per millisecond.
pub const ROTATION_SPEED: f64 = 0.006;
/// Angle at which a turn is complete.
pub const MAX_RADIAN: f64 = FRAC_PI_2;

/// What the host should do with the turning layer on this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    /// Pose the layer at this angle and redraw.
    Rotate(f64),
    /// The turn is over and should be settled.
    Finished { fps: f64 },
}

/// Clock for a single layer turn.
///
/// The angle grows linearly with wall time from the first frame, so a slow
/// host drops frames rather than slowing the turn down.
#[derive(Debug, Clone)]
pub struct TurnAnimation {
    speed: f64,
    started: Option<Instant>,
    frames: u32,
}

impl TurnAnimation {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            started: None,
            frames: 0,
        }
    }

    /// Number of frames stepped so far, including a finishing one.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn step(&mut self, now: Instant) -> AnimationStep {
        let started = *self.started.get_or_insert(now);
        let elapsed_ms = now.saturating_duration_since(started).as_secs_f64() * 1000.0;
        self.frames += 1;

        let rad = elapsed_ms * self.speed;
        if rad < MAX_RADIAN {
            AnimationStep::Rotate(rad)
        } else {
            AnimationStep::Finished {
                fps: self.frames as f64 / elapsed_ms * 1000.0,
            }
        }
    }
}
