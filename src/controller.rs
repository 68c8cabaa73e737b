//! Frame-driven interaction state machine around a [`WholeCube`].
//!
//! The controller never schedules anything itself. The host forwards pointer
//! events through [`InputHandler`] and calls [`PuzzleController::frame`] once
//! per display frame while [`PuzzleController::is_busy`] says there is work.

use std::time::Instant;

use rand::Rng;

use crate::animation::{AnimationStep, TurnAnimation};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::input::InputHandler;
use crate::math::{ScreenPoint, TransferParams};
use crate::renderer::FaceList;
use crate::whole_cube::{Turn, WholeCube};

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Pressed on a sticker, waiting for the drag to pick a turn
    Touched,
    /// Pressed beside the puzzle, dragging the view around
    Orbiting,
    /// A layer turn is playing
    Animating,
}

/// Outcome of a settled layer turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnSummary {
    pub turn: Turn,
    /// Frame rate over the turn, or `None` when a new touch cut it short
    pub fps: Option<f64>,
    /// Whether this turn finished a shuffled puzzle
    pub solved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Whether [`PuzzleController::faces`] changed during this frame
    pub redrawn: bool,
    pub completed: Option<TurnSummary>,
}

pub struct PuzzleController {
    config: EngineConfig,
    params: TransferParams,
    whole: WholeCube,
    phase: Phase,
    /// Touch origin, or the last applied view target while orbiting
    previous_point: ScreenPoint,
    /// Latest unapplied view target; replaced by every orbit drag
    pending_view: Option<ScreenPoint>,
    animation: Option<TurnAnimation>,
    /// Set by a shuffle, cleared by a reset or by solving
    playing: bool,
    dirty: bool,
    faces: FaceList,
    /// Turn cut short by a touch, reported on the next frame
    settled: Option<TurnSummary>,
}

impl PuzzleController {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let params = TransferParams::new(config.screen_size)?;
        let mut whole = WholeCube::new(config.columns)?;
        whole.view_mut().rotate_about_y(config.initial_yaw);
        whole.view_mut().rotate_about_x(config.initial_pitch);

        let mut controller = Self {
            config,
            params,
            whole,
            phase: Phase::Idle,
            previous_point: ScreenPoint::origin(),
            pending_view: None,
            animation: None,
            playing: false,
            dirty: false,
            faces: FaceList::new(),
            settled: None,
        };
        controller.redraw();
        Ok(controller)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn params(&self) -> &TransferParams {
        &self.params
    }

    pub fn whole_cube(&self) -> &WholeCube {
        &self.whole
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Faces of the most recent frame, back to front.
    pub fn faces(&self) -> &FaceList {
        &self.faces
    }

    /// Whether the host should keep calling [`PuzzleController::frame`].
    pub fn is_busy(&self) -> bool {
        self.animation.is_some()
            || self.pending_view.is_some()
            || self.dirty
            || self.settled.is_some()
    }

    /// Rebuilds the puzzle with a new size. The view orientation carries over;
    /// a turn in progress is dropped without being applied.
    pub fn set_columns(&mut self, columns: usize) -> Result<()> {
        if columns == 0 {
            return Err(EngineError::InvalidColumns(columns));
        }
        if columns == self.whole.columns() {
            return Ok(());
        }
        self.whole = WholeCube::with_view(columns, *self.whole.view())?;
        self.config.columns = columns;
        self.stop();
        log::info!("rebuilt puzzle with {columns} columns");
        self.redraw();
        Ok(())
    }

    pub fn set_screen_size(&mut self, screen_size: f64) -> Result<()> {
        self.params = TransferParams::new(screen_size)?;
        self.config.screen_size = screen_size;
        self.redraw();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.stop();
        self.playing = false;
        self.whole.reset();
        log::info!("puzzle reset");
        self.redraw();
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        self.stop();
        self.playing = true;
        self.whole.shuffle_with(rng);
        log::info!("puzzle shuffled");
        self.redraw();
    }

    /// Advances the controller to `now`: applies a pending view move, steps
    /// the turn animation and redraws if anything changed.
    pub fn frame(&mut self, now: Instant) -> FrameReport {
        let mut completed = self.settled.take();

        if let Some(target) = self.pending_view.take() {
            self.whole.move_angle(target - self.previous_point, &self.params);
            self.previous_point = target;
            self.dirty = true;
        }

        if let Some(animation) = self.animation.as_mut() {
            match animation.step(now) {
                AnimationStep::Rotate(rad) => self.whole.rotate(rad),
                AnimationStep::Finished { fps } => {
                    self.animation = None;
                    self.phase = Phase::Idle;
                    if let Some(turn) = self.whole.revert_and_coloring() {
                        log::debug!("turn finished at {fps:.1} fps");
                        completed = Some(self.summarize(turn, Some(fps)));
                    }
                }
            }
            self.dirty = true;
        }

        let redrawn = self.dirty;
        if redrawn {
            self.redraw();
        }
        log::trace!("frame: redrawn {redrawn}, {} faces", self.faces.len());
        FrameReport { redrawn, completed }
    }

    fn summarize(&mut self, turn: Turn, fps: Option<f64>) -> TurnSummary {
        let solved = self.playing && self.whole.judge();
        if solved {
            self.playing = false;
            log::info!("puzzle solved");
        }
        TurnSummary { turn, fps, solved }
    }

    /// Drops any animation and pointer state.
    fn stop(&mut self) {
        self.animation = None;
        self.pending_view = None;
        self.settled = None;
        self.phase = Phase::Idle;
    }

    fn redraw(&mut self) {
        self.whole.draw(&mut self.faces, &self.params);
        self.dirty = false;
    }
}

impl InputHandler for PuzzleController {
    /// Settles a turn still in flight, then hit-tests the last drawn frame.
    fn touch_start(&mut self, point: ScreenPoint) {
        if self.animation.take().is_some() {
            if let Some(turn) = self.whole.revert_and_coloring() {
                self.settled = Some(self.summarize(turn, None));
            }
            self.redraw();
        }
        // An unapplied view move never reached the screen, so the touch is
        // tested against what the user actually sees.
        self.pending_view = None;
        self.previous_point = point;

        self.phase = match self.whole.touch(point) {
            Some(detail) => {
                log::debug!(
                    "touched face {} of cell {}",
                    detail.face_index,
                    detail.cube_index
                );
                Phase::Touched
            }
            None => Phase::Orbiting,
        };
    }

    fn drag(&mut self, point: ScreenPoint) {
        match self.phase {
            Phase::Touched => {
                if self.whole.detect_axis(point - self.previous_point) {
                    self.animation = Some(TurnAnimation::new(self.config.rotation_speed));
                    self.phase = Phase::Animating;
                }
            }
            Phase::Orbiting => self.pending_view = Some(point),
            Phase::Idle | Phase::Animating => {}
        }
    }

    fn release(&mut self) {
        match self.phase {
            Phase::Touched => {
                self.whole.release();
                self.phase = Phase::Idle;
            }
            Phase::Orbiting => self.phase = Phase::Idle,
            Phase::Idle | Phase::Animating => {}
        }
    }
}
