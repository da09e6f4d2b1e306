//! Animation driver
//!
//! Advances the backdrop clock by a fixed step per tick, independent of wall
//! time, so the animation paces the same on every machine at a given frame
//! rate. The driver is the only writer of elapsed time and layer rotation.

use glam::Vec2;

use crate::config::BackdropConfig;
use crate::constants::{BACK_ROTATION_STEP, FRONT_ROTATION_STEP};
use crate::frame::{FrameClock, FrameState, ReactorState};

/// Something that can ask the host for another frame
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Self-rescheduling per-frame driver.
///
/// Each [`tick`](Self::tick) composes one frame and schedules the next one.
/// After [`cancel`](Self::cancel) ticks return `None` and nothing is
/// scheduled again.
pub struct AnimationDriver<S: FrameScheduler> {
    scheduler: S,
    clock: FrameClock,
    time_step: f32,
    cancelled: bool,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub fn new(scheduler: S, time_step: f32) -> Self {
        Self {
            scheduler,
            clock: FrameClock::default(),
            time_step,
            cancelled: false,
        }
    }

    /// Schedule the first frame
    pub fn start(&mut self) {
        if !self.cancelled {
            self.scheduler.request_frame();
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Advance the clock and compose the frame to draw
    pub fn tick(&mut self, reactors: &ReactorState, config: &BackdropConfig) -> Option<FrameState> {
        if self.cancelled {
            return None;
        }

        self.clock.elapsed_time += self.time_step;
        self.clock.back_rotation += Vec2::from_array(BACK_ROTATION_STEP);
        self.clock.front_rotation += Vec2::from_array(FRONT_ROTATION_STEP);
        self.clock.ticks += 1;

        let frame = FrameState::compose(&self.clock, reactors, config);
        self.scheduler.request_frame();
        Some(frame)
    }

    /// Stop issuing frames. Idempotent.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("Animation driver cancelled after {} ticks", self.clock.ticks);
            self.cancelled = true;
        }
    }
}
