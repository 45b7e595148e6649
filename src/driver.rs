//! Frame scheduling
//!
//! The host's display-refresh primitive (requestAnimationFrame in a browser)
//! is modelled by [`FrameScheduler`]. A [`Driver`] owns an [`Engine`], asks
//! the scheduler for one frame at a time, and turns host timestamps into the
//! `dt` fed to `advance`.
//!
//! Time across a pause or a stop is discarded: the previous timestamp is
//! forgotten whenever the loop starts or pause toggles, so the first frame
//! afterwards advances by zero.

use crate::engine::Engine;
use crate::input::{InputSource, InputState};
use crate::renderer::Surface;
use crate::sim::GameEvent;

/// Identifies one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host primitive that fires a callback on the next display refresh
pub trait FrameScheduler {
    /// Ask for one callback. The host later calls [`Driver::on_frame`] with
    /// the returned handle.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending callback so it never fires
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for tests and headless runs: records requests, fires nothing
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent request still waiting to fire
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.last().copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Pop the next pending handle as if the host were about to fire it
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

/// Runs an engine from host frame callbacks
pub struct Driver<S: FrameScheduler, I: InputSource = InputState> {
    engine: Engine<I>,
    scheduler: S,
    /// The only callback allowed to run next
    pending: Option<FrameHandle>,
    /// Host timestamp (ms) of the previous frame, if any since the last
    /// start or pause toggle
    last_timestamp: Option<f64>,
}

impl<S: FrameScheduler, I: InputSource> Driver<S, I> {
    pub fn new(engine: Engine<I>, scheduler: S) -> Self {
        Self {
            engine,
            scheduler,
            pending: None,
            last_timestamp: None,
        }
    }

    pub fn engine(&self) -> &Engine<I> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<I> {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Frame currently scheduled, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Begin the frame chain. No-op if already running.
    pub fn start(&mut self) {
        if !self.engine.start() {
            return;
        }
        self.last_timestamp = None;
        self.schedule();
    }

    /// Cancel the pending frame and stop. After this returns no frame
    /// callback will advance or render.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.engine.stop();
    }

    /// Flip pause. The frame chain keeps running; paused time is discarded.
    pub fn toggle_pause(&mut self) -> bool {
        self.last_timestamp = None;
        self.engine.toggle_pause()
    }

    /// Fresh game. Clears pause, so any paused time is discarded too.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.engine.reset();
    }

    /// Host callback for `handle` at `timestamp_ms`.
    ///
    /// Runs `advance` then `render`, then requests the next frame while the
    /// engine is still running. Callbacks for handles that are not the
    /// pending one (cancelled or stale) are ignored.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        surface: &mut dyn Surface,
    ) -> Vec<GameEvent> {
        if self.pending != Some(handle) {
            log::trace!("Dropping stale frame {:?}", handle);
            return Vec::new();
        }
        self.pending = None;

        if !self.engine.is_running() {
            return Vec::new();
        }

        let dt = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        let events = self.engine.advance(dt);
        self.engine.render(surface);

        if self.engine.is_running() {
            self.schedule();
        } else {
            log::info!("Frame chain ended");
        }
        events
    }

    fn schedule(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;

    fn driver() -> Driver<ManualScheduler> {
        Driver::new(Engine::default(), ManualScheduler::new())
    }

    #[test]
    fn test_start_schedules_once() {
        let mut d = driver();
        d.start();
        d.start();
        assert_eq!(d.scheduler().pending_count(), 1);
        assert!(d.engine().is_running());
    }

    #[test]
    fn test_frames_chain() {
        let mut d = driver();
        let mut surface = RecordingSurface::new();
        d.start();

        let first = d.scheduler_mut().take_due().unwrap();
        d.on_frame(first, 1000.0, &mut surface);
        // First frame after start advances by zero
        assert_eq!(d.engine().state().ball.pos.x, 400.0);

        let second = d.scheduler_mut().take_due().unwrap();
        d.on_frame(second, 1010.0, &mut surface);
        assert!((d.engine().state().ball.pos.x - 402.4).abs() < 1e-3);
        assert_eq!(d.scheduler().pending_count(), 1);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut d = driver();
        let mut surface = RecordingSurface::new();
        d.start();
        let handle = d.pending().unwrap();

        d.stop();
        assert_eq!(d.scheduler().pending_count(), 0);
        assert_eq!(d.scheduler().cancelled(), &[handle]);

        // Host fires the callback anyway: nothing happens
        d.on_frame(handle, 5000.0, &mut surface);
        assert!(surface.commands.is_empty());
        assert_eq!(d.engine().state().frames, 0);
        assert!(d.pending().is_none());
    }
}
