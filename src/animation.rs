//! The per-frame animation lifecycle.
//!
//! An [`Animation`] owns one boxed [`Effect`] and drives it through an
//! explicit three-state machine. The host loop calls [`Animation::tick`] once
//! per displayed frame; everything else (readiness polling, the frame
//! counter, pause semantics, one-shot failure reporting) lives here so the
//! effects stay pure update/render logic.

use crate::gfx::PixelBuffer;
use anyhow::Error;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Running,
    Paused,
}

/// Result of polling an effect that may still be acquiring resources.
pub enum Readiness {
    Ready,
    Pending,
    Failed(Error),
}

/// Per-frame context handed to effects. The frame counter is machine-owned
/// state, not a side effect of rendering.
pub struct FrameCtx {
    pub t: f32,
    pub dt: f32,
    pub frame: u64,
    pub w: usize,
    pub h: usize,
}

/// Capability interface implemented by each effect variant.
///
/// `update` mutates logical state (positions, angles); `render` owns all
/// buffer writes. The machine always invokes them as a pair.
pub trait Effect {
    fn name(&self) -> &'static str;

    /// Polled while the machine is `Stopped`. Effects without asynchronous
    /// setup are ready immediately.
    fn poll_ready(&mut self) -> Readiness {
        Readiness::Ready
    }

    fn update(&mut self, ctx: &FrameCtx);

    fn render(&mut self, ctx: &FrameCtx, fb: &mut PixelBuffer);

    fn on_resize(&mut self, _w: usize, _h: usize) {}
}

pub struct Animation {
    effect: Option<Box<dyn Effect>>,
    name: &'static str,
    state: AnimationState,
    frame: u64,
    started: Option<Instant>,
    last_tick: Option<Instant>,
    load_error: Option<Error>,
    load_failed: bool,
}

impl Animation {
    pub fn new(effect: Box<dyn Effect>) -> Self {
        Self {
            name: effect.name(),
            effect: Some(effect),
            state: AnimationState::Stopped,
            frame: 0,
            started: None,
            last_tick: None,
            load_error: None,
            load_failed: false,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn effect_name(&self) -> &'static str {
        self.name
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Flips between `Running` and `Paused`. A stopped animation (not yet
    /// ready, failed, or shut down) stays stopped.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            AnimationState::Running => AnimationState::Paused,
            AnimationState::Paused => AnimationState::Running,
            AnimationState::Stopped => AnimationState::Stopped,
        };
    }

    /// The asset-load failure, handed out exactly once.
    pub fn take_load_error(&mut self) -> Option<Error> {
        self.load_error.take()
    }

    /// Advances the animation by at most one `update` + `render` pair.
    ///
    /// While `Stopped`, polls the effect's readiness: a completed load starts
    /// the animation, a failure is recorded once and every later tick stays a
    /// cheap no-op. While `Paused`, does nothing.
    pub fn tick(&mut self, now: Instant, fb: &mut PixelBuffer) {
        let Some(effect) = self.effect.as_mut() else {
            return;
        };

        match self.state {
            AnimationState::Stopped => {
                if self.load_failed {
                    return;
                }
                match effect.poll_ready() {
                    Readiness::Ready => {
                        log::info!("{}: ready, starting", self.name);
                        self.state = AnimationState::Running;
                    }
                    Readiness::Pending => {}
                    Readiness::Failed(err) => {
                        log::warn!("{}: init failed: {err:#}", self.name);
                        self.load_error = Some(err);
                        self.load_failed = true;
                    }
                }
                return;
            }
            AnimationState::Paused => return,
            AnimationState::Running => {}
        }

        let started = *self.started.get_or_insert(now);
        let dt = self
            .last_tick
            .map(|prev| now.duration_since(prev).as_secs_f32())
            .unwrap_or(0.0)
            .max(1e-6);
        self.last_tick = Some(now);

        let ctx = FrameCtx {
            t: now.duration_since(started).as_secs_f32(),
            dt,
            frame: self.frame,
            w: fb.width(),
            h: fb.height(),
        };

        effect.update(&ctx);
        effect.render(&ctx, fb);
        self.frame += 1;
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        if let Some(effect) = self.effect.as_mut() {
            effect.on_resize(w, h);
        }
    }

    /// Releases the effect and everything it holds (texture, pending load).
    /// Idempotent; the machine stays `Stopped` afterwards.
    pub fn shutdown(&mut self) {
        if self.effect.take().is_some() {
            log::info!("{}: shut down", self.name);
        }
        self.state = AnimationState::Stopped;
    }
}
