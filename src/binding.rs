//! Binding an [`OverscrollEngine`] to a host scroll surface and frame clock.
//!
//! The host owns the DOM (or whatever draws the content). It forwards raw
//! events to an [`OverscrollBinding`] and calls [`OverscrollBinding::on_frame`]
//! from the frame callback it was asked to schedule.

use log::debug;

use crate::config::OverscrollConfig;
use crate::engine::{Capture, FrameStatus, OverscrollEngine, ScrollMetrics};
use crate::error::ReboundError;
use crate::float::Float;
use crate::gesture::TouchTracker;

/// The scrollable element an engine is bound to.
pub trait ScrollSurface<F: Float> {
    /// Current scroll metrics, or `None` once the element is detached.
    fn metrics(&self) -> Option<ScrollMetrics<F>>;

    /// Render the visual offset (e.g. `translateY(offset px)` on the content).
    fn apply_offset(&mut self, offset: F);
}

/// The host's per-frame callback primitive (`requestAnimationFrame`).
pub trait FrameScheduler {
    type Handle;

    /// Ask for one call to [`OverscrollBinding::on_frame`] on the next frame.
    fn request_frame(&mut self) -> Self::Handle;

    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// What the host should do with the event that produced an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputResponse {
    /// Let the platform scroll natively.
    PassThrough,
    /// Call `preventDefault()`: the engine consumed the event.
    PreventDefault,
}

impl From<Capture> for InputResponse {
    fn from(capture: Capture) -> Self {
        if capture.prevents_default() {
            InputResponse::PreventDefault
        } else {
            InputResponse::PassThrough
        }
    }
}

/// A bound engine: the handle returned by [`OverscrollBinding::bind`].
pub struct OverscrollBinding<F: Float, S: ScrollSurface<F>, H: FrameScheduler> {
    engine: OverscrollEngine<F>,
    surface: S,
    scheduler: H,
    pending: Option<H::Handle>,
    touch: TouchTracker<F>,
}

impl<F, S, H> OverscrollBinding<F, S, H>
where
    F: Float,
    S: ScrollSurface<F>,
    H: FrameScheduler,
{
    /// Validate `config`, check that `surface` is attached, and bind.
    ///
    /// No frame is requested until input is captured.
    pub fn bind(surface: S, scheduler: H, config: OverscrollConfig<F>) -> Result<Self, ReboundError> {
        let engine = OverscrollEngine::new(config)?;
        match surface.metrics() {
            Some(metrics) if metrics.is_finite() => {
                debug!(
                    "overscroll bound: scroll_top={} max_scroll_top={}",
                    metrics.scroll_top.to_f64(),
                    metrics.max_scroll_top.to_f64()
                );
            }
            _ => return Err(ReboundError::SurfaceUnavailable),
        }

        Ok(OverscrollBinding {
            engine,
            surface,
            scheduler,
            pending: None,
            touch: TouchTracker::new(),
        })
    }

    pub fn engine(&self) -> &OverscrollEngine<F> { &self.engine }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn scheduler(&self) -> &H { &self.scheduler }

    /// True while a frame request is outstanding.
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// A `wheel` event.
    pub fn on_wheel(&mut self, delta_y: F, now_ms: F) -> InputResponse {
        self.feed(delta_y, now_ms)
    }

    /// A single-finger `touchstart`.
    pub fn on_touch_start(&mut self, client_y: F) {
        self.touch.begin(client_y);
    }

    /// A single-finger `touchmove`.
    pub fn on_touch_move(&mut self, client_y: F, now_ms: F) -> InputResponse {
        match self.touch.move_to(client_y) {
            Some(delta_y) => self.feed(delta_y, now_ms),
            None => InputResponse::PassThrough,
        }
    }

    /// `touchend` or `touchcancel`.
    pub fn on_touch_end(&mut self) {
        if !self.touch.is_active() {
            return;
        }
        self.touch.end();
        self.engine.release();
    }

    /// The frame callback requested through the scheduler fired.
    pub fn on_frame(&mut self, timestamp_ms: F) -> FrameStatus<F> {
        self.pending = None;
        let status = self.engine.tick(timestamp_ms);
        self.surface.apply_offset(status.offset());
        if !status.is_settled() {
            self.pending = Some(self.scheduler.request_frame());
        }
        status
    }

    /// Tear down: cancel the outstanding frame, reset the offset to zero and
    /// hand the surface and scheduler back.
    pub fn unbind(self) -> (S, H) {
        let OverscrollBinding { mut surface, mut scheduler, pending, .. } = self;
        if let Some(handle) = pending {
            scheduler.cancel_frame(handle);
        }
        surface.apply_offset(F::zero());
        debug!("overscroll unbound");
        (surface, scheduler)
    }

    fn feed(&mut self, delta_y: F, now_ms: F) -> InputResponse {
        let Some(metrics) = self.surface.metrics() else {
            return InputResponse::PassThrough;
        };

        let capture = self.engine.handle_input(delta_y, metrics, now_ms);
        if let Capture::Captured { .. } = capture {
            self.surface.apply_offset(self.engine.position());
            if self.pending.is_none() {
                self.pending = Some(self.scheduler.request_frame());
            }
        }
        capture.into()
    }
}
