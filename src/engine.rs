//! Overscroll engine: boundary capture, input impulses and per-frame settling.
//!
//! The engine never schedules anything itself. A host feeds it input through
//! [`OverscrollEngine::handle_input`] and calls [`OverscrollEngine::tick`] once
//! per animation frame for as long as the previous call returned
//! [`FrameStatus::Running`].

use log::{debug, trace, warn};

use crate::config::OverscrollConfig;
use crate::error::ReboundError;
use crate::float::Float;
use crate::observer::{FrameObserver, NoOpFrameObserver};
use crate::spring::SpringState;

/// Which scroll boundary the current excursion belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeSign {
    None,
    /// Content pulled down past the top; positive offsets.
    Top,
    /// Content pushed up past the bottom; negative offsets.
    Bottom,
}

impl EdgeSign {
    /// `+1` for the top edge, `-1` for the bottom edge, `0` otherwise.
    pub fn sign<F: Float>(self) -> F {
        match self {
            EdgeSign::None => F::zero(),
            EdgeSign::Top => F::one(),
            EdgeSign::Bottom => -F::one(),
        }
    }
}

/// Lifecycle of one engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// At rest, no frames wanted.
    Idle,
    /// A gesture is feeding impulses.
    Displacing,
    /// Input released; the spring is returning to rest.
    Settling,
}

/// Scroll offsets reported by the host for the bound surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollMetrics<F: Float> {
    /// Current scroll offset from the top, px.
    pub scroll_top: F,
    /// Largest reachable scroll offset (`scrollHeight - clientHeight`), px.
    pub max_scroll_top: F,
}

impl<F: Float> ScrollMetrics<F> {
    pub fn new(scroll_top: F, max_scroll_top: F) -> Self {
        ScrollMetrics { scroll_top, max_scroll_top }
    }

    pub fn is_finite(&self) -> bool {
        self.scroll_top.is_finite() && self.max_scroll_top.is_finite()
    }
}

/// Outcome of feeding one input delta to the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Not at a boundary and not displaced: let the platform scroll.
    Ignored,
    /// Displaced, but the edge lock rejected the direction. No impulse was
    /// applied; native scrolling stays suppressed until the spring settles.
    Held,
    /// An impulse was applied. `start_loop` is set when the frame loop was
    /// idle and the host must schedule a frame.
    Captured { start_loop: bool },
}

impl Capture {
    /// Whether the host should suppress native scrolling for this event.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Capture::Ignored)
    }
}

/// Result of one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameStatus<F: Float> {
    /// Render `offset` and schedule another frame.
    Running { offset: F },
    /// At rest with offset exactly zero; stop scheduling frames.
    Settled,
}

impl<F: Float> FrameStatus<F> {
    pub fn is_settled(&self) -> bool {
        matches!(self, FrameStatus::Settled)
    }

    /// The visual offset to render for this frame.
    pub fn offset(&self) -> F {
        match *self {
            FrameStatus::Running { offset } => offset,
            FrameStatus::Settled => F::zero(),
        }
    }
}

/// One overscroll simulation bound to one scroll surface.
pub struct OverscrollEngine<F: Float> {
    config: OverscrollConfig<F>,
    spring: SpringState<F>,
    edge: EdgeSign,
    input_active: bool,
    last_input_ms: F,
    last_frame_ms: F,
    running: bool,
    rebound_injected: bool,
}

impl<F: Float> OverscrollEngine<F> {
    /// Build an engine at rest. Fails if any tuning value is non-finite or out of range.
    pub fn new(config: OverscrollConfig<F>) -> Result<Self, ReboundError> {
        config.validate()?;
        Ok(OverscrollEngine {
            config,
            spring: SpringState::at_rest(),
            edge: EdgeSign::None,
            input_active: false,
            last_input_ms: F::zero(),
            last_frame_ms: F::zero(),
            running: false,
            rebound_injected: false,
        })
    }

    pub fn config(&self) -> &OverscrollConfig<F> { &self.config }
    pub fn spring(&self) -> &SpringState<F> { &self.spring }
    pub fn position(&self) -> F { self.spring.position() }
    pub fn velocity(&self) -> F { self.spring.velocity() }
    pub fn edge(&self) -> EdgeSign { self.edge }
    pub fn is_input_active(&self) -> bool { self.input_active }

    /// True while the host should keep delivering frames.
    pub fn is_running(&self) -> bool { self.running }

    pub fn phase(&self) -> Phase {
        match (self.running, self.input_active) {
            (false, _) => Phase::Idle,
            (true, true) => Phase::Displacing,
            (true, false) => Phase::Settling,
        }
    }

    /// The boundary a delta pushes past, given where the surface is scrolled.
    ///
    /// A surface whose content fits (both edges reachable at once) is
    /// classified by the direction of the delta alone.
    pub fn boundary_for(&self, delta_y: F, metrics: ScrollMetrics<F>) -> EdgeSign {
        let epsilon = self.config.boundary_epsilon;
        let at_top = metrics.scroll_top <= epsilon;
        let at_bottom = metrics.scroll_top >= metrics.max_scroll_top - epsilon;

        if at_top && delta_y < F::zero() {
            EdgeSign::Top
        } else if at_bottom && delta_y > F::zero() {
            EdgeSign::Bottom
        } else {
            EdgeSign::None
        }
    }

    /// Feed one wheel or touch delta (positive scrolls content up, like `WheelEvent.deltaY`).
    pub fn handle_input(&mut self, delta_y: F, metrics: ScrollMetrics<F>, now_ms: F) -> Capture {
        let displaced = self.spring.position() != F::zero();
        let locked = self.spring.position().abs() > self.config.edge_lock_threshold;

        if !delta_y.is_finite() || delta_y == F::zero() {
            return if displaced { Capture::Held } else { Capture::Ignored };
        }

        let edge = if locked && self.edge != EdgeSign::None {
            let intent = if delta_y < F::zero() { EdgeSign::Top } else { EdgeSign::Bottom };
            if intent != self.edge {
                // Reversing mid-excursion ends the gesture; the spring takes over.
                self.release();
                return Capture::Held;
            }
            self.edge
        } else {
            match self.boundary_for(delta_y, metrics) {
                EdgeSign::None if displaced => return Capture::Held,
                EdgeSign::None => return Capture::Ignored,
                edge => edge,
            }
        };

        let magnitude = delta_y.abs().min(self.config.input_delta_cap);
        let resistance = F::one()
            + self.config.velocity_resistance * self.spring.velocity().abs()
            + self.config.position_resistance * self.spring.position().abs()
            + self.config.delta_resistance * magnitude * magnitude;
        let impulse = magnitude * self.config.input_gain / resistance;

        self.spring.displace(
            edge.sign::<F>() * impulse,
            self.config.impulse_velocity,
            self.config.max_overscroll,
        );
        self.edge = edge;
        self.input_active = true;
        self.last_input_ms = now_ms;
        self.rebound_injected = false;

        let start_loop = !self.running;
        if start_loop {
            self.running = true;
            self.last_frame_ms = now_ms;
            debug!("overscroll captured at {:?} edge, impulse {}", edge, impulse.to_f64());
        } else {
            trace!("overscroll impulse {} at {:?} edge", impulse.to_f64(), edge);
        }
        Capture::Captured { start_loop }
    }

    /// End the current gesture (touch lifted). Applies the rebound kick once.
    pub fn release(&mut self) {
        if !self.input_active {
            return;
        }
        self.input_active = false;

        if !self.rebound_injected && self.config.rebound_amount > F::zero() {
            let position = self.spring.position();
            let direction = if position == F::zero() { -F::one() } else { -position.signum_or_zero() };
            self.spring.kick(direction * self.config.rebound_amount * self.config.rebound_velocity);
            self.rebound_injected = true;
        }
    }

    /// Advance to `timestamp_ms` (a `requestAnimationFrame` timestamp).
    pub fn tick(&mut self, timestamp_ms: F) -> FrameStatus<F> {
        self.tick_with(timestamp_ms, &mut NoOpFrameObserver)
    }

    /// [`tick`](Self::tick) reporting progress to `observer`.
    pub fn tick_with<O: FrameObserver<F>>(
        &mut self,
        timestamp_ms: F,
        observer: &mut O,
    ) -> FrameStatus<F> {
        if !self.running {
            return FrameStatus::Settled;
        }

        let elapsed = timestamp_ms - self.last_frame_ms;
        let elapsed_ms = if elapsed.is_finite() {
            elapsed.clamp(F::zero(), self.config.max_dt_ms)
        } else {
            F::zero()
        };
        if timestamp_ms.is_finite() {
            self.last_frame_ms = timestamp_ms;
        }
        let dt = elapsed_ms / F::from_f64(1000.0);

        if self.input_active && timestamp_ms - self.last_input_ms > self.config.release_delay_ms {
            self.release();
            observer.on_release();
        }

        self.spring.step(dt, &self.config, observer);

        if !self.spring.is_finite() {
            warn!("overscroll state became non-finite; resetting to rest");
            self.reset();
            observer.on_settle();
            return FrameStatus::Settled;
        }

        if !self.input_active
            && self.spring.is_settled(self.config.settle_position, self.config.settle_velocity)
        {
            self.reset();
            debug!("overscroll settled");
            observer.on_settle();
            return FrameStatus::Settled;
        }

        observer.on_frame(&self.spring, dt);
        trace!(
            "overscroll frame: x={} v={}",
            self.spring.position().to_f64(),
            self.spring.velocity().to_f64()
        );
        FrameStatus::Running { offset: self.spring.position() }
    }

    /// Drop any excursion and return to `Idle` immediately.
    pub fn reset(&mut self) {
        self.spring.snap_to_rest();
        self.edge = EdgeSign::None;
        self.input_active = false;
        self.running = false;
        self.rebound_injected = false;
    }
}
