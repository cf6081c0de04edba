//! Animated scroll-to with inertia, friction and rubber-banded bounds.
//!
//! Used for programmatic scrolling (paging a carousel, jumping to a section).
//! Like the overscroll engine it is clocked by the host: call
//! [`ScrollGlide::tick`] every frame until it reports [`GlideStep::Done`].

use log::debug;

use crate::error::ReboundError;
use crate::float::Float;
use crate::gesture::rubber_band;

/// Tuning for [`ScrollGlide`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlideConfig<F: Float> {
    pub stiffness: F,
    pub damping: F,
    pub mass: F,
    /// Exponential velocity decay per second.
    pub friction_per_second: F,
    pub min_velocity: F,
    pub max_velocity: F,
    pub settle_distance: F,
    pub settle_velocity: F,
    pub rubber_band_coefficient: F,
    /// Velocity multiplier on first contact with a bound (negated on use).
    pub bounce_energy_loss: F,
    /// Velocity multiplier on every later frame spent outside the bounds.
    pub boundary_damping: F,
    pub max_dt_ms: F,
}

impl<F: Float> GlideConfig<F> {
    pub fn new() -> Self {
        GlideConfig {
            stiffness: F::from_f64(220.0),
            damping: F::from_f64(28.0),
            mass: F::one(),
            friction_per_second: F::from_f64(9.5),
            min_velocity: F::from_f64(8.0),
            max_velocity: F::from_f64(5200.0),
            settle_distance: F::from_f64(0.5),
            settle_velocity: F::from_f64(4.0),
            rubber_band_coefficient: F::from_f64(0.18),
            bounce_energy_loss: F::from_f64(0.3),
            boundary_damping: F::from_f64(0.68),
            max_dt_ms: F::from_f64(34.0),
        }
    }

    pub fn validate(&self) -> Result<(), ReboundError> {
        let fields = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("friction_per_second", self.friction_per_second),
            ("min_velocity", self.min_velocity),
            ("max_velocity", self.max_velocity),
            ("settle_distance", self.settle_distance),
            ("settle_velocity", self.settle_velocity),
            ("rubber_band_coefficient", self.rubber_band_coefficient),
            ("bounce_energy_loss", self.bounce_energy_loss),
            ("boundary_damping", self.boundary_damping),
            ("max_dt_ms", self.max_dt_ms),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ReboundError::NonFinite { field });
            }
            if value < F::zero() {
                return Err(ReboundError::OutOfRange { field, requirement: "zero or greater" });
            }
        }
        for (field, value) in [("stiffness", self.stiffness), ("mass", self.mass), ("max_dt_ms", self.max_dt_ms)] {
            if value <= F::zero() {
                return Err(ReboundError::OutOfRange { field, requirement: "greater than zero" });
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for GlideConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a glide starts and where it should end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlideRequest<F: Float> {
    /// Current scroll offset.
    pub from: F,
    /// Desired offset; clamped into `[0, max_scroll]`.
    pub target: F,
    /// Largest reachable offset.
    pub max_scroll: F,
    /// Viewport extent along the axis, used to size the rubber band.
    pub viewport: F,
    /// Initial velocity, px/s (e.g. from a fling).
    pub initial_velocity: F,
}

/// Result of one glide frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GlideStep<F: Float> {
    /// Write `position` to the scroll offset and keep ticking.
    Running { position: F },
    /// Write `position` (the target) and stop.
    Done { position: F },
}

impl<F: Float> GlideStep<F> {
    pub fn position(&self) -> F {
        match *self {
            GlideStep::Running { position } | GlideStep::Done { position } => position,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, GlideStep::Done { .. })
    }
}

/// A spring-driven scroll animation toward a target offset.
pub struct ScrollGlide<F: Float> {
    config: GlideConfig<F>,
    position: F,
    velocity: F,
    target: F,
    max_scroll: F,
    viewport: F,
    last_ms: F,
    was_out_of_bounds: bool,
    active: bool,
}

impl<F: Float> ScrollGlide<F> {
    pub fn new(config: GlideConfig<F>) -> Result<Self, ReboundError> {
        config.validate()?;
        Ok(ScrollGlide {
            config,
            position: F::zero(),
            velocity: F::zero(),
            target: F::zero(),
            max_scroll: F::zero(),
            viewport: F::zero(),
            last_ms: F::zero(),
            was_out_of_bounds: false,
            active: false,
        })
    }

    pub fn is_active(&self) -> bool { self.active }
    pub fn target(&self) -> F { self.target }
    pub fn velocity(&self) -> F { self.velocity }

    /// Start (or restart) a glide, superseding any glide in flight.
    ///
    /// With `reduced_motion` the glide finishes immediately at the target.
    pub fn start(&mut self, request: GlideRequest<F>, now_ms: F, reduced_motion: bool) -> GlideStep<F> {
        let max_scroll = request.max_scroll.max(F::zero());
        let max_velocity = self.config.max_velocity;

        self.max_scroll = max_scroll;
        self.viewport = request.viewport;
        self.position = request.from;
        self.velocity = request.initial_velocity.clamp(-max_velocity, max_velocity);
        self.target = request.target.clamp(F::zero(), max_scroll);
        self.last_ms = now_ms;
        self.was_out_of_bounds = false;

        if reduced_motion {
            self.finish()
        } else {
            self.active = true;
            debug!("glide {} -> {}", request.from.to_f64(), self.target.to_f64());
            GlideStep::Running { position: self.position.clamp(F::zero(), max_scroll) }
        }
    }

    /// Advance to `timestamp_ms`.
    pub fn tick(&mut self, timestamp_ms: F) -> GlideStep<F> {
        if !self.active {
            return GlideStep::Done { position: self.target };
        }

        let elapsed = timestamp_ms - self.last_ms;
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(F::zero(), self.config.max_dt_ms)
        } else {
            F::zero()
        };
        let dt = elapsed / F::from_f64(1000.0);
        if timestamp_ms.is_finite() {
            self.last_ms = timestamp_ms;
        }

        let c = &self.config;
        let displacement = self.target - self.position;
        let accel = (c.stiffness * displacement - c.damping * self.velocity) / c.mass;
        self.velocity = self.velocity + accel * dt;
        self.velocity = self.velocity * (-c.friction_per_second * dt).exp();
        self.position = self.position + self.velocity * dt;

        let out_of_bounds = self.position < F::zero() || self.position > self.max_scroll;
        if out_of_bounds {
            let (base, outside) = if self.position < F::zero() {
                (F::zero(), self.position)
            } else {
                (self.max_scroll, self.position - self.max_scroll)
            };
            self.position = base + rubber_band(outside, self.viewport, c.rubber_band_coefficient);

            // Flip once on contact; afterwards only bleed speed, so the edge
            // does not double-bounce.
            self.velocity = if self.was_out_of_bounds {
                self.velocity * c.boundary_damping
            } else {
                -self.velocity * c.bounce_energy_loss
            };
        }
        self.was_out_of_bounds = out_of_bounds;

        let rendered = self.position.clamp(F::zero(), self.max_scroll);
        let settled = (self.target - rendered).abs() <= c.settle_distance
            && self.velocity.abs() <= c.settle_velocity.max(c.min_velocity);

        if settled || !self.position.is_finite() || !self.velocity.is_finite() {
            self.finish()
        } else {
            GlideStep::Running { position: rendered }
        }
    }

    /// Stop where the glide was heading.
    pub fn finish(&mut self) -> GlideStep<F> {
        self.position = self.target;
        self.velocity = F::zero();
        self.active = false;
        GlideStep::Done { position: self.target }
    }
}
