//! Tuning configuration for the overscroll engine.

use crate::error::ReboundError;
use crate::float::Float;

/// How the spring's damping coefficient is derived each sub-step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "model", rename_all = "snake_case"))]
pub enum DampingModel<F: Float> {
    /// `c = 2 * ratio * sqrt(k_eff * m)`: a fixed fraction of critical damping
    /// at the current (stiffened) stiffness.
    Ratio { ratio: F },
    /// `c = base + per_velocity * |v|`.
    Legacy { base: F, per_velocity: F },
}

impl<F: Float> DampingModel<F> {
    /// Damping coefficient for the given stiffness, mass and velocity.
    pub fn coefficient(&self, stiffness: F, mass: F, velocity: F) -> F {
        match *self {
            DampingModel::Ratio { ratio } => F::two() * ratio * (stiffness * mass).sqrt(),
            DampingModel::Legacy { base, per_velocity } => base + per_velocity * velocity.abs(),
        }
    }

    fn scaled(self, factor: F) -> Self {
        match self {
            DampingModel::Ratio { ratio } => DampingModel::Ratio { ratio: ratio * factor },
            DampingModel::Legacy { base, per_velocity } => DampingModel::Legacy {
                base: base * factor,
                per_velocity,
            },
        }
    }
}

/// Tuning for one bound scroll surface.
///
/// Immutable once an engine is built from it; every engine owns its copy.
///
/// # Builder Pattern
/// ```
/// use rebound::config::{DampingModel, OverscrollConfig};
///
/// let config: OverscrollConfig<f64> = OverscrollConfig::new()
///     .with_stiffness(200.0)
///     .with_damping(DampingModel::Ratio { ratio: 1.1 })
///     .with_max_overscroll(60.0)
///     .with_reduced_motion(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverscrollConfig<F: Float> {
    /// Base stiffness `k0` (N/px with unit mass). Default: 180.
    pub stiffness: F,
    /// Stiffness added per px of displacement (`k1`). Default: 4.
    pub stiffening: F,
    /// Damping model. Default: critical (`ratio = 1`).
    pub damping: DampingModel<F>,
    /// Simulated mass. Default: 1.
    pub mass: F,
    /// Maximum change of acceleration per second, px/s³. Default: 500 000.
    pub jerk_limit: F,
    /// Maximum visual displacement, px. Default: 72.
    pub max_overscroll: F,
    /// Displacement per px of input delta before resistance. Default: 0.38.
    pub input_gain: F,
    /// Input deltas are capped to this magnitude, px. Default: 120.
    pub input_delta_cap: F,
    /// Velocity injected per px of impulse, 1/s. Default: 8.
    pub impulse_velocity: F,
    /// Resistance added per px/s of current velocity. Default: 0.028.
    pub velocity_resistance: F,
    /// Resistance added per px of current displacement. Default: 0.02.
    pub position_resistance: F,
    /// Resistance added per px² of input delta. Default: 0.0016.
    pub delta_resistance: F,
    /// Fraction of `rebound_velocity` kicked back on release. 0 disables. Default: 0.05.
    pub rebound_amount: F,
    /// Scale of the release kick, px/s. Default: 140.
    pub rebound_velocity: F,
    /// Quiet time after the last input before it counts as released, ms. Default: 70.
    pub release_delay_ms: F,
    /// Displacement beyond which the engaged edge is locked, px. Default: 1.
    pub edge_lock_threshold: F,
    /// Distance from an edge that still counts as "at the edge", px. Default: 1.
    pub boundary_epsilon: F,
    /// Position below which the spring may settle, px. Default: 0.2.
    pub settle_position: F,
    /// Velocity below which the spring may settle, px/s. Default: 3.
    pub settle_velocity: F,
    /// Frame delta clamp, ms. Default: 32.
    pub max_dt_ms: F,
    /// Integration sub-steps per frame. Default: 4.
    pub sub_steps: usize,
}

impl<F: Float> OverscrollConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        OverscrollConfig {
            stiffness: F::from_f64(180.0),
            stiffening: F::from_f64(4.0),
            damping: DampingModel::Ratio { ratio: F::one() },
            mass: F::one(),
            jerk_limit: F::from_f64(500_000.0),
            max_overscroll: F::from_f64(72.0),
            input_gain: F::from_f64(0.38),
            input_delta_cap: F::from_f64(120.0),
            impulse_velocity: F::from_f64(8.0),
            velocity_resistance: F::from_f64(0.028),
            position_resistance: F::from_f64(0.02),
            delta_resistance: F::from_f64(0.0016),
            rebound_amount: F::from_f64(0.05),
            rebound_velocity: F::from_f64(140.0),
            release_delay_ms: F::from_f64(70.0),
            edge_lock_threshold: F::one(),
            boundary_epsilon: F::one(),
            settle_position: F::from_f64(0.2),
            settle_velocity: F::from_f64(3.0),
            max_dt_ms: F::from_f64(32.0),
            sub_steps: 4,
        }
    }

    /// Set the base stiffness.
    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Set the displacement stiffening term.
    pub fn with_stiffening(mut self, stiffening: F) -> Self {
        self.stiffening = stiffening;
        self
    }

    /// Set the damping model.
    pub fn with_damping(mut self, damping: DampingModel<F>) -> Self {
        self.damping = damping;
        self
    }

    /// Set the mass.
    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    /// Set the jerk limit.
    pub fn with_jerk_limit(mut self, jerk_limit: F) -> Self {
        self.jerk_limit = jerk_limit;
        self
    }

    /// Set the maximum overscroll distance.
    pub fn with_max_overscroll(mut self, max_overscroll: F) -> Self {
        self.max_overscroll = max_overscroll;
        self
    }

    /// Set the input gain.
    pub fn with_input_gain(mut self, input_gain: F) -> Self {
        self.input_gain = input_gain;
        self
    }

    /// Set the rebound kick fraction.
    pub fn with_rebound_amount(mut self, rebound_amount: F) -> Self {
        self.rebound_amount = rebound_amount;
        self
    }

    /// Set the boundary epsilon.
    pub fn with_boundary_epsilon(mut self, boundary_epsilon: F) -> Self {
        self.boundary_epsilon = boundary_epsilon;
        self
    }

    /// Set both settle thresholds.
    pub fn with_settle_thresholds(mut self, position: F, velocity: F) -> Self {
        self.settle_position = position;
        self.settle_velocity = velocity;
        self
    }

    /// Set the frame delta clamp.
    pub fn with_max_dt_ms(mut self, max_dt_ms: F) -> Self {
        self.max_dt_ms = max_dt_ms;
        self
    }

    /// Set the number of sub-steps.
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    /// Apply [`reduced_motion`](Self::reduced_motion) when `enabled`.
    pub fn with_reduced_motion(self, enabled: bool) -> Self {
        if enabled {
            self.reduced_motion()
        } else {
            self
        }
    }

    /// Shorter travel, no overshoot kick, heavier damping and a gentler jerk
    /// limit: a near-linear snap back instead of a springy rebound.
    pub fn reduced_motion(mut self) -> Self {
        self.max_overscroll = self.max_overscroll.min(F::from_f64(20.0));
        self.rebound_amount = F::zero();
        self.damping = self.damping.scaled(F::from_f64(1.35));
        self.jerk_limit = self.jerk_limit * F::from_f64(0.65);
        self
    }

    /// Check every value for finiteness and range.
    pub fn validate(&self) -> Result<(), ReboundError> {
        let (damping_a, damping_b) = match self.damping {
            DampingModel::Ratio { ratio } => (("damping.ratio", ratio), ("damping.ratio", ratio)),
            DampingModel::Legacy { base, per_velocity } => {
                (("damping.base", base), ("damping.per_velocity", per_velocity))
            }
        };

        let positive = [
            ("stiffness", self.stiffness),
            ("mass", self.mass),
            ("jerk_limit", self.jerk_limit),
            ("max_overscroll", self.max_overscroll),
            ("input_delta_cap", self.input_delta_cap),
            ("settle_position", self.settle_position),
            ("settle_velocity", self.settle_velocity),
            ("max_dt_ms", self.max_dt_ms),
        ];
        let non_negative = [
            ("stiffening", self.stiffening),
            ("input_gain", self.input_gain),
            ("impulse_velocity", self.impulse_velocity),
            ("velocity_resistance", self.velocity_resistance),
            ("position_resistance", self.position_resistance),
            ("delta_resistance", self.delta_resistance),
            ("rebound_amount", self.rebound_amount),
            ("rebound_velocity", self.rebound_velocity),
            ("release_delay_ms", self.release_delay_ms),
            ("edge_lock_threshold", self.edge_lock_threshold),
            ("boundary_epsilon", self.boundary_epsilon),
            damping_a,
            damping_b,
        ];

        for &(field, value) in positive.iter().chain(non_negative.iter()) {
            if !value.is_finite() {
                return Err(ReboundError::NonFinite { field });
            }
        }
        for (field, value) in positive {
            if value <= F::zero() {
                return Err(ReboundError::OutOfRange { field, requirement: "greater than zero" });
            }
        }
        for (field, value) in non_negative {
            if value < F::zero() {
                return Err(ReboundError::OutOfRange { field, requirement: "zero or greater" });
            }
        }
        // Zero base damping leaves an undamped spring that never settles.
        let (field, damping) = match self.damping {
            DampingModel::Ratio { ratio } => ("damping.ratio", ratio),
            DampingModel::Legacy { base, .. } => ("damping.base", base),
        };
        if damping <= F::zero() {
            return Err(ReboundError::OutOfRange { field, requirement: "greater than zero" });
        }
        if self.sub_steps == 0 {
            return Err(ReboundError::OutOfRange { field: "sub_steps", requirement: "at least 1" });
        }

        Ok(())
    }
}

impl<F: Float> Default for OverscrollConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
