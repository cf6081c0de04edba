//! Stiffening, jerk-limited mass-spring-damper used for overscroll offsets.
//!
//! The model per sub-step `h`:
//!
//! ```text
//! k_eff = k0 + k1 * |x|
//! c_eff = damping.coefficient(k_eff, m, v)
//! a_raw = (-k_eff * x - c_eff * v) / m
//! a     = clamp(a_raw, a_prev - J * h, a_prev + J * h)
//! v    += a * h
//! x    += v * h
//! ```
//!
//! Summed over a frame of length `dt` the acceleration moves by at most
//! `J * dt`, whatever the sub-step count.

use crate::config::OverscrollConfig;
use crate::float::Float;
use crate::observer::FrameObserver;

/// Position, velocity and last acceleration of one overscroll spring.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringState<F: Float> {
    position: F,
    velocity: F,
    previous_acceleration: F,
}

impl<F: Float> SpringState<F> {
    /// A spring at rest.
    pub fn at_rest() -> Self {
        SpringState {
            position: F::zero(),
            velocity: F::zero(),
            previous_acceleration: F::zero(),
        }
    }

    /// A spring released from `position` with `velocity` and no prior acceleration.
    pub fn new(position: F, velocity: F) -> Self {
        SpringState {
            position,
            velocity,
            previous_acceleration: F::zero(),
        }
    }

    pub fn position(&self) -> F { self.position }
    pub fn velocity(&self) -> F { self.velocity }
    pub fn previous_acceleration(&self) -> F { self.previous_acceleration }

    /// Shift by an input impulse: the position moves by `impulse` (clamped to
    /// `±limit`) and `impulse * velocity_gain` is added to the velocity.
    pub fn displace(&mut self, impulse: F, velocity_gain: F, limit: F) {
        self.position = (self.position + impulse).clamp(-limit, limit);
        self.velocity = self.velocity + impulse * velocity_gain;
    }

    /// Add `delta_velocity` without moving.
    pub fn kick(&mut self, delta_velocity: F) {
        self.velocity = self.velocity + delta_velocity;
    }

    /// Advance by `dt` seconds using `config.sub_steps` semi-implicit Euler steps.
    pub fn step<O: FrameObserver<F>>(
        &mut self,
        dt: F,
        config: &OverscrollConfig<F>,
        observer: &mut O,
    ) {
        let sub_steps = config.sub_steps.max(1);
        let h = dt / F::from_f64(sub_steps as f64);
        let limit = config.max_overscroll;
        let max_delta = config.jerk_limit * h;

        for i in 0..sub_steps {
            let stiffness = config.stiffness + config.stiffening * self.position.abs();
            let damping = config.damping.coefficient(stiffness, config.mass, self.velocity);
            let raw = (-stiffness * self.position - damping * self.velocity) / config.mass;

            let accel = raw.clamp(
                self.previous_acceleration - max_delta,
                self.previous_acceleration + max_delta,
            );
            self.previous_acceleration = accel;

            self.velocity = self.velocity + accel * h;
            self.position = self.position + self.velocity * h;

            if self.position.abs() > limit {
                self.position = limit * self.position.signum_or_zero();
                // Travel stops at the limit; only velocity heading back survives.
                if self.velocity * self.position > F::zero() {
                    self.velocity = F::zero();
                }
            }
            observer.on_sub_step(i);
        }
    }

    /// True when both position and velocity are strictly inside the thresholds.
    pub fn is_settled(&self, eps_pos: F, eps_vel: F) -> bool {
        self.position.abs() < eps_pos && self.velocity.abs() < eps_vel
    }

    /// False if any component became NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.previous_acceleration.is_finite()
    }

    /// Zero position, velocity and acceleration.
    pub fn snap_to_rest(&mut self) {
        *self = Self::at_rest();
    }
}

impl<F: Float> Default for SpringState<F> {
    fn default() -> Self {
        Self::at_rest()
    }
}
