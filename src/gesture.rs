//! Small input helpers shared by the scroll physics: rubber-banding, axis
//! intent and single-finger touch tracking.

use crate::float::Float;

/// Rubber-band an offset past a boundary.
///
/// Grows almost linearly (`coefficient * |offset|`) for small offsets and
/// approaches `dimension` asymptotically for large ones. Keeps the sign of
/// `offset`; zero stays zero.
pub fn rubber_band<F: Float>(offset: F, dimension: F, coefficient: F) -> F {
    if offset == F::zero() {
        return F::zero();
    }
    let dimension = dimension.max(F::one());
    let distance = offset.abs();
    let result = (coefficient * distance * dimension) / (dimension + coefficient * distance);
    offset.signum_or_zero() * result
}

/// Thresholds for deciding which axis a gesture means to scroll.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxisIntent<F: Float> {
    /// Minimum travel along the axis before it can win, px. Default: 10.
    pub min_gesture_px: F,
    /// How much the winning axis must dominate the other. Default: 1.15.
    pub axis_dominance: F,
}

impl<F: Float> AxisIntent<F> {
    pub fn new() -> Self {
        AxisIntent {
            min_gesture_px: F::from_f64(10.0),
            axis_dominance: F::from_f64(1.15),
        }
    }

    /// True when a drag of `(dx, dy)` is clearly horizontal.
    pub fn is_horizontal(&self, dx: F, dy: F) -> bool {
        let abs_x = dx.abs();
        abs_x >= self.min_gesture_px && abs_x > dy.abs() * self.axis_dominance
    }

    /// True when a drag of `(dx, dy)` is clearly vertical.
    pub fn is_vertical(&self, dx: F, dy: F) -> bool {
        let abs_y = dy.abs();
        abs_y >= self.min_gesture_px && abs_y > dx.abs() * self.axis_dominance
    }
}

impl<F: Float> Default for AxisIntent<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`AxisIntent::is_horizontal`] with default thresholds.
pub fn should_capture_horizontal<F: Float>(dx: F, dy: F) -> bool {
    AxisIntent::new().is_horizontal(dx, dy)
}

/// Tracks one finger and turns its movement into wheel-style deltas.
#[derive(Copy, Clone, Debug, Default)]
pub struct TouchTracker<F: Float> {
    active: bool,
    last_y: F,
}

impl<F: Float> TouchTracker<F> {
    pub fn new() -> Self {
        TouchTracker { active: false, last_y: F::zero() }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn begin(&mut self, client_y: F) {
        self.active = true;
        self.last_y = client_y;
    }

    /// Synthetic `deltaY` for a move to `client_y`, or `None` without a touch.
    ///
    /// A finger moving down drags content down, which is a negative scroll delta.
    pub fn move_to(&mut self, client_y: F) -> Option<F> {
        if !self.active {
            return None;
        }
        let dy = client_y - self.last_y;
        self.last_y = client_y;
        Some(-dy)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}
