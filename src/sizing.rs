//! Card sizing for the mosaic: one global unit drives every card's size.
//!
//! Landscape cards are `unit` tall and portrait cards `unit` wide, so the
//! short side of every image matches. The unit is calibrated against the
//! viewport by measuring the rendered cards (captions add height the unit
//! alone cannot predict).

use alloc::vec::Vec;

use log::debug;

use crate::error::ReboundError;

/// Largest fraction [`trimmed_mean`] trims from each end.
const MAX_TRIM_FRACTION: f64 = 0.49;

/// Tuning for unit calibration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SizingConfig {
    /// Desired short side of a card as a fraction of the viewport width. Default: 0.25.
    pub target_viewport_fraction: f64,
    /// Lower bound for the unit, px. Default: 120.
    pub min_unit: f64,
    /// Upper bound for the unit, px. Default: 520.
    pub max_unit: f64,
    /// Fraction trimmed from each end before averaging samples. Default: 0.10.
    pub trim_fraction: f64,
    /// Relative error accepted after the second pass. Default: 0.02.
    pub settle_tolerance: f64,
    /// Gap between cards passed to the packer, px. Default: 16.
    pub gap: f64,
}

impl SizingConfig {
    pub fn new() -> Self {
        SizingConfig {
            target_viewport_fraction: 0.25,
            min_unit: 120.0,
            max_unit: 520.0,
            trim_fraction: 0.10,
            settle_tolerance: 0.02,
            gap: 16.0,
        }
    }

    pub fn with_unit_bounds(mut self, min_unit: f64, max_unit: f64) -> Self {
        self.min_unit = min_unit;
        self.max_unit = max_unit;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn validate(&self) -> Result<(), ReboundError> {
        let fields = [
            ("target_viewport_fraction", self.target_viewport_fraction),
            ("min_unit", self.min_unit),
            ("max_unit", self.max_unit),
            ("trim_fraction", self.trim_fraction),
            ("settle_tolerance", self.settle_tolerance),
            ("gap", self.gap),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ReboundError::NonFinite { field });
            }
        }
        if self.target_viewport_fraction <= 0.0 {
            return Err(ReboundError::OutOfRange {
                field: "target_viewport_fraction",
                requirement: "greater than zero",
            });
        }
        if self.min_unit <= 0.0 || self.max_unit < self.min_unit {
            return Err(ReboundError::OutOfRange {
                field: "min_unit",
                requirement: "positive and no larger than max_unit",
            });
        }
        if !(0.0..0.5).contains(&self.trim_fraction) {
            return Err(ReboundError::OutOfRange { field: "trim_fraction", requirement: "in [0, 0.5)" });
        }
        if self.settle_tolerance < 0.0 || self.gap < 0.0 {
            return Err(ReboundError::OutOfRange {
                field: "settle_tolerance",
                requirement: "zero or greater",
            });
        }
        Ok(())
    }

    fn clamp_unit(&self, unit: f64) -> f64 {
        unit.clamp(self.min_unit, self.max_unit)
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Image box `(width, height)` for an aspect ratio (`width / height`).
///
/// Non-finite or non-positive ratios are treated as square.
pub fn card_size(aspect_ratio: f64, unit: f64) -> (f64, f64) {
    let ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 { aspect_ratio } else { 1.0 };
    if ratio >= 1.0 {
        (unit * ratio, unit)
    } else {
        (unit, unit / ratio)
    }
}

/// Aspect ratio from stored media dimensions, square when unknown.
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        width / height
    } else {
        1.0
    }
}

/// Robust average of measured short sides.
///
/// Trims `floor(n * trim_fraction)` samples from each end when at least five
/// remain; otherwise the median for three or more samples, else the mean.
/// Non-positive and non-finite samples are ignored. `None` when nothing is left.
/// `trim_fraction` is clamped into `[0, 0.49]`; NaN trims nothing.
pub fn trimmed_mean(samples: &[f64], trim_fraction: f64) -> Option<f64> {
    let trim_fraction = if trim_fraction.is_nan() {
        0.0
    } else {
        trim_fraction.clamp(0.0, MAX_TRIM_FRACTION)
    };
    let mut sorted: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|s| s.is_finite() && *s > 0.0)
        .collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let k = libm::floor(n as f64 * trim_fraction) as usize;
    if n >= 2 * k + 5 {
        let kept = &sorted[k..n - k];
        return Some(kept.iter().sum::<f64>() / kept.len() as f64);
    }
    if n >= 3 {
        return Some(sorted[n / 2]);
    }
    Some(sorted.iter().sum::<f64>() / n as f64)
}

/// Calibrate the global unit for `viewport_width`.
///
/// `measure(unit)` lays the cards out at `unit` and returns the rendered
/// short sides of every card. Returns the unit to use; when measuring yields
/// nothing, the viewport estimate is returned unchanged.
pub fn calibrate_unit<M>(viewport_width: f64, config: &SizingConfig, mut measure: M) -> Result<f64, ReboundError>
where
    M: FnMut(f64) -> Vec<f64>,
{
    config.validate()?;
    if !viewport_width.is_finite() || viewport_width <= 0.0 {
        return Err(ReboundError::InvalidContainerWidth);
    }

    let target = viewport_width * config.target_viewport_fraction;
    let mut unit = config.clamp_unit(target);

    let Some(measured) = trimmed_mean(&measure(unit), config.trim_fraction) else {
        return Ok(unit);
    };
    unit = config.clamp_unit(unit * (target / measured));

    let Some(measured) = trimmed_mean(&measure(unit), config.trim_fraction) else {
        return Ok(unit);
    };
    if libm::fabs((measured - target) / target) > config.settle_tolerance {
        unit = config.clamp_unit(unit * (target / measured));
    }

    debug!("calibrated unit {} for viewport {}", unit, viewport_width);
    Ok(unit)
}
