//! Frame observer trait for monitoring overscroll simulation progress.

use crate::float::Float;
use crate::spring::SpringState;

/// Trait for observing engine frames.
///
/// Implement this trait to monitor the simulation (e.g., for debugging,
/// recording traces, or asserting on per-frame behaviour). All methods have
/// default no-op implementations.
pub trait FrameObserver<F: Float> {
    /// Called after each integration sub-step.
    fn on_sub_step(&mut self, _index: usize) {}

    /// Called when idle input time releases the gesture.
    fn on_release(&mut self) {}

    /// Called when a frame completes and the spring is still moving.
    fn on_frame(&mut self, _state: &SpringState<F>, _dt: F) {}

    /// Called when the spring comes to rest and the loop should stop.
    fn on_settle(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpFrameObserver;

impl<F: Float> FrameObserver<F> for NoOpFrameObserver {}
