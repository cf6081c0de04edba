//! Overscroll spring physics and deterministic mosaic packing.
//!
//! `rebound` is the numeric core behind a portfolio site's scroll feel and
//! photo mosaic. The host page supplies raw input and a frame clock; the crate
//! supplies offsets and positions.
//!
//! # Features
//!
//! - **Overscroll engine**: a stiffening, jerk-limited mass-spring-damper that
//!   turns wheel/touch input at a scroll boundary into a rubbery displacement
//!   and settles it back to exactly zero
//! - **Host binding**: `ScrollSurface` / `FrameScheduler` seams so a browser
//!   (or a test double) owns the DOM and `requestAnimationFrame`
//! - **Scroll glide**: animated scroll-to with friction and rubber-banded bounds
//! - **Mosaic packer**: largest-first, lowest-y greedy packing with a pinned
//!   card and hash-based tie-breaking; bit-identical for identical input
//! - **Sizing and drag**: unit calibration from measured cards and
//!   drag-to-pin gestures feeding the packer
//! - **Observable**: monitor frames via the `FrameObserver` trait
//! - **`no_std` compatible**: runs in `wasm32-unknown-unknown` unchanged

#![no_std]

extern crate alloc;

pub mod float;
pub mod config;
pub mod spring;
pub mod observer;
pub mod engine;
pub mod gesture;
pub mod binding;
pub mod glide;
pub mod packer;
pub mod sizing;
pub mod drag;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use config::{DampingModel, OverscrollConfig};
pub use spring::SpringState;
pub use observer::{FrameObserver, NoOpFrameObserver};
pub use engine::{Capture, EdgeSign, FrameStatus, OverscrollEngine, Phase, ScrollMetrics};
pub use gesture::{rubber_band, should_capture_horizontal, AxisIntent, TouchTracker};
pub use binding::{FrameScheduler, InputResponse, OverscrollBinding, ScrollSurface};
pub use glide::{GlideConfig, GlideRequest, GlideStep, ScrollGlide};
pub use packer::{pack, seeded_jitter, Card, Packing, PinnedCard, PlacedRect, Position};
pub use sizing::{aspect_ratio, calibrate_unit, card_size, trimmed_mean, SizingConfig};
pub use drag::DragGesture;
pub use error::ReboundError;
