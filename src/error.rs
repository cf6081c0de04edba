//! Error types for engine binding and mosaic packing.

use alloc::string::String;

/// Errors reported when a configuration, surface or card list is unusable.
///
/// Every variant describes a host-integration bug; none are produced while a
/// bound engine is running.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReboundError {
    /// A tuning value is NaN or infinite.
    #[error("tuning value `{field}` must be finite")]
    NonFinite { field: &'static str },
    /// A tuning value is finite but outside its allowed range.
    #[error("tuning value `{field}` must be {requirement}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
    },
    /// The scroll surface reported no usable metrics.
    #[error("scroll surface is detached or reports non-finite metrics")]
    SurfaceUnavailable,
    /// Container width is negative or not finite.
    #[error("container width must be finite and non-negative")]
    InvalidContainerWidth,
    /// Gap is negative or not finite.
    #[error("gap must be finite and non-negative")]
    InvalidGap,
    /// A card has a non-positive or non-finite size.
    #[error("card `{id}` must have a finite, positive width and height")]
    InvalidCardSize { id: String },
    /// Two cards share an id.
    #[error("card id `{id}` appears more than once")]
    DuplicateCardId { id: String },
    /// The pinned card is not among the cards being packed.
    #[error("pinned card `{id}` is not in the card list")]
    UnknownPinnedCard { id: String },
    /// The pinned card's drop position is not finite.
    #[error("pinned card `{id}` has a non-finite drop position")]
    InvalidPinPosition { id: String },
}
