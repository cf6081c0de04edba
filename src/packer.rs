//! Deterministic greedy mosaic packer for photo and video cards.
//!
//! Cards are placed largest first. For each card the candidate x offsets are
//! the left edge and every placed rectangle's right edge plus the gap; each
//! candidate drops to its lowest collision-free y, and the candidate yielding
//! the smallest total height wins. Exact ties are broken by a tiny hash-based
//! jitter, then by lower y, then by lower x, so identical input always
//! produces bit-identical output.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use log::{debug, trace};

use crate::error::ReboundError;

/// A card to be placed, measured at call time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl Card {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Card { id: id.into(), width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A card the user dropped at an explicit position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinnedCard {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl PinnedCard {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        PinnedCard { id: id.into(), x, y }
    }
}

/// Top-left corner of a placed card, px from the container's origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A card's footprint once placed.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRect {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a `width × height` box at `(x, y)` comes closer than `gap` to this rect.
    pub fn collides(&self, x: f64, y: f64, width: f64, height: f64, gap: f64) -> bool {
        overlap_1d(x, x + width, self.x - gap, self.right() + gap)
            && overlap_1d(y, y + height, self.y - gap, self.bottom() + gap)
    }
}

/// Output of [`pack`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packing {
    /// One entry per input card, keyed by id.
    pub positions: BTreeMap<String, Position>,
    /// Bottom edge of the lowest card; the container height to reserve.
    pub total_height: f64,
}

/// Pack `cards` into a column of `container_width`, keeping `gap` between cards.
///
/// The `pinned` card, if any, is placed first at its drop position clamped
/// into the container; everything else flows around it.
pub fn pack(
    cards: &[Card],
    container_width: f64,
    gap: f64,
    pinned: Option<&PinnedCard>,
) -> Result<Packing, ReboundError> {
    validate(cards, container_width, gap, pinned)?;

    let mut placed: Vec<PlacedRect> = Vec::with_capacity(cards.len());
    let mut positions = BTreeMap::new();
    let mut height = 0.0_f64;

    let seed = match pinned {
        Some(pin) => format!("{}:{}:{}", pin.id, js_round(pin.x / 8.0), js_round(pin.y / 8.0)),
        None => String::from("base"),
    };

    if let Some(pin) = pinned {
        // validate() guarantees the card exists.
        if let Some(card) = cards.iter().find(|card| card.id == pin.id) {
            let x = pin.x.clamp(0.0, max_x(container_width, card.width)) + 0.0;
            let y = pin.y.max(0.0) + 0.0;
            trace!("pinned {} at ({}, {})", card.id, x, y);
            height = height.max(y + card.height);
            positions.insert(card.id.clone(), Position { x, y });
            placed.push(PlacedRect { id: card.id.clone(), x, y, width: card.width, height: card.height });
        }
    }

    let mut ordered: Vec<&Card> = cards
        .iter()
        .filter(|card| pinned.map_or(true, |pin| pin.id != card.id))
        .collect();
    ordered.sort_by(|a, b| placement_order(a, b));

    for card in ordered {
        let mut best: Option<Candidate> = None;

        for x in candidate_xs(&placed, card.width, container_width, gap) {
            let y = lowest_y(&placed, x, card.width, card.height, gap);
            let jitter = seeded_jitter(&format!("{}:{}:{}:{}", seed, card.id, x, y));
            let score = height.max(y + card.height) + jitter;
            let candidate = Candidate { x, y, score };

            if best.as_ref().map_or(true, |current| candidate.beats(current)) {
                best = Some(candidate);
            }
        }

        // candidate_xs always yields at least x = 0.
        let Some(Candidate { x, y, .. }) = best else { continue };
        trace!("placed {} at ({}, {})", card.id, x, y);
        height = height.max(y + card.height);
        positions.insert(card.id.clone(), Position { x, y });
        placed.push(PlacedRect { id: card.id.clone(), x, y, width: card.width, height: card.height });
    }

    debug!(
        "packed {} cards into width {} (gap {}): height {}",
        placed.len(),
        container_width,
        gap,
        height
    );
    Ok(Packing { positions, total_height: height })
}

/// Deterministic tie-break noise in `[0, 0.001]`: 32-bit FNV-1a over the
/// UTF-16 code units of `seed`.
pub fn seeded_jitter(seed: &str) -> f64 {
    let mut hash: u32 = 2_166_136_261;
    for unit in seed.encode_utf16() {
        hash ^= u32::from(unit);
        hash = hash.wrapping_mul(16_777_619);
    }
    f64::from(hash) / f64::from(u32::MAX) * 0.001
}

struct Candidate {
    x: f64,
    y: f64,
    score: f64,
}

impl Candidate {
    fn beats(&self, other: &Candidate) -> bool {
        self.score < other.score
            || (self.score == other.score
                && (self.y < other.y || (self.y == other.y && self.x < other.x)))
    }
}

fn validate(
    cards: &[Card],
    container_width: f64,
    gap: f64,
    pinned: Option<&PinnedCard>,
) -> Result<(), ReboundError> {
    if !container_width.is_finite() || container_width < 0.0 {
        return Err(ReboundError::InvalidContainerWidth);
    }
    if !gap.is_finite() || gap < 0.0 {
        return Err(ReboundError::InvalidGap);
    }

    let mut seen = BTreeSet::new();
    for card in cards {
        let valid = card.width.is_finite()
            && card.height.is_finite()
            && card.width > 0.0
            && card.height > 0.0;
        if !valid {
            return Err(ReboundError::InvalidCardSize { id: card.id.clone() });
        }
        if !seen.insert(card.id.as_str()) {
            return Err(ReboundError::DuplicateCardId { id: card.id.clone() });
        }
    }

    if let Some(pin) = pinned {
        if !seen.contains(pin.id.as_str()) {
            return Err(ReboundError::UnknownPinnedCard { id: pin.id.clone() });
        }
        if !pin.x.is_finite() || !pin.y.is_finite() {
            return Err(ReboundError::InvalidPinPosition { id: pin.id.clone() });
        }
    }
    Ok(())
}

/// Larger area first, then taller, then by id.
fn placement_order(a: &Card, b: &Card) -> Ordering {
    b.area()
        .total_cmp(&a.area())
        .then_with(|| b.height.total_cmp(&a.height))
        .then_with(|| a.id.cmp(&b.id))
}

fn max_x(container_width: f64, width: f64) -> f64 {
    (container_width - width).max(0.0)
}

/// `{0} ∪ {right + gap}` clamped into the container, ascending and deduplicated.
fn candidate_xs(placed: &[PlacedRect], width: f64, container_width: f64, gap: f64) -> Vec<f64> {
    let limit = max_x(container_width, width);
    let mut xs: Vec<f64> = Vec::with_capacity(placed.len() + 1);
    xs.push(0.0);
    // Adding 0.0 folds -0.0 into +0.0 so it dedups against the left edge.
    xs.extend(placed.iter().map(|rect| (rect.right() + gap).clamp(0.0, limit) + 0.0));
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs
}

/// Lowest y at which a box at `x` collides with nothing placed.
fn lowest_y(placed: &[PlacedRect], x: f64, width: f64, height: f64, gap: f64) -> f64 {
    let mut y = 0.0;
    'scan: loop {
        for rect in placed {
            if rect.collides(x, y, width, height, gap) {
                y = rect.bottom() + gap;
                continue 'scan;
            }
        }
        return y;
    }
}

fn overlap_1d(a0: f64, a1: f64, b0: f64, b1: f64) -> bool {
    a0 < b1 && a1 > b0
}

/// `Math.round` semantics (halves round up), so pin seeds match the browser.
fn js_round(v: f64) -> f64 {
    libm::floor(v + 0.5) + 0.0
}
