//! Drag-to-pin gesture for mosaic cards.

use alloc::string::String;

use crate::packer::{PinnedCard, Position};

/// Pointer travel beyond which a press counts as a drag, px.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// One card being dragged by one pointer.
///
/// `update` gives the position to preview while dragging; `finish` turns a
/// real drag into a [`PinnedCard`] for the next packing pass, or `None` when
/// the press never moved far enough (the card snaps back).
#[derive(Clone, Debug, PartialEq)]
pub struct DragGesture {
    card_id: String,
    pointer_id: i32,
    start_x: f64,
    start_y: f64,
    base: Position,
    moved: bool,
}

impl DragGesture {
    /// Pointer `pointer_id` pressed at `(client_x, client_y)` on a card laid out at `base`.
    pub fn begin(card_id: impl Into<String>, pointer_id: i32, client_x: f64, client_y: f64, base: Position) -> Self {
        DragGesture {
            card_id: card_id.into(),
            pointer_id,
            start_x: client_x,
            start_y: client_y,
            base,
            moved: false,
        }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn pointer_id(&self) -> i32 {
        self.pointer_id
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Pointer moved; returns where to draw the card. Events from other
    /// pointers are ignored and return `None`.
    pub fn update(&mut self, pointer_id: i32, client_x: f64, client_y: f64) -> Option<Position> {
        if pointer_id != self.pointer_id {
            return None;
        }
        let dx = client_x - self.start_x;
        let dy = client_y - self.start_y;
        if libm::fabs(dx) > DRAG_THRESHOLD_PX || libm::fabs(dy) > DRAG_THRESHOLD_PX {
            self.moved = true;
        }
        Some(Position {
            x: self.base.x + dx,
            y: (self.base.y + dy).max(0.0),
        })
    }

    /// Pointer released at `(client_x, client_y)` inside a container of
    /// `container_width` for a card `card_width` wide.
    pub fn finish(
        mut self,
        client_x: f64,
        client_y: f64,
        container_width: f64,
        card_width: f64,
    ) -> Option<PinnedCard> {
        let pointer_id = self.pointer_id;
        self.update(pointer_id, client_x, client_y);
        if !self.moved {
            return None;
        }

        let dx = client_x - self.start_x;
        let dy = client_y - self.start_y;
        let max_x = (container_width - card_width).max(0.0);
        Some(PinnedCard {
            id: self.card_id,
            x: (self.base.x + dx).clamp(0.0, max_x),
            y: (self.base.y + dy).max(0.0),
        })
    }
}
