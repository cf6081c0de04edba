use rebound::{
    card_size, pack, Card, DragGesture, GlideConfig, GlideRequest, OverscrollConfig,
    OverscrollEngine, PinnedCard, Position, ScrollGlide, ScrollMetrics,
};
use wasm_bindgen::prelude::*;

fn to_js(err: rebound::ReboundError) -> JsError {
    JsError::new(&err.to_string())
}

// ---- Overscroll Demo ----

/// One scroll container. JS owns the element and `requestAnimationFrame`;
/// it forwards wheel deltas, then calls `frame` while it returns `true`.
#[wasm_bindgen]
pub struct OverscrollDemo {
    engine: OverscrollEngine<f64>,
}

#[wasm_bindgen]
impl OverscrollDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(reduced_motion: bool) -> Result<OverscrollDemo, JsError> {
        let config = OverscrollConfig::new().with_reduced_motion(reduced_motion);
        Ok(OverscrollDemo {
            engine: OverscrollEngine::new(config).map_err(to_js)?,
        })
    }

    /// Returns [prevent_default, start_loop] as 0/1.
    pub fn wheel(&mut self, delta_y: f64, scroll_top: f64, max_scroll_top: f64, now_ms: f64) -> Vec<u8> {
        let metrics = ScrollMetrics::new(scroll_top, max_scroll_top);
        let capture = self.engine.handle_input(delta_y, metrics, now_ms);
        let start_loop = matches!(capture, rebound::Capture::Captured { start_loop: true });
        vec![capture.prevents_default() as u8, start_loop as u8]
    }

    pub fn release(&mut self) {
        self.engine.release();
    }

    /// Advance one frame; `false` means settled and the loop should stop.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        !self.engine.tick(timestamp_ms).is_settled()
    }

    pub fn offset(&self) -> f64 {
        self.engine.position()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

// ---- Glide Demo ----

#[wasm_bindgen]
pub struct GlideDemo {
    glide: ScrollGlide<f64>,
}

#[wasm_bindgen]
impl GlideDemo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GlideDemo, JsError> {
        Ok(GlideDemo {
            glide: ScrollGlide::new(GlideConfig::new()).map_err(to_js)?,
        })
    }

    /// Returns the first scroll position to write.
    pub fn start(
        &mut self,
        from: f64,
        target: f64,
        max_scroll: f64,
        viewport: f64,
        now_ms: f64,
        reduced_motion: bool,
    ) -> f64 {
        let request = GlideRequest { from, target, max_scroll, viewport, initial_velocity: 0.0 };
        self.glide.start(request, now_ms, reduced_motion).position()
    }

    /// Returns [position, done] with done as 0/1.
    pub fn frame(&mut self, timestamp_ms: f64) -> Vec<f64> {
        let step = self.glide.tick(timestamp_ms);
        vec![step.position(), if step.is_done() { 1.0 } else { 0.0 }]
    }
}

// ---- Mosaic Demo ----

#[wasm_bindgen]
pub struct MosaicDemo {
    cards: Vec<Card>,
    positions: Vec<Position>,
    pinned: Option<PinnedCard>,
    drag: Option<DragGesture>,
    container_width: f64,
    gap: f64,
    height: f64,
}

#[wasm_bindgen]
impl MosaicDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: f64, gap: f64) -> Self {
        MosaicDemo {
            cards: Vec::new(),
            positions: Vec::new(),
            pinned: None,
            drag: None,
            container_width,
            gap,
            height: 0.0,
        }
    }

    /// Add a card sized from its aspect ratio and the current unit.
    pub fn add_card(&mut self, id: String, aspect_ratio: f64, unit: f64, caption_height: f64) {
        let (width, height) = card_size(aspect_ratio, unit);
        self.cards.push(Card::new(id, width, height + caption_height));
    }

    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = width;
    }

    pub fn layout(&mut self) -> Result<f64, JsError> {
        let packing = pack(&self.cards, self.container_width, self.gap, self.pinned.as_ref())
            .map_err(to_js)?;
        self.positions = self
            .cards
            .iter()
            .map(|card| packing.positions.get(&card.id).copied().unwrap_or(Position { x: 0.0, y: 0.0 }))
            .collect();
        self.height = packing.total_height;
        Ok(self.height)
    }

    /// Returns flat [x0, y0, w0, h0, x1, ...] in insertion order.
    pub fn rects(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.cards.len() * 4);
        for (card, p) in self.cards.iter().zip(&self.positions) {
            out.extend_from_slice(&[p.x, p.y, card.width, card.height]);
        }
        out
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn pointer_down(&mut self, index: usize, pointer_id: i32, client_x: f64, client_y: f64) {
        if let (Some(card), Some(&base)) = (self.cards.get(index), self.positions.get(index)) {
            self.drag = Some(DragGesture::begin(card.id.clone(), pointer_id, client_x, client_y, base));
        }
    }

    /// Returns the [x, y] preview position, or an empty array when no drag applies.
    pub fn pointer_move(&mut self, pointer_id: i32, client_x: f64, client_y: f64) -> Vec<f64> {
        match self.drag.as_mut().and_then(|drag| drag.update(pointer_id, client_x, client_y)) {
            Some(p) => vec![p.x, p.y],
            None => Vec::new(),
        }
    }

    /// Returns true when the drop pinned a card and `layout` should run again.
    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let width = self
            .cards
            .iter()
            .find(|card| card.id == drag.card_id())
            .map_or(0.0, |card| card.width);
        match drag.finish(client_x, client_y, self.container_width, width) {
            Some(pin) => {
                log::debug!("pinned {} at ({}, {})", pin.id, pin.x, pin.y);
                self.pinned = Some(pin);
                true
            }
            None => false,
        }
    }

    pub fn clear_pin(&mut self) {
        self.pinned = None;
    }
}
