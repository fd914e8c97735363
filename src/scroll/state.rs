/// Page-wide vertical scroll position.
///
/// Created at 0 when the page view starts and dropped when the host navigates away. Only the
/// host's scroll-event handler calls [`ScrollState::handle_scroll_event`]; everything else reads a
/// [`ScrollSnapshot`], so all scroll-derived values in one turn agree.
#[derive(Debug, Default)]
pub struct ScrollState {
    scroll_y: i64,
    events: u64,
}

/// Immutable view of the scroll position for one execution turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
pub struct ScrollSnapshot {
    pub scroll_y: i64,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw scroll offset. Overscroll (negative or non-finite offsets reported during
    /// elastic bounce) pins to 0.
    pub fn handle_scroll_event(&mut self, raw_y: f64) -> ScrollSnapshot {
        self.scroll_y = if raw_y.is_finite() {
            raw_y.round().max(0.0) as i64
        } else {
            0
        };
        self.events += 1;
        self.snapshot()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_y: self.scroll_y,
        }
    }

    /// Number of scroll events handled since the page view started.
    pub fn event_count(&self) -> u64 {
        self.events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/state.rs"]
mod tests;
