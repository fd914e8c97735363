use crate::foundation::core::Vec2;
use crate::scroll::state::ScrollSnapshot;

pub const DEFAULT_SPEED: f64 = 0.5;

pub struct ParallaxOffset;

impl ParallaxOffset {
    /// Vertical shift for a parallax layer. Negative speeds move against the scroll.
    /// The top of the page is always at rest, whatever the speed.
    pub fn compute(scroll_y: i64, speed: f64) -> f64 {
        if scroll_y == 0 {
            return 0.0;
        }
        scroll_y as f64 * speed
    }
}

/// Per-element parallax binding.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxElement {
    pub speed: f64,
}

impl Default for ParallaxElement {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }
}

impl ParallaxElement {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    pub fn offset(&self, scroll: ScrollSnapshot) -> f64 {
        ParallaxOffset::compute(scroll.scroll_y, self.speed)
    }

    pub fn translate(&self, scroll: ScrollSnapshot) -> Vec2 {
        Vec2::new(0.0, self.offset(scroll))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/parallax.rs"]
mod tests;
