use std::fmt;

use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Rect, Vec2};

/// Identity of a renderable node owned by the host page.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Token returned by [`crate::ViewportWatcher::attach`]. Never reused within one watcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationHandle(pub u64);

/// Timestamp in milliseconds, as delivered by the host's frame clock.
pub type Millis = f64;

/// Minimum visible-area fraction of an element, in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize)]
pub struct Threshold(f64);

impl Threshold {
    /// Reveal transitions trigger once 10% of the element is on screen.
    pub const REVEAL: Self = Self(0.1);
    /// Counters wait for the majority of the element.
    pub const COUNTER: Self = Self(0.5);

    pub fn new(v: f64) -> MotionResult<Self> {
        if !v.is_finite() || !(0.0..=1.0).contains(&v) {
            return Err(MotionError::invalid(format!(
                "threshold must be within [0, 1], got {v}"
            )));
        }
        Ok(Self(v))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// A zero threshold means "any intersection at all", including edge contact.
    pub fn is_met(self, ratio: f64, intersecting: bool) -> bool {
        if self.0 == 0.0 {
            intersecting
        } else {
            intersecting && ratio >= self.0
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::REVEAL
    }
}

impl<'de> serde::Deserialize<'de> for Threshold {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(de)?;
        Threshold::new(v).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
