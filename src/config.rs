use std::path::Path;

use anyhow::Context as _;

use crate::counter::animation::DEFAULT_DURATION_MS;
use crate::foundation::core::Threshold;
use crate::foundation::error::{MotionError, MotionResult};
use crate::reveal::transition::TRANSITION_MS;
use crate::scroll::parallax::DEFAULT_SPEED;
use crate::scroll::sections::LOOKAHEAD_PX;

/// Page-wide tuning. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub reveal_threshold: Threshold,
    pub counter_threshold: Threshold,
    pub lookahead_px: i64,
    /// Reveal transition length. Every variant on the page shares it; there is no per-variant
    /// or per-element duration. Changing it overrides the standard 1000ms for the whole page.
    pub transition_ms: u32,
    pub counter_duration_ms: i64,
    pub parallax_speed: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: Threshold::REVEAL,
            counter_threshold: Threshold::COUNTER,
            lookahead_px: LOOKAHEAD_PX,
            transition_ms: TRANSITION_MS,
            counter_duration_ms: DEFAULT_DURATION_MS,
            parallax_speed: DEFAULT_SPEED,
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| MotionError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> MotionResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Thresholds are validated on construction; this covers the plain numeric fields.
    pub fn validate(&self) -> MotionResult<()> {
        if self.lookahead_px < 0 {
            return Err(MotionError::invalid("lookahead_px must be >= 0"));
        }
        if self.transition_ms == 0 {
            return Err(MotionError::invalid("transition_ms must be > 0"));
        }
        if self.counter_duration_ms <= 0 {
            return Err(MotionError::invalid("counter_duration_ms must be > 0"));
        }
        if !self.parallax_speed.is_finite() {
            return Err(MotionError::invalid("parallax_speed must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
