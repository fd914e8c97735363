use std::collections::HashSet;
use std::path::Path;

use anyhow::Context as _;

use crate::config::MotionConfig;
use crate::foundation::core::{ElementId, Rect};
use crate::foundation::error::{MotionError, MotionResult};
use crate::media::video::VideoOptions;
use crate::reveal::transition::RevealVariant;
use crate::scroll::parallax::ParallaxElement;
use crate::scroll::sections::Section;

/// JSON description of one page: layout plus the motion attached to each element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageManifest {
    #[serde(default)]
    pub config: MotionConfig,
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub video: Option<VideoOptions>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl ViewportSize {
    /// Visible region in page coordinates at scroll offset `scroll_y`.
    pub fn at_scroll(self, scroll_y: i64) -> Rect {
        let y = scroll_y as f64;
        Rect::new(0.0, y, self.width, y + self.height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    pub id: ElementId,
    /// Page-coordinate bounds. Elements without bounds never intersect.
    #[serde(default)]
    pub rect: Option<Rect>,
    pub motion: MotionSpec,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSpec {
    Reveal {
        #[serde(default)]
        variant: RevealVariant,
        #[serde(default)]
        delay_ms: u32,
    },
    Counter {
        end: i64,
        #[serde(default)]
        duration_ms: Option<i64>,
        #[serde(default)]
        prefix: String,
        #[serde(default)]
        suffix: String,
    },
    Parallax(ParallaxElement),
}

impl PageManifest {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let manifest: Self =
            serde_json::from_str(s).map_err(|e| MotionError::serde(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_path(path: &Path) -> MotionResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read page manifest '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.config.validate()?;
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(MotionError::invalid("viewport size must be positive"));
        }
        let mut seen = HashSet::with_capacity(self.elements.len());
        for el in &self.elements {
            if !seen.insert(el.id) {
                return Err(MotionError::invalid(format!("duplicate element id {}", el.id)));
            }
            if let MotionSpec::Counter {
                duration_ms: Some(d),
                ..
            } = el.motion
            {
                if d <= 0 {
                    return Err(MotionError::invalid(format!(
                        "element {}: counter duration must be > 0ms, got {d}",
                        el.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/manifest.rs"]
mod tests;
