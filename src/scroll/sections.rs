use std::collections::HashSet;

use crate::foundation::error::{MotionError, MotionResult};

/// Bias added to the scroll offset so a section turns active before its top edge reaches the
/// top of the viewport. Matches the height of the fixed navigation bar plus some slack.
pub const LOOKAHEAD_PX: i64 = 100;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Section {
    pub id: String,
    pub top_offset: i64,
    pub height: i64,
}

impl Section {
    pub fn new(id: impl Into<String>, top_offset: i64, height: i64) -> Self {
        Self {
            id: id.into(),
            top_offset,
            height,
        }
    }

    /// Half-open `[top, top + height)`.
    pub fn contains(&self, y: i64) -> bool {
        y >= self.top_offset && y < self.top_offset.saturating_add(self.height)
    }
}

/// Picks the one navigation section the reader is currently in.
#[derive(Clone, Debug)]
pub struct ScrollSectionTracker {
    sections: Vec<Section>,
    lookahead: i64,
    active: Option<usize>,
}

impl Default for ScrollSectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSectionTracker {
    pub fn new() -> Self {
        Self::with_lookahead(LOOKAHEAD_PX)
    }

    pub fn with_lookahead(lookahead: i64) -> Self {
        Self {
            sections: Vec::new(),
            lookahead,
            active: None,
        }
    }

    pub fn lookahead(&self) -> i64 {
        self.lookahead
    }

    /// Replace the section list (initial layout, or a relayout after resize). The active section
    /// survives a relayout if its id is still registered.
    pub fn register_sections(&mut self, sections: Vec<Section>) -> MotionResult<()> {
        let mut seen = HashSet::with_capacity(sections.len());
        for s in &sections {
            if s.id.trim().is_empty() {
                return Err(MotionError::invalid("section id must be non-empty"));
            }
            if s.height < 0 {
                return Err(MotionError::invalid(format!(
                    "section '{}' has negative height {}",
                    s.id, s.height
                )));
            }
            if !seen.insert(s.id.as_str()) {
                return Err(MotionError::invalid(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
        }

        let previous = self.active_id().map(str::to_owned);
        self.sections = sections;
        self.active = previous.and_then(|id| self.sections.iter().position(|s| s.id == id));
        Ok(())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First registered section covering `scroll_y + lookahead`. When nothing covers it, the
    /// previous answer stands.
    pub fn update(&mut self, scroll_y: i64) -> Option<&str> {
        let effective = scroll_y.saturating_add(self.lookahead);
        if let Some(i) = self.sections.iter().position(|s| s.contains(effective)) {
            if self.active != Some(i) {
                tracing::debug!(
                    section = %self.sections[i].id,
                    scroll_y,
                    "active section changed"
                );
                self.active = Some(i);
            }
        }
        self.active_id()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.sections.get(i))
            .map(|s| s.id.as_str())
    }

    /// Scroll offset that brings section `id` to the top of the viewport.
    pub fn scroll_target(&self, id: &str) -> Option<i64> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.top_offset.max(0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/sections.rs"]
mod tests;
