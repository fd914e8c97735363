use crate::animation::ease::Ease;
use crate::foundation::core::{Millis, Vec2};
use crate::foundation::error::{MotionError, MotionResult};

/// Shared duration of every reveal transition.
pub const TRANSITION_MS: u32 = 1000;

/// Which "from" pose an element animates out of when it is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealVariant {
    #[default]
    Fade,
    #[serde(alias = "slide-left")]
    SlideLeft,
    #[serde(alias = "slide-right")]
    SlideRight,
    Scale,
}

impl RevealVariant {
    /// Pose before the element has entered the viewport.
    pub fn hidden(self) -> VisualState {
        match self {
            Self::Fade => VisualState {
                opacity: 0.0,
                translate: Vec2::new(0.0, 8.0),
                scale: 1.0,
            },
            Self::SlideLeft => VisualState {
                opacity: 0.0,
                translate: Vec2::new(-12.0, 0.0),
                scale: 1.0,
            },
            Self::SlideRight => VisualState {
                opacity: 0.0,
                translate: Vec2::new(12.0, 0.0),
                scale: 1.0,
            },
            Self::Scale => VisualState {
                opacity: 0.0,
                translate: Vec2::ZERO,
                scale: 0.95,
            },
        }
    }

    /// Resting pose once the transition has finished. Identical for every variant.
    pub fn revealed(self) -> VisualState {
        VisualState::IDENTITY
    }
}

pub fn parse_variant(name: &str) -> MotionResult<RevealVariant> {
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return Err(MotionError::invalid("reveal variant must be non-empty"));
    }
    match name.as_str() {
        "fade" | "fade_in" | "fade-in" => Ok(RevealVariant::Fade),
        "slide_left" | "slide-left" | "slideleft" => Ok(RevealVariant::SlideLeft),
        "slide_right" | "slide-right" | "slideright" => Ok(RevealVariant::SlideRight),
        "scale" => Ok(RevealVariant::Scale),
        other => Err(MotionError::invalid(format!(
            "unknown reveal variant '{other}'"
        ))),
    }
}

/// Presentation values for one element. Translation is in stylesheet spacing units
/// (a quarter of the root font size), not pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VisualState {
    pub opacity: f64,
    pub translate: Vec2,
    pub scale: f64,
}

impl VisualState {
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            translate: self.translate.lerp(to.translate, t),
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

/// Logical reveal state of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RevealState {
    pub entered: bool,
    pub delay_ms: u32,
    pub variant: RevealVariant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTiming {
    pub duration_ms: u32,
    pub ease: Ease,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            duration_ms: TRANSITION_MS,
            ease: Ease::CssEaseOut,
        }
    }
}

/// One-shot reveal latch plus the timing needed to paint it.
#[derive(Clone, Debug)]
pub struct RevealTransition {
    variant: RevealVariant,
    delay_ms: u32,
    timing: RevealTiming,
    entered: bool,
    /// When the presentation started; the delay counts from here.
    started_at: Option<Millis>,
}

impl RevealTransition {
    pub fn new(variant: RevealVariant, delay_ms: u32) -> Self {
        Self::with_timing(variant, delay_ms, RevealTiming::default())
    }

    pub fn with_timing(variant: RevealVariant, delay_ms: u32, timing: RevealTiming) -> Self {
        Self {
            variant,
            delay_ms,
            timing,
            entered: false,
            started_at: None,
        }
    }

    /// Feed the latest visibility. The first `true` latches `entered`; nothing unlatches it.
    pub fn compute(&mut self, visible: bool) -> RevealState {
        if visible && !self.entered {
            self.entered = true;
            tracing::debug!(variant = ?self.variant, delay_ms = self.delay_ms, "reveal latched");
        }
        self.state()
    }

    /// Like [`RevealTransition::compute`], but starts the presentation clock at `now` when this
    /// call latches. Without it the clock starts at the first `sample`.
    pub fn compute_at(&mut self, visible: bool, now: Millis) -> RevealState {
        let was_entered = self.entered;
        let state = self.compute(visible);
        if state.entered && !was_entered {
            self.started_at = Some(now);
        }
        state
    }

    /// Start the presentation clock at `now` if the element has latched and the clock is not
    /// running yet. Returns `true` when this call started it.
    pub fn start_clock(&mut self, now: Millis) -> bool {
        if self.entered && self.started_at.is_none() {
            self.started_at = Some(now);
            return true;
        }
        false
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn state(&self) -> RevealState {
        RevealState {
            entered: self.entered,
            delay_ms: self.delay_ms,
            variant: self.variant,
        }
    }

    pub fn entered(&self) -> bool {
        self.entered
    }

    /// Eased progress in `[0, 1]` at `now`.
    pub fn progress(&mut self, now: Millis) -> f64 {
        if !self.entered {
            return 0.0;
        }
        let started = *self.started_at.get_or_insert(now);
        let elapsed = now - started - f64::from(self.delay_ms);
        if elapsed <= 0.0 {
            return 0.0;
        }
        if self.timing.duration_ms == 0 {
            return 1.0;
        }
        self.timing
            .ease
            .apply(elapsed / f64::from(self.timing.duration_ms))
    }

    pub fn sample(&mut self, now: Millis) -> VisualState {
        let t = self.progress(now);
        self.variant.hidden().lerp(self.variant.revealed(), t)
    }

    /// `true` once the element has entered and finished animating.
    pub fn is_settled(&self, now: Millis) -> bool {
        match self.started_at {
            Some(started) => {
                now - started >= f64::from(self.delay_ms) + f64::from(self.timing.duration_ms)
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/transition.rs"]
mod tests;
