//! Scroll-driven motion for single-page sites.
//!
//! The crate models what a page's scroll animations *are*, not how they are painted. Each
//! primitive is an explicit state machine that a host (DOM bindings, an immediate-mode UI, a
//! retained scene graph, a test) drives with its own events:
//!
//! - [`ViewportWatcher`]: is an element on screen, given a visibility threshold?
//! - [`RevealTransition`]: one-shot fade / slide / scale reveal once an element has been seen.
//! - [`ScrollSectionTracker`]: which navigation section is active at a scroll offset.
//! - [`CounterAnimation`]: time-driven count up to a number, started by first visibility.
//! - [`ParallaxOffset`]: vertical shift proportional to scroll.
//!
//! [`PageRuntime`] composes them for one page view. Everything runs on a single thread; hosts
//! deliver scroll events, intersection reports and rendering frames one at a time.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod counter;
mod foundation;
mod media;
mod page;
mod reveal;
mod scroll;
mod viewport;

pub use animation::ease::{CubicBezier, Ease};
pub use config::MotionConfig;
pub use counter::animation::{CounterAnimation, CounterFrame, CounterFrames, CounterLabel};
pub use counter::frames::{AnimationId, FrameQueue, FrameScheduler};
pub use foundation::core::{ElementId, Millis, ObservationHandle, Rect, Threshold, Vec2};
pub use foundation::error::{MotionError, MotionResult};
pub use media::video::{
    MediaElement, VideoBackground, VideoControls, VideoOptions, VideoPresentation,
};
pub use page::manifest::{ElementSpec, MotionSpec, PageManifest, ViewportSize};
pub use page::runtime::{ElementView, PageRuntime};
pub use reveal::transition::{
    RevealState, RevealTiming, RevealTransition, RevealVariant, TRANSITION_MS, VisualState,
    parse_variant,
};
pub use scroll::parallax::{ParallaxElement, ParallaxOffset};
pub use scroll::sections::{LOOKAHEAD_PX, ScrollSectionTracker, Section};
pub use scroll::state::{ScrollSnapshot, ScrollState};
pub use viewport::geometry::{GeometryIntersector, intersection_ratio};
pub use viewport::watcher::{
    IntersectionBackend, IntersectionEntry, Unsupported, ViewportWatcher, VisibilityChange,
};
