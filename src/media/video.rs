//! Background video state.
//!
//! Playback itself belongs to the host's native media element; this module only tracks what the
//! overlay controls should show and forwards play/pause/mute intents.

use crate::foundation::error::MotionResult;

/// The host media element. Intents are fire-and-forget from the page's point of view.
pub trait MediaElement {
    /// May fail, e.g. when the host blocks autoplay.
    fn play(&mut self) -> MotionResult<()>;
    fn pause(&mut self);
    fn set_muted(&mut self, muted: bool);
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VideoOptions {
    pub src: Option<String>,
    pub poster: Option<String>,
    pub show_controls: bool,
    pub autoplay: bool,
    pub muted: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            src: None,
            poster: None,
            show_controls: true,
            autoplay: true,
            muted: true,
            looped: true,
        }
    }
}

/// What the overlay should draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum VideoPresentation {
    /// No source configured: animated placeholder with an inert play button.
    Placeholder { play_button: bool },
    /// Source configured but no data yet: spinner, no controls.
    Loading,
    Ready { controls: Option<VideoControls> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VideoControls {
    pub playing: bool,
    pub muted: bool,
}

#[derive(Clone, Debug)]
pub struct VideoBackground {
    opts: VideoOptions,
    playing: bool,
    muted: bool,
    loaded: bool,
}

impl VideoBackground {
    pub fn new(opts: VideoOptions) -> Self {
        Self {
            playing: opts.autoplay,
            muted: opts.muted,
            loaded: false,
            opts,
        }
    }

    pub fn options(&self) -> &VideoOptions {
        &self.opts
    }

    pub fn has_source(&self) -> bool {
        self.opts.src.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Kick off autoplay once the element exists. A refused `play()` is logged and otherwise
    /// ignored; the native pause notification, if any, corrects `playing`.
    pub fn mount(&mut self, media: &mut impl MediaElement) {
        if self.has_source() && self.opts.autoplay {
            if let Err(err) = media.play() {
                tracing::warn!(error = %err, "background video autoplay failed");
            }
        }
    }

    pub fn on_loaded_data(&mut self) {
        self.loaded = true;
    }

    /// Native `play` notification.
    pub fn on_play(&mut self) {
        self.playing = true;
    }

    /// Native `pause` notification.
    pub fn on_pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_play(&mut self, media: &mut impl MediaElement) {
        if !self.has_source() {
            return;
        }
        if self.playing {
            media.pause();
        } else if let Err(err) = media.play() {
            tracing::warn!(error = %err, "background video play failed");
        }
        self.playing = !self.playing;
    }

    pub fn toggle_mute(&mut self, media: &mut impl MediaElement) {
        if !self.has_source() {
            return;
        }
        self.muted = !self.muted;
        media.set_muted(self.muted);
    }

    pub fn presentation(&self) -> VideoPresentation {
        if !self.has_source() {
            return VideoPresentation::Placeholder {
                play_button: self.opts.show_controls,
            };
        }
        if !self.loaded {
            return VideoPresentation::Loading;
        }
        let controls = self.opts.show_controls.then_some(VideoControls {
            playing: self.playing,
            muted: self.muted,
        });
        VideoPresentation::Ready { controls }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/video.rs"]
mod tests;
