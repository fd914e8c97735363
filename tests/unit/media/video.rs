use super::*;
use crate::MotionError;

#[derive(Default)]
struct FakeMedia {
    plays: u32,
    pauses: u32,
    muted: Option<bool>,
    refuse_play: bool,
}

impl MediaElement for FakeMedia {
    fn play(&mut self) -> MotionResult<()> {
        self.plays += 1;
        if self.refuse_play {
            return Err(MotionError::Other(anyhow::anyhow!("autoplay blocked")));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = Some(muted);
    }
}

fn with_source() -> VideoOptions {
    VideoOptions {
        src: Some("hero.mp4".to_owned()),
        ..VideoOptions::default()
    }
}

#[test]
fn placeholder_without_source() {
    let mut v = VideoBackground::new(VideoOptions::default());
    let mut media = FakeMedia::default();
    v.mount(&mut media);
    v.toggle_play(&mut media);
    v.toggle_mute(&mut media);
    assert_eq!(media.plays, 0);
    assert_eq!(media.muted, None);
    assert_eq!(
        v.presentation(),
        VideoPresentation::Placeholder { play_button: true }
    );
}

#[test]
fn autoplay_on_mount_and_loading_until_data() {
    let mut v = VideoBackground::new(with_source());
    let mut media = FakeMedia::default();
    v.mount(&mut media);
    assert_eq!(media.plays, 1);
    assert_eq!(v.presentation(), VideoPresentation::Loading);

    v.on_loaded_data();
    assert_eq!(
        v.presentation(),
        VideoPresentation::Ready {
            controls: Some(VideoControls {
                playing: true,
                muted: true
            })
        }
    );
}

#[test]
fn refused_autoplay_is_not_fatal() {
    let mut v = VideoBackground::new(with_source());
    let mut media = FakeMedia {
        refuse_play: true,
        ..FakeMedia::default()
    };
    v.mount(&mut media);
    v.on_pause();
    assert!(!v.is_playing());
}

#[test]
fn toggles_forward_intents() {
    let mut v = VideoBackground::new(with_source());
    let mut media = FakeMedia::default();
    v.on_loaded_data();

    v.toggle_play(&mut media);
    assert_eq!(media.pauses, 1);
    assert!(!v.is_playing());
    v.toggle_play(&mut media);
    assert_eq!(media.plays, 1);
    assert!(v.is_playing());

    v.toggle_mute(&mut media);
    assert_eq!(media.muted, Some(false));
    assert!(!v.is_muted());
}

#[test]
fn controls_hidden_when_disabled() {
    let mut v = VideoBackground::new(VideoOptions {
        show_controls: false,
        ..with_source()
    });
    v.on_loaded_data();
    assert_eq!(v.presentation(), VideoPresentation::Ready { controls: None });
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: VideoOptions = serde_json::from_str(r#"{ "src": "a.mp4", "loop": false }"#).unwrap();
    assert_eq!(opts.src.as_deref(), Some("a.mp4"));
    assert!(!opts.looped);
    assert!(opts.autoplay);
    assert!(opts.muted);
}
