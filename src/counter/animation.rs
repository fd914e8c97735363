use crate::foundation::core::Millis;
use crate::foundation::error::{MotionError, MotionResult};

pub const DEFAULT_DURATION_MS: i64 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Waiting for the bound element to become visible.
    Armed,
    Running,
    Done,
    /// Torn down mid-flight; never ticks again.
    Stopped,
}

/// One emitted counter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterFrame {
    pub value: i64,
    pub fraction: f64,
    pub done: bool,
}

/// Time-driven count from 0 to `end`, started once by first visibility.
///
/// Progress comes from elapsed time, never from the number of frames, so the count finishes on
/// schedule regardless of frame rate.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    end: i64,
    duration_ms: i64,
    phase: Phase,
    current: i64,
    started_at: Option<Millis>,
    last_fraction: Option<f64>,
}

impl CounterAnimation {
    pub fn new(end: i64, duration_ms: i64) -> MotionResult<Self> {
        if duration_ms <= 0 {
            return Err(MotionError::invalid(format!(
                "counter duration must be > 0ms, got {duration_ms}"
            )));
        }
        Ok(Self::armed(end, duration_ms))
    }

    pub fn with_default_duration(end: i64) -> Self {
        Self::armed(end, DEFAULT_DURATION_MS)
    }

    fn armed(end: i64, duration_ms: i64) -> Self {
        Self {
            end,
            duration_ms,
            phase: Phase::Armed,
            current: 0,
            started_at: None,
            last_fraction: None,
        }
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn is_triggered(&self) -> bool {
        self.phase != Phase::Armed
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Feed visibility of the bound element. Returns `true` only for the call that starts the
    /// count; the caller should then request a frame. Later visibility changes are ignored.
    pub fn on_visibility(&mut self, visible: bool) -> bool {
        if visible { self.trigger() } else { false }
    }

    pub fn trigger(&mut self) -> bool {
        if self.phase != Phase::Armed {
            return false;
        }
        self.phase = Phase::Running;
        tracing::debug!(end = self.end, duration_ms = self.duration_ms, "counter started");
        true
    }

    /// Stop scheduling further frames. Idempotent.
    pub fn stop(&mut self) {
        if self.phase != Phase::Done {
            self.phase = Phase::Stopped;
        }
    }

    /// Advance to frame time `now`. The first tick anchors the start time.
    ///
    /// Returns `None` when not running, or when `now` does not move progress forward (duplicate
    /// or out-of-order timestamps); a running counter still wants another frame in that case.
    pub fn tick(&mut self, now: Millis) -> Option<CounterFrame> {
        if self.phase != Phase::Running {
            return None;
        }
        let started = *self.started_at.get_or_insert(now);
        let fraction = if self.end == 0 {
            1.0
        } else {
            ((now - started) / self.duration_ms as f64).clamp(0.0, 1.0)
        };
        if self.last_fraction.is_some_and(|last| fraction <= last) {
            return None;
        }
        self.last_fraction = Some(fraction);

        let done = fraction >= 1.0;
        self.current = if done {
            self.end
        } else {
            (fraction * self.end as f64).floor() as i64
        };
        if done {
            self.phase = Phase::Done;
            tracing::debug!(end = self.end, "counter finished");
        }
        Some(CounterFrame {
            value: self.current,
            fraction,
            done,
        })
    }

    /// Run the counter against a sequence of frame timestamps, yielding each emitted value.
    /// The iterator ends with the terminal value, or when the timestamps run out.
    pub fn frames<I>(mut self, frame_times: I) -> CounterFrames<I::IntoIter>
    where
        I: IntoIterator<Item = Millis>,
    {
        self.trigger();
        CounterFrames {
            counter: self,
            times: frame_times.into_iter(),
        }
    }
}

pub struct CounterFrames<I> {
    counter: CounterAnimation,
    times: I,
}

impl<I: Iterator<Item = Millis>> Iterator for CounterFrames<I> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        while self.counter.is_running() {
            let now = self.times.next()?;
            if let Some(frame) = self.counter.tick(now) {
                return Some(frame.value);
            }
        }
        None
    }
}

/// Text decoration around the number, e.g. `"+"` and `"%"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CounterLabel {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl CounterLabel {
    pub fn format(&self, value: i64) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/counter/animation.rs"]
mod tests;
