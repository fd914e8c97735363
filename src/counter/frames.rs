use std::collections::BTreeSet;

/// Identifies one per-frame continuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(pub u64);

/// "Call me back on the next rendering frame."
///
/// Requests are one-shot: a continuation that wants another frame asks again while it runs.
pub trait FrameScheduler {
    fn request_frame(&mut self, id: AnimationId);
    fn cancel_frame(&mut self, id: AnimationId);
}

/// In-process scheduler for hosts that pump frames themselves (a timer, a game loop, tests).
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: BTreeSet<AnimationId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out everything due this frame. Requests made while the caller processes `out` land
    /// in the next frame.
    pub fn take_due(&mut self, out: &mut Vec<AnimationId>) {
        out.clear();
        out.extend(std::mem::take(&mut self.pending));
    }

    pub fn is_pending(&self, id: AnimationId) -> bool {
        self.pending.contains(&id)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, id: AnimationId) {
        self.pending.insert(id);
    }

    fn cancel_frame(&mut self, id: AnimationId) {
        self.pending.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/counter/frames.rs"]
mod tests;
