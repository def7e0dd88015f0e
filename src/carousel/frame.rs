//! Animation frame scheduling
//!
//! A cancellable "request the next frame" contract. The carousel requests a
//! frame while it has something to animate and cancels the request as soon
//! as the drag ends; the host loop only redraws at frame rate while a
//! request is pending.

/// Handle of one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// At most one outstanding frame request
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameToken>,
    delivered: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, replacing any outstanding request
    pub fn request(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending = Some(token);
        token
    }

    /// Drop the outstanding request, if any
    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the outstanding request for delivery
    pub fn take(&mut self) -> Option<FrameToken> {
        let token = self.pending.take()?;
        self.delivered += 1;
        Some(token)
    }

    /// Number of frames delivered so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}
