//! Last-request-wins bookkeeping for one operation.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Tracks the in-flight request of one operation.
///
/// Starting a request through [`begin`](Self::begin) cancels whatever request
/// the slot held before, so a late response can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct RequestSlot {
    current: Mutex<Option<CancellationToken>>,
}

impl RequestSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request and cancels the previous one.
    ///
    /// The returned token is a child of `parent`, so cancelling `parent`
    /// aborts the new request too.
    pub fn begin(&self, parent: &CancellationToken) -> CancellationToken {
        let token = parent.child_token();
        let previous = self.current.lock().replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    /// Cancels the in-flight request, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
    }
}
