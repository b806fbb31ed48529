//! Section change requests
//!
//! The mapper, the idle watchdog and the menu never touch the section index
//! directly. They push requests into one FIFO channel and the host, which
//! owns the section index, decides what to apply.

use std::fmt;

use tokio::sync::mpsc;
use tracing::debug;

/// Where a section change request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOrigin {
    /// Downward scroll out of the first section
    ScrollForward,
    /// Upward scroll inside the first page band
    ScrollBackward,
    /// Idle timeout forcing a return home
    IdleTimeout,
    /// Navigation menu entry
    Menu,
}

impl fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestOrigin::ScrollForward => "scroll_forward",
            RequestOrigin::ScrollBackward => "scroll_backward",
            RequestOrigin::IdleTimeout => "idle_timeout",
            RequestOrigin::Menu => "menu",
        };
        f.write_str(name)
    }
}

/// A request to show another section
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SectionRequest {
    pub index: usize,
    pub origin: RequestOrigin,
}

/// Receiving end of the request channel, held by the host
pub type SectionRequestReceiver = mpsc::UnboundedReceiver<SectionRequest>;

/// Sending end of the request channel
///
/// Cheap to clone; every producer on a page shares one channel so requests
/// are applied in the order they were made.
#[derive(Debug, Clone)]
pub struct SectionRequests {
    tx: mpsc::UnboundedSender<SectionRequest>,
}

impl SectionRequests {
    /// Create a channel and return both ends
    pub fn channel() -> (Self, SectionRequestReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a request. A dropped receiver means the host is gone, so the
    /// request is discarded.
    pub fn send(&self, index: usize, origin: RequestOrigin) {
        debug!(index, %origin, "Section change requested");
        if self.tx.send(SectionRequest { index, origin }).is_err() {
            debug!(index, %origin, "Section request dropped, receiver closed");
        }
    }
}

/// Drain every request currently queued, oldest first
pub fn drain(rx: &mut SectionRequestReceiver) -> Vec<SectionRequest> {
    let mut out = Vec::new();
    while let Ok(request) = rx.try_recv() {
        out.push(request);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_are_fifo_across_clones() {
        let (requests, mut rx) = SectionRequests::channel();
        let menu = requests.clone();

        requests.send(1, RequestOrigin::ScrollForward);
        menu.send(3, RequestOrigin::Menu);
        requests.send(0, RequestOrigin::IdleTimeout);

        let drained = drain(&mut rx);
        let indices: Vec<usize> = drained.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 3, 0]);
        assert_eq!(drained[1].origin, RequestOrigin::Menu);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (requests, rx) = SectionRequests::channel();
        drop(rx);
        requests.send(2, RequestOrigin::Menu);
    }
}
