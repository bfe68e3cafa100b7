//! Connection lifecycle states.

/// Where the link currently stands.
///
/// The full cycle is `Disconnected → Connecting → Open → Active`, then
/// `Closed` when the transport dies, then back to `Connecting` after
/// the retry delay. There is no terminal state; only process shutdown
/// ends the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// No connection and none in progress.
    Disconnected,
    /// TCP connect, TLS setup and WebSocket upgrade in flight.
    Connecting,
    /// Connection established, handshake not yet sent.
    Open,
    /// Handshake sent; frames flow in both directions.
    Active,
    /// Connection lost, retry pending.
    Closed,
}

impl LinkState {
    /// Move to `next`, tracing the edge in verbose mode.
    pub fn enter(&mut self, next: LinkState) {
        if *self != next {
            crate::debug!("link"; "{self} -> {next}");
            *self = next;
        }
    }
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Active => "active",
            Self::Closed => "closed",
        };
        write!(f, "{name}")
    }
}
