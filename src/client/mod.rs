//! WebSocket client: connect, dispatch, reconnect.
//!
//! The client's whole life is one loop: connect to the server's
//! live-update endpoint, send the page handshake, dispatch inbound
//! frames until the connection dies, wait out the retry delay, connect
//! again. The loop never gives up on its own; only Ctrl+C ends it.

mod dispatcher;
mod preview;
mod state;
mod transport;

pub use dispatcher::{Action, Dispatcher};
pub use state::LinkState;
pub use transport::{Polled, Transport};

use std::time::Duration;

use crate::config::cfg;
use crate::core::{is_shutdown, sleep_unless_shutdown};
use crate::host::HostPage;
use crate::logger::{status_error, status_pending, status_success};
use crate::protocol::Outbound;
use crate::script::Executor;

/// Server route the live-update socket is mounted on.
pub const WS_PATH: &str = "/__WS__";

/// Connect-dispatch-reconnect loop. Returns when shutdown is requested.
///
/// One connection at a time: a dead transport is dropped before the
/// retry delay starts, so a reconnect always replaces the previous
/// connection instead of stacking a second one.
pub fn run<P: HostPage, E: Executor>(dispatcher: &mut Dispatcher<P, E>) {
    let config = cfg();
    let url = server_url(&config.connect.host, config.connect.tls);
    let page_path = config.connect.page.clone();
    let poll_interval = Duration::from_millis(config.connect.poll_interval_ms);
    let retry_delay = Duration::from_millis(config.connect.reconnect_delay_ms);
    let retry_note = format!("retrying in {}", human_delay(retry_delay));

    let mut state = LinkState::Disconnected;

    while !is_shutdown() {
        state.enter(LinkState::Connecting);
        status_pending(&format!("connecting to {url}"));

        let mut transport = match Transport::connect(&url) {
            Ok(transport) => transport,
            Err(e) => {
                state.enter(LinkState::Closed);
                status_error(
                    &format!("connection to {} failed", config.connect.host),
                    &format!("{e}, {retry_note}"),
                );
                if !sleep_unless_shutdown(retry_delay) {
                    break;
                }
                continue;
            }
        };

        state.enter(LinkState::Open);
        if let Err(e) = transport.send(&Outbound::handshake(page_path.as_str())) {
            state.enter(LinkState::Closed);
            status_error("handshake failed", &format!("{e}, {retry_note}"));
            if !sleep_unless_shutdown(retry_delay) {
                break;
            }
            continue;
        }

        state.enter(LinkState::Active);
        status_success(&format!(
            "connected to {}, watching {page_path}",
            config.connect.host
        ));

        let restarting = drive_session(dispatcher, &mut transport, poll_interval);
        drop(transport);
        state.enter(LinkState::Closed);

        if is_shutdown() {
            break;
        }
        if restarting {
            // Deliberate reconnect: the server is alive and waiting to
            // resend initial content, so skip the retry delay
            status_pending("restarting session");
        } else {
            status_error("connection lost", &retry_note);
            if !sleep_unless_shutdown(retry_delay) {
                break;
            }
        }
    }

    state.enter(LinkState::Disconnected);
    crate::debug!("link"; "client loop ended");
}

/// Poll and dispatch frames until the connection dies or shutdown is
/// requested. Returns `true` when the server asked for a restart.
fn drive_session<P: HostPage, E: Executor>(
    dispatcher: &mut Dispatcher<P, E>,
    transport: &mut Transport,
    poll_interval: Duration,
) -> bool {
    loop {
        if is_shutdown() {
            transport.close();
            return false;
        }

        // One frame at a time, handled to completion: inbound order is
        // preserved and script executions never overlap
        match transport.poll() {
            Ok(Polled::Frame(raw)) => match dispatcher.handle(&raw) {
                Action::None => {}
                Action::Reply(reply) => {
                    if let Err(e) = transport.send(&reply) {
                        // At-most-once: the reply is dropped, not queued
                        crate::debug!("link"; "reply dropped: {e}");
                        return false;
                    }
                }
                Action::Restart => return true,
            },
            Ok(Polled::Idle) => {
                std::thread::sleep(poll_interval);
            }
            Ok(Polled::Closed) => {
                crate::debug!("link"; "server closed the connection");
                return false;
            }
            Err(e) => {
                crate::debug!("link"; "transport failed: {e}");
                return false;
            }
        }
    }
}

/// Build the endpoint URL from host and TLS setting.
fn server_url(host: &str, tls: bool) -> String {
    let scheme = if tls { "wss" } else { "ws" };
    format!("{scheme}://{host}{WS_PATH}")
}

/// Format a retry delay for status lines.
fn human_delay(delay: Duration) -> String {
    let ms = delay.as_millis();
    if ms >= 1000 && ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url() {
        assert_eq!(
            server_url("localhost:8000", false),
            "ws://localhost:8000/__WS__"
        );
        assert_eq!(server_url("pages.example.com", true), "wss://pages.example.com/__WS__");
    }

    #[test]
    fn test_human_delay() {
        assert_eq!(human_delay(Duration::from_millis(1000)), "1s");
        assert_eq!(human_delay(Duration::from_millis(2500)), "2500ms");
        assert_eq!(human_delay(Duration::from_millis(250)), "250ms");
    }
}
