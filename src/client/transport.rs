//! WebSocket transport for one live session.
//!
//! The connection is opened in blocking mode (TCP connect, TLS setup,
//! WebSocket upgrade), then the socket switches to non-blocking so
//! reads can be polled alongside the shutdown flag instead of parking
//! the thread on a dead-quiet connection.

use std::net::TcpStream;

use tungstenite::WebSocket;
use tungstenite::protocol::Message;
use tungstenite::stream::MaybeTlsStream;

use crate::protocol::Outbound;

/// Result of one non-blocking read attempt.
#[derive(Debug)]
pub enum Polled {
    /// A complete text frame arrived.
    Frame(String),
    /// Nothing ready yet; poll again after a short sleep.
    Idle,
    /// The server started a close handshake.
    Closed,
}

/// One live WebSocket connection to the server.
pub struct Transport {
    ws: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl Transport {
    /// Open a connection to `url` (`ws://` or `wss://`).
    pub fn connect(url: &str) -> Result<Self, tungstenite::Error> {
        let (ws, _response) = tungstenite::connect(url)?;

        // Keep blocking mode during the upgrade, switch to non-blocking
        // for polling reads
        match ws.get_ref() {
            MaybeTlsStream::Plain(stream) => {
                let _ = stream.set_nonblocking(true);
            }
            MaybeTlsStream::Rustls(stream) => {
                let _ = stream.sock.set_nonblocking(true);
            }
            _ => {}
        }

        Ok(Self { ws })
    }

    /// Send an envelope as a text frame.
    pub fn send(&mut self, envelope: &Outbound) -> Result<(), tungstenite::Error> {
        match self.ws.send(Message::Text(envelope.to_json().into())) {
            Ok(()) => Ok(()),
            // The frame is queued inside tungstenite when the socket
            // buffer is full; finish it with a few flush retries
            Err(tungstenite::Error::Io(ref e)) if e.kind() == std::io::ErrorKind::WouldBlock => {
                self.finish_send()
            }
            Err(e) => Err(e),
        }
    }

    /// Flush a partially written frame. Outbound frames are small, so a
    /// handful of short retries covers a momentarily full send buffer.
    fn finish_send(&mut self) -> Result<(), tungstenite::Error> {
        for _ in 0..50 {
            std::thread::sleep(std::time::Duration::from_millis(10));
            match self.ws.flush() {
                Ok(()) => return Ok(()),
                Err(tungstenite::Error::Io(ref e))
                    if e.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(e) => return Err(e),
            }
        }
        Err(tungstenite::Error::Io(std::io::Error::from(
            std::io::ErrorKind::WouldBlock,
        )))
    }

    /// Non-blocking read of the next frame.
    pub fn poll(&mut self) -> Result<Polled, tungstenite::Error> {
        match self.ws.read() {
            Ok(Message::Text(text)) => Ok(Polled::Frame(text.to_string())),
            Ok(Message::Close(_)) => Ok(Polled::Closed),
            // Ping/pong are handled inside tungstenite; binary frames
            // are not part of the protocol
            Ok(_) => Ok(Polled::Idle),
            Err(tungstenite::Error::Io(ref e)) if e.kind() == std::io::ErrorKind::WouldBlock => {
                Ok(Polled::Idle)
            }
            Err(e) => Err(e),
        }
    }

    /// Start a close handshake, ignoring errors on an already dead
    /// socket.
    pub fn close(&mut self) {
        let _ = self.ws.close(None);
        let _ = self.ws.flush();
    }
}
