//! Process-wide client state.
//!
//! One flag with one job:
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//!
//! The reconnect loop never terminates on its own; this flag is the only
//! way out short of killing the process.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam::channel::{Receiver, Sender, bounded};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Wake channel for interrupting reconnect-delay sleeps.
///
/// The receiver side is cloned by whoever needs an interruptible sleep;
/// the Ctrl+C handler sends one unit per signal.
static SHUTDOWN_CHANNEL: LazyLock<(Sender<()>, Receiver<()>)> = LazyLock::new(|| bounded(4));

/// Setup the global Ctrl+C handler. Call once at program start
///
/// First Ctrl+C sets the SHUTDOWN flag and wakes any pending sleep so the
/// client loop can exit cleanly. A second Ctrl+C exits immediately.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            // Second signal: the loop did not come down in time
            std::process::exit(130);
        }
        crate::log!("link"; "shutting down...");
        let _ = SHUTDOWN_CHANNEL.0.try_send(());
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering for performance - worst case is processing
/// one more frame before stopping, which is acceptable
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Sleep for `duration`, returning early when shutdown is requested.
///
/// Returns `true` if the full duration elapsed, `false` on shutdown.
pub fn sleep_unless_shutdown(duration: Duration) -> bool {
    if is_shutdown() {
        return false;
    }
    match SHUTDOWN_CHANNEL.1.recv_timeout(duration) {
        Ok(()) => false,
        Err(_) => !is_shutdown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_respects_shutdown_flag() {
        SHUTDOWN.store(false, Ordering::SeqCst);
        let start = std::time::Instant::now();
        assert!(sleep_unless_shutdown(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));

        SHUTDOWN.store(true, Ordering::SeqCst);
        let start = std::time::Instant::now();
        assert!(!sleep_unless_shutdown(Duration::from_secs(5)));
        assert!(start.elapsed() < Duration::from_secs(1));
        SHUTDOWN.store(false, Ordering::SeqCst);
    }
}
