//! Script execution seam.

use serde_json::Value;
use thiserror::Error;

use crate::host::HostPage;
use crate::protocol::ScriptReply;

/// Failure outcome of a script evaluation.
///
/// Carries what the wire failure reply needs: the message, the error
/// name when one exists, and the causal value when one was attached.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,
    pub name: Option<String>,
    pub cause: Option<Value>,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: None,
            cause: None,
        }
    }
}

impl From<ExecutionError> for ScriptReply {
    fn from(e: ExecutionError) -> Self {
        Self::Failure {
            mesg: e.message,
            name: e.name,
            caus: e.cause,
        }
    }
}

/// Runs server-delivered code against the current page.
pub trait Executor {
    /// Evaluate `code` as a standalone program body and capture its
    /// final value. Completion without a value is reported as JSON
    /// null, so the outcome always has a wire encoding.
    fn run(&mut self, page: &mut dyn HostPage, code: &str) -> Result<Value, ExecutionError>;

    /// Discard per-page execution state, as a real page reload would.
    /// Storage that survives a reload is kept.
    fn reset(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Executor used when script execution is turned off.
///
/// Every request is answered with a failure reply, so the server learns
/// the script path is unavailable instead of waiting on silence.
#[derive(Debug, Default)]
pub struct DisabledEngine;

impl Executor for DisabledEngine {
    fn run(&mut self, _page: &mut dyn HostPage, _code: &str) -> Result<Value, ExecutionError> {
        Err(ExecutionError::new("script execution is disabled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPage;
    use crate::protocol::Outbound;

    #[test]
    fn test_disabled_engine_reports_failure() {
        let mut page = MemoryPage::new("root", "t");
        let mut engine = DisabledEngine;
        let err = engine.run(&mut page, "return 1").unwrap_err();

        let reply = Outbound::Reply(err.into());
        assert_eq!(
            reply.to_json(),
            r#"{"type":2.1,"mesg":"script execution is disabled","name":null,"caus":null}"#
        );
    }
}
