use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Per-call execution controls. Legacy drivers can hang indefinitely, so
/// every terminal call can be bounded by a timeout and cancelled from
/// outside.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    pub timeout: Option<Duration>,
    pub cancel: CancellationToken,
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}
