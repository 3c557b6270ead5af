use planner::query::renderer::InListStyle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a query terminal does when the driver fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Log the failure, record it in the session diagnostics and return
    /// an empty result.
    #[default]
    #[serde(rename = "degrade")]
    DegradeToEmpty,
    /// Return the execution error to the caller.
    #[serde(rename = "propagate")]
    Propagate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    pub failure_policy: FailurePolicy,
    pub in_lists: InListStyle,
    /// Applied to every terminal call that does not set its own.
    pub timeout: Option<Duration>,
}

impl SessionSettings {
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_in_lists(mut self, style: InListStyle) -> Self {
        self.in_lists = style;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
