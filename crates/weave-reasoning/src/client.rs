//! Reasoner trait and transport-level errors
//!
//! [`ReasoningError`] covers the call itself failing (network, backend
//! rejection, missing payload). What the returned text *means* is the
//! caller's problem - a syntactically wrong reply is a successful call.

use async_trait::async_trait;

/// Opaque text-completion capability
///
/// One method: instruction in, text out. Implementations must be safe
/// to share across concurrent pipeline runs.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Complete an instruction into free-form text
    async fn complete(&self, instruction: &str) -> Result<String, ReasoningError>;
}

/// Errors from invoking the reasoning backend
#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("reasoning transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend rejected the request
    #[error("reasoning backend returned status {status}: {body}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Response decoded but carried no completion text
    #[error("reasoning backend returned no completion choices")]
    MissingCompletion,

    /// Scripted reasoner ran out of replies (test-only misconfiguration)
    #[error("scripted reasoner has no reply left for: {0}")]
    ScriptExhausted(String),
}
