//! Weave Reasoning - the opaque text-completion capability
//!
//! The pipeline's two reasoning stages (schema linking, SQL generation)
//! delegate to a [`Reasoner`]: hand it an instruction, get text back.
//! The capability is treated as unreliable by contract - it may return
//! malformed, empty, or semantically wrong text, and callers must parse
//! defensively. It must never take the orchestrator down with it.
//!
//! Two implementations:
//! - [`HttpReasoner`]: an OpenAI-compatible chat-completions backend
//! - [`ScriptedReasoner`]: canned replies for tests

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod http;
pub mod script;

pub use client::{Reasoner, ReasoningError};
#[cfg(any(test, feature = "test-util"))]
pub use client::MockReasoner;
pub use http::{HttpReasoner, HttpReasonerConfig};
pub use script::ScriptedReasoner;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
