//! Scripted reasoner for tests
//!
//! Pops canned replies in order, regardless of the instruction text.
//! Running out of replies is an error rather than an empty string so a
//! misconfigured test fails loudly instead of tripping the pipeline's
//! empty-output contract by accident.

use crate::client::{Reasoner, ReasoningError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Reasoner that replays a fixed sequence of replies
#[derive(Debug, Default)]
pub struct ScriptedReasoner {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedReasoner {
    /// Create with a reply sequence
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of replies not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.lock().expect("scripted reasoner poisoned").len()
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn complete(&self, instruction: &str) -> Result<String, ReasoningError> {
        self.replies
            .lock()
            .expect("scripted reasoner poisoned")
            .pop_front()
            .ok_or_else(|| ReasoningError::ScriptExhausted(instruction.to_string()))
    }
}
