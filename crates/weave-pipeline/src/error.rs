//! Pipeline error taxonomy
//!
//! Only contract violations of the reasoning capability are errors
//! here: an unparseable linking reply or an empty generation reply
//! terminates that path. Everything that goes wrong *about the query
//! itself* - unknown db_id, bad SQL, missing table - is data, carried
//! in [`ExecutionOutcome::Failure`](crate::ExecutionOutcome) so the
//! caller can still render "no result" in a comparison.

use weave_reasoning::ReasoningError;

/// Fatal errors for one pipeline path
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Schema-linking reply did not parse into linked tables/columns
    #[error("schema linking reply unparseable: {0}")]
    LinkingParse(String),

    /// SQL generation produced no text at all
    #[error("sql generation returned no text")]
    GenerationEmpty,

    /// The reasoning call itself failed
    #[error("reasoning call failed: {0}")]
    Reasoning(#[from] ReasoningError),
}

impl PipelineError {
    /// Whether this error came from the linking stage's parse contract
    #[inline]
    #[must_use]
    pub fn is_linking_parse(&self) -> bool {
        matches!(self, Self::LinkingParse(_))
    }

    /// Whether this error is the generation stage's empty-output contract
    #[inline]
    #[must_use]
    pub fn is_generation_empty(&self) -> bool {
        matches!(self, Self::GenerationEmpty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linking_parse_display() {
        let err = PipelineError::LinkingParse("expected JSON object".to_string());
        assert!(err.to_string().contains("unparseable"));
        assert!(err.is_linking_parse());
        assert!(!err.is_generation_empty());
    }

    #[test]
    fn generation_empty_display() {
        let err = PipelineError::GenerationEmpty;
        assert!(err.to_string().contains("no text"));
        assert!(err.is_generation_empty());
    }

    #[test]
    fn reasoning_error_converts() {
        let err: PipelineError = ReasoningError::MissingCompletion.into();
        assert!(matches!(err, PipelineError::Reasoning(_)));
    }
}
