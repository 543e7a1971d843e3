use std::time::Duration;

use ai_client::{AssistantError, RunStatus};
use thiserror::Error;

/// Everything that can go wrong between accepting an invoice and returning
/// its parsed fields.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0}")]
    Validation(String),

    #[error("Assistant run did not finish: {0}")]
    RunFailed(RunStatus),

    #[error("Timed out after {}s waiting for the assistant run to finish", .0.as_secs())]
    Timeout(Duration),

    #[error("Assistant returned an empty response")]
    EmptyResponse,

    #[error("Assistant reply contained no text message")]
    EmptyReply,

    #[error(
        "Could not convert the assistant reply to JSON. Original reply:\n{original}\n\nAfter repair:\n{repaired}\n\nError: {cause}"
    )]
    Parse {
        original: String,
        repaired: String,
        cause: String,
    },

    #[error("Assistant service error: {0}")]
    Remote(#[from] AssistantError),
}

impl ExtractError {
    pub fn unsupported_file(file_name: &str) -> Self {
        ExtractError::Validation(format!(
            "Only PDF files can be uploaded (allowed format: .pdf), got '{file_name}'"
        ))
    }
}
