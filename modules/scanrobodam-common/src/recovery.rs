//! Recover a JSON object from an assistant's free-text reply.
//!
//! The reply is parsed strictly first. When that fails, each recovery
//! strategy in turn rewrites the working text and a strict parse is retried,
//! until one succeeds or the list is exhausted. Only the artifacts named by
//! [`RecoveryStrategy`] are repaired; anything else is surfaced as an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::ExtractError;

static FENCED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced object pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Keep only the `{...}` object inside a ```` ``` ```` / ```` ```json ```` fence.
    FencedBlock,
    /// Collapse every `""` into `"`. Can corrupt legitimately empty strings.
    DoubledQuoteRepair,
}

impl RecoveryStrategy {
    pub const DEFAULT: &'static [RecoveryStrategy] = &[
        RecoveryStrategy::FencedBlock,
        RecoveryStrategy::DoubledQuoteRepair,
    ];

    /// Rewrite `input`, or `None` when the strategy does not apply to it.
    pub fn apply(self, input: &str) -> Option<String> {
        match self {
            RecoveryStrategy::FencedBlock => FENCED_OBJECT
                .captures(input)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string()),
            RecoveryStrategy::DoubledQuoteRepair => input
                .contains("\"\"")
                .then(|| input.replace("\"\"", "\"")),
        }
    }
}

/// A parsed reply and the strategies that had to rewrite it first.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub value: Value,
    pub applied: Vec<RecoveryStrategy>,
}

/// Parse an assistant reply with the default recovery strategies.
pub fn parse_assistant_json(raw: &str) -> Result<Value, ExtractError> {
    recover_json(raw, RecoveryStrategy::DEFAULT).map(|recovered| recovered.value)
}

pub fn recover_json(raw: &str, strategies: &[RecoveryStrategy]) -> Result<Recovered, ExtractError> {
    let original = raw.trim();
    if original.is_empty() {
        return Err(ExtractError::EmptyResponse);
    }

    let mut last_error = match serde_json::from_str::<Value>(original) {
        Ok(value) => {
            return Ok(Recovered {
                value,
                applied: Vec::new(),
            })
        }
        Err(e) => e,
    };

    let mut working = original.to_string();
    let mut applied = Vec::new();

    for &strategy in strategies {
        let Some(rewritten) = strategy.apply(&working) else {
            continue;
        };
        debug!(?strategy, "Applying JSON recovery strategy");
        working = rewritten;
        applied.push(strategy);

        match serde_json::from_str::<Value>(&working) {
            Ok(value) => return Ok(Recovered { value, applied }),
            Err(e) => last_error = e,
        }
    }

    Err(ExtractError::Parse {
        original: original.to_string(),
        repaired: working,
        cause: last_error.to_string(),
    })
}
