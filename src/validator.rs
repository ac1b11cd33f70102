use crate::error::Result;
use crate::llm::prompts::{validation_prompt, INVALID_TOKEN};
use crate::llm::TextModel;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The model's classification of the extracted text.
///
/// Only a reply that contains `INVALID` (any case) rejects the statement. Empty,
/// garbled and missing replies are all accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub raw_reply: String,
    pub is_valid: bool,
}

impl Verdict {
    pub fn from_reply(reply: &str) -> Self {
        let raw_reply = reply.trim().to_string();
        let is_valid = !raw_reply.to_uppercase().contains(INVALID_TOKEN);
        Self {
            raw_reply,
            is_valid,
        }
    }
}

pub struct StatementValidator {
    model: Arc<dyn TextModel>,
}

impl StatementValidator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub async fn validate(&self, text: &str) -> Result<Verdict> {
        let reply = self
            .model
            .generate_text(&validation_prompt(text))
            .await?
            .unwrap_or_default();

        let verdict = Verdict::from_reply(&reply);
        info!(
            "Statement verdict from {}: {} (reply: {:?})",
            self.model.name(),
            if verdict.is_valid { "valid" } else { "invalid" },
            verdict.raw_reply
        );

        Ok(verdict)
    }
}
