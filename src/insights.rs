use crate::error::Result;
use crate::llm::prompts::insights_prompt;
use crate::llm::TextModel;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const FALLBACK_REPORT: &str = "⚠️ Couldn't generate insights.";

/// The model's report, passed through without parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub filename: String,
    pub body: String,
    pub generated_at: DateTime<Utc>,
}

pub struct InsightGenerator {
    model: Arc<dyn TextModel>,
}

impl InsightGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, text: &str, filename: &str) -> Result<InsightsReport> {
        let reply = self
            .model
            .generate_text(&insights_prompt(text, filename))
            .await?;

        let body = match reply.map(|r| r.trim().to_string()) {
            Some(body) if !body.is_empty() => body,
            _ => {
                warn!("{} returned no insights for '{}'", self.model.name(), filename);
                FALLBACK_REPORT.to_string()
            }
        };

        info!(
            "Generated {} character report for '{}'",
            body.chars().count(),
            filename
        );

        Ok(InsightsReport {
            filename: filename.to_string(),
            body,
            generated_at: Utc::now(),
        })
    }
}
