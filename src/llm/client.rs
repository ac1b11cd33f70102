use crate::config::AnalyzerConfig;
use crate::error::{Result, StatementInsightsError};
use crate::llm::model::TextModel;
use crate::llm::types::*;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        Self::build(
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
            config.request_timeout_secs,
        )
    }

    fn build(api_key: String, base_url: String, model: String, timeout_secs: u64) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(StatementInsightsError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
            model,
            timeout_secs,
        })
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<Option<String>> {
        let payload = GenerateContentRequest::text_prompt(prompt);
        let started = Instant::now();

        let res = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.map_err(|e| self.classify(e))?;
            return Err(StatementInsightsError::ModelApi {
                status: status.as_u16(),
                body: err_text,
            });
        }

        let body: GenerateContentResponse = res.json().await.map_err(|e| self.classify(e))?;

        debug!(
            "{} responded in {} ms",
            self.model,
            started.elapsed().as_millis()
        );

        Ok(body.first_text())
    }

    fn classify(&self, err: reqwest::Error) -> StatementInsightsError {
        if err.is_timeout() {
            StatementInsightsError::ModelTimeout(self.timeout_secs)
        } else {
            // reqwest includes the URL in its message; strip the query so the key never leaks
            StatementInsightsError::ModelRequest(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<Option<String>> {
        self.generate_content(prompt).await
    }

    fn name(&self) -> &str {
        &self.model
    }
}
