//! The per-request pipeline: upload → extract → validate → analyze.
//!
//! Each call to [`StatementAnalyzer::analyze`] handles exactly one upload and ends
//! in one [`Outcome`]. The temporary copy of the upload is removed on every exit
//! path, including errors.

use crate::error::{Result, StatementInsightsError};
use crate::extract::{extract_text_from_path, ExtractedText};
use crate::insights::{InsightGenerator, InsightsReport};
use crate::llm::TextModel;
use crate::upload::{TempUpload, Upload};
use crate::validator::{StatementValidator, Verdict};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "✅ File uploaded successfully!";
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "⚠️ Could not extract text. Please upload a digital statement PDF (not scanned image).";
pub const VALIDATION_FAILED_MESSAGE: &str = "⚠️ This is not a valid Bank or UPI statement. Please follow the guidelines in the sidebar and upload the correct PDF.";
pub const COMPLETION_MESSAGE: &str =
    "✅ Analysis Completed! Use these insights to manage your money wisely 🚀";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AnalysisEvent {
    Uploaded { filename: String, bytes: usize },
    Extracting,
    Validating,
    Analyzing,
    Completed,
    Stopped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    ExtractionFailed,
    ValidationFailed { verdict: Verdict },
    Success { report: InsightsReport },
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::ExtractionFailed => EXTRACTION_FAILED_MESSAGE,
            Outcome::ValidationFailed { .. } => VALIDATION_FAILED_MESSAGE,
            Outcome::Success { .. } => COMPLETION_MESSAGE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// What the page shows. `UploadPending` is the initial state of every request.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationState {
    UploadPending,
    ExtractionFailed,
    ValidationFailed,
    Success { report: InsightsReport },
}

impl From<Outcome> for PresentationState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::ExtractionFailed => PresentationState::ExtractionFailed,
            Outcome::ValidationFailed { .. } => PresentationState::ValidationFailed,
            Outcome::Success { report } => PresentationState::Success { report },
        }
    }
}

pub struct StatementAnalyzer {
    validator: StatementValidator,
    generator: InsightGenerator,
    temp_dir: PathBuf,
}

impl StatementAnalyzer {
    /// Uses the same model for both round trips.
    pub fn new(model: Arc<dyn TextModel>, temp_dir: impl Into<PathBuf>) -> Self {
        Self::with_models(model.clone(), model, temp_dir)
    }

    pub fn with_models(
        validator_model: Arc<dyn TextModel>,
        generator_model: Arc<dyn TextModel>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            validator: StatementValidator::new(validator_model),
            generator: InsightGenerator::new(generator_model),
            temp_dir: temp_dir.into(),
        }
    }

    pub async fn analyze(&self, upload: Upload) -> Result<Outcome> {
        self.analyze_with_progress(upload, None).await
    }

    pub async fn analyze_with_progress(
        &self,
        upload: Upload,
        progress: Option<Sender<AnalysisEvent>>,
    ) -> Result<Outcome> {
        upload.ensure_pdf()?;

        let temp = TempUpload::write(&upload, &self.temp_dir)?;
        info!(
            "Accepted upload '{}' ({} bytes)",
            upload.filename,
            upload.size()
        );
        self.send_event(
            &progress,
            AnalysisEvent::Uploaded {
                filename: upload.filename.clone(),
                bytes: upload.size(),
            },
        )
        .await;

        let result = self.run(&upload, &temp, &progress).await;

        // The guard would also remove the file on drop; closing here surfaces failures.
        if let Err(e) = temp.cleanup() {
            warn!("Temp file cleanup failed for '{}': {}", upload.filename, e);
        }

        match &result {
            Ok(Outcome::Success { .. }) => {
                self.send_event(&progress, AnalysisEvent::Completed).await
            }
            Ok(outcome) => {
                self.send_event(
                    &progress,
                    AnalysisEvent::Stopped {
                        reason: outcome.message().to_string(),
                    },
                )
                .await
            }
            Err(e) => {
                self.send_event(
                    &progress,
                    AnalysisEvent::Stopped {
                        reason: e.to_string(),
                    },
                )
                .await
            }
        }

        result
    }

    async fn run(
        &self,
        upload: &Upload,
        temp: &TempUpload,
        progress: &Option<Sender<AnalysisEvent>>,
    ) -> Result<Outcome> {
        self.send_event(progress, AnalysisEvent::Extracting).await;
        let extracted = extract_blocking(temp.path().to_path_buf()).await?;

        if extracted.is_empty() {
            info!(
                "No text layer in '{}' ({} pages)",
                upload.filename, extracted.page_count
            );
            return Ok(Outcome::ExtractionFailed);
        }

        self.send_event(progress, AnalysisEvent::Validating).await;
        let verdict = self.validator.validate(&extracted.text).await?;
        if !verdict.is_valid {
            return Ok(Outcome::ValidationFailed { verdict });
        }

        self.send_event(progress, AnalysisEvent::Analyzing).await;
        let report = self
            .generator
            .generate(&extracted.text, &upload.filename)
            .await?;

        Ok(Outcome::Success { report })
    }

    async fn send_event(&self, sender: &Option<Sender<AnalysisEvent>>, event: AnalysisEvent) {
        if let Some(tx) = sender {
            let _ = tx.send(event).await;
        }
    }
}

async fn extract_blocking(path: PathBuf) -> Result<ExtractedText> {
    tokio::task::spawn_blocking(move || extract_text_from_path(&path))
        .await
        .map_err(|e| StatementInsightsError::Pdf(format!("Extraction task failed: {}", e)))?
}
