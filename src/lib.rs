//! # Statement Insights
//!
//! A single-page tool that turns a bank or UPI PDF statement into a readable
//! financial insights report using a hosted generative model.
//!
//! ## Pipeline
//!
//! - **Upload**: one PDF per request, copied to a temp file that is always removed
//! - **Extract**: the text layer of every page, joined with newlines; empty for scanned PDFs
//! - **Validate**: the model classifies the text; only a reply containing `INVALID` stops here
//! - **Analyze**: the model writes the report, which is passed through as-is
//! - **Present**: one of four page states (pending, extraction failed, validation failed, success)
//!
//! ## Example
//!
//! ```rust,ignore
//! use statement_insights::*;
//! use std::sync::Arc;
//!
//! let config = AnalyzerConfig::from_env()?;
//! let model = Arc::new(GeminiClient::from_config(&config)?);
//! let analyzer = StatementAnalyzer::new(model, &config.temp_dir);
//!
//! let bytes = std::fs::read("april.pdf")?;
//! match analyzer.analyze(Upload::new("april.pdf", bytes)).await? {
//!     Outcome::Success { report } => println!("{}", report.body),
//!     other => println!("{}", other.message()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod insights;
pub mod llm;
pub mod pipeline;
pub mod upload;
pub mod validator;

#[cfg(feature = "server")]
pub mod render;
#[cfg(feature = "server")]
pub mod server;

pub use config::AnalyzerConfig;
pub use error::{Result, StatementInsightsError};
pub use extract::{extract_text_from_bytes, extract_text_from_path, ExtractedText};
pub use insights::{InsightGenerator, InsightsReport, FALLBACK_REPORT};
#[cfg(feature = "gemini")]
pub use llm::GeminiClient;
pub use llm::TextModel;
pub use pipeline::{AnalysisEvent, Outcome, PresentationState, StatementAnalyzer};
pub use upload::{TempUpload, Upload};
pub use validator::{StatementValidator, Verdict};
