use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementInsightsError {
    #[error("No file was uploaded")]
    EmptyUpload,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Upload exceeds the size limit")]
    UploadTooLarge,

    #[error("Unsupported file type for '{filename}': expected a PDF, got {mime_type}")]
    UnsupportedFileType { filename: String, mime_type: String },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid configuration for {key}: {details}")]
    InvalidConfig { key: String, details: String },

    #[error("Model request failed: {0}")]
    ModelRequest(String),

    #[error("Gemini API Error (status {status}): {body}")]
    ModelApi { status: u16, body: String },

    #[error("Model did not respond within {0} seconds")]
    ModelTimeout(u64),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StatementInsightsError {
    /// True for failures caused by the uploaded file rather than by this service
    /// or the model provider.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StatementInsightsError::EmptyUpload
                | StatementInsightsError::InvalidUpload(_)
                | StatementInsightsError::UploadTooLarge
                | StatementInsightsError::UnsupportedFileType { .. }
                | StatementInsightsError::Pdf(_)
        )
    }
}

impl From<lopdf::Error> for StatementInsightsError {
    fn from(err: lopdf::Error) -> Self {
        StatementInsightsError::Pdf(err.to_string())
    }
}

#[cfg(feature = "gemini")]
impl From<reqwest::Error> for StatementInsightsError {
    fn from(err: reqwest::Error) -> Self {
        StatementInsightsError::ModelRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatementInsightsError>;
