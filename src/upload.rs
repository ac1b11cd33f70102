use crate::error::{Result, StatementInsightsError};
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const TEMP_PREFIX: &str = "temp_";

/// Longest sanitized name kept in a temp file name. Leaves room for the prefix and
/// random suffix under the usual 255-byte file name limit.
pub const MAX_NAME_BYTES: usize = 100;

/// A single uploaded statement, held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Rejects empty uploads and anything whose name does not map to `application/pdf`.
    pub fn ensure_pdf(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(StatementInsightsError::EmptyUpload);
        }

        let mime_type = mime_guess::from_path(&self.filename).first_or_octet_stream();
        if mime_type.essence_str() != "application/pdf" {
            return Err(StatementInsightsError::UnsupportedFileType {
                filename: self.filename.clone(),
                mime_type: mime_type.to_string(),
            });
        }

        Ok(())
    }
}

/// The on-disk copy of an [`Upload`]. The file is removed when this value is dropped,
/// so it never outlives the request that created it.
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    pub fn write(upload: &Upload, dir: &Path) -> Result<Self> {
        let prefix = format!("{}{}.", TEMP_PREFIX, sanitize_filename(&upload.filename));
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".pdf")
            .tempfile_in(dir)?;

        file.write_all(&upload.bytes)?;
        file.flush()?;

        debug!(
            "Wrote {} bytes of '{}' to {}",
            upload.size(),
            upload.filename,
            file.path().display()
        );

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the file now and reports any failure instead of ignoring it.
    pub fn cleanup(self) -> Result<()> {
        let path: PathBuf = self.file.path().to_path_buf();
        self.file.close().map_err(|e| {
            warn!("Failed to remove temp file {}: {}", path.display(), e);
            StatementInsightsError::IoError(e)
        })
    }
}

/// Keeps only the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` so a client-supplied name cannot escape the temp directory.
/// The result is ASCII and at most [`MAX_NAME_BYTES`] long.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut cleaned = cleaned.trim_start_matches('.').to_string();
    // ASCII only, so any byte index is a char boundary
    cleaned.truncate(MAX_NAME_BYTES);
    if cleaned.is_empty() {
        "statement".to_string()
    } else {
        cleaned
    }
}
