use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use arena_core::{EngineId, ParseResponse};
use tempfile::NamedTempFile;

use crate::filename::export_filename;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Extracted content as-is.
    Markdown,
    /// The full engine response, pretty-printed.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Json => "application/json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a successful engine response into a downloadable artifact.
pub fn serialize(
    engine: EngineId,
    response: &ParseResponse,
    format: ExportFormat,
) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Markdown => response.content.clone().into_bytes(),
        ExportFormat::Json => serde_json::to_vec_pretty(response)?,
    };
    Ok(ExportArtifact {
        filename: export_filename(&response.metadata.filename, engine, format.extension()),
        content_type: format.content_type(),
        bytes,
    })
}

/// Atomically writes the artifact into `dir`, replacing any previous export of the same name.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
    ensure_output_dir(dir)?;

    let target = dir.join(&artifact.filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&artifact.bytes)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|err| ExportError::Io(err.error))?;
    Ok(target)
}

fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|err| ExportError::OutputDir(err.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|err| ExportError::OutputDir(err.to_string()))
}
