//! Text acquisition and requirement extraction tools used by the strategist.
//!
//! - [`OcrModel`]: screenshots to text via a pluggable [`OcrEngine`] (Tesseract by default)
//! - [`DocumentParser`]: text, PDF and DOCX files, URLs and Discord links to text
//! - [`RequirementExtractor`]: raw text to product, audience and research keywords

mod document;
mod ocr;
mod requirements;

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

pub use document::DocumentParser;
pub use ocr::{ImageSource, OcrEngine, OcrModel, TesseractEngine};
pub use requirements::{title_case, RequirementExtractor};

/// Errors returned by the text acquisition tools.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Could not fetch content from URL: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unsupported input type: {0}")]
    UnsupportedInputType(String),

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Failed to extract text: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// External commands the tools shell out to, with availability.
pub fn check_tools() -> Vec<(String, bool)> {
    ["tesseract", "pdftotext"]
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}

/// Turn the output of an external command into text, mapping a missing
/// executable to [`ToolError::ToolNotFound`].
pub(crate) fn command_text(
    result: std::io::Result<std::process::Output>,
    tool_hint: &str,
    error_prefix: &str,
) -> Result<String, ToolError> {
    match result {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ToolError::ExtractionFailed(format!(
                "{}: {}",
                error_prefix,
                stderr.trim()
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ToolError::ToolNotFound(tool_hint.to_string()))
        }
        Err(e) => Err(ToolError::Io(e)),
    }
}

/// Fail with [`ToolError::FileNotFound`] unless `path` exists.
pub(crate) async fn require_file(path: &std::path::Path) -> Result<(), ToolError> {
    if tokio::fs::try_exists(path).await? {
        Ok(())
    } else {
        Err(ToolError::FileNotFound(path.to_path_buf()))
    }
}
