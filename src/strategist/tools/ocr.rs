//! Screenshot OCR.
//!
//! Uses Tesseract via command-line for text extraction. The engine sits behind
//! [`OcrEngine`] so other backends (or test doubles) can be swapped in.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;

use super::{command_text, require_file, ToolError};
use crate::config::AppConfig;

/// Where the screenshot bytes come from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Base64 string, optionally a `data:image/...;base64,` URL.
    Base64(String),
    FilePath(PathBuf),
}

/// Something that can read text out of image bytes.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    async fn recognize(&self, image: &[u8]) -> Result<String, ToolError>;
}

/// Tesseract OCR engine.
pub struct TesseractEngine {
    command: PathBuf,
    language: String,
}

impl TesseractEngine {
    pub fn new(command: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let command = match &config.paths.tesseract_cmd {
            Some(path) if path.exists() => {
                tracing::info!("Tesseract command set to {}", path.display());
                path.clone()
            }
            _ => {
                tracing::warn!(
                    "Tesseract command not set or not found, assuming tesseract is in PATH"
                );
                PathBuf::from("tesseract")
            }
        };
        Self::new(command, config.ocr.language.clone())
    }

    async fn run_tesseract(&self, image_path: &Path) -> Result<String, ToolError> {
        let output = tokio::process::Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .await;

        command_text(
            output,
            "Tesseract OCR engine not found (install tesseract-ocr)",
            "tesseract failed",
        )
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(&self, image: &[u8]) -> Result<String, ToolError> {
        // Tesseract only reads from disk; the temp file lives until the end of this call.
        let file = tempfile::NamedTempFile::new()?;
        tokio::fs::write(file.path(), image).await?;
        self.run_tesseract(file.path()).await
    }
}

/// Screenshot-to-text tool.
#[derive(Clone)]
pub struct OcrModel {
    engine: Arc<dyn OcrEngine>,
}

impl OcrModel {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        tracing::debug!("OCR model using {} engine", engine.name());
        Self { engine }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(TesseractEngine::from_config(config)))
    }

    /// Extract trimmed text from a screenshot.
    pub async fn extract_text_from_image(&self, source: &ImageSource) -> Result<String, ToolError> {
        let bytes = match source {
            ImageSource::Base64(data) => {
                let bytes = decode_base64_image(data)?;
                tracing::debug!("Image loaded from base64 string ({} bytes)", bytes.len());
                bytes
            }
            ImageSource::FilePath(path) => {
                require_file(path).await?;
                let bytes = tokio::fs::read(path).await?;
                tracing::debug!("Image loaded from {}", path.display());
                bytes
            }
        };

        ensure_image(&bytes)?;

        let text = self.engine.recognize(&bytes).await?;
        tracing::info!("Text extraction successful ({} characters)", text.len());
        Ok(text.trim().to_string())
    }
}

/// Decode a base64 payload, tolerating a data-URL prefix and line breaks.
pub(crate) fn decode_base64_image(data: &str) -> Result<Vec<u8>, ToolError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ToolError::InvalidImage("empty image payload".to_string()));
    }

    base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ToolError::InvalidImage(format!("not valid base64: {}", e)))
}

fn ensure_image(bytes: &[u8]) -> Result<(), ToolError> {
    if infer::is_image(bytes) {
        Ok(())
    } else {
        Err(ToolError::InvalidImage(
            "data is not a recognised image format".to_string(),
        ))
    }
}
