//! Text extraction from text/PDF/DOCX files and from URLs.

use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use super::{command_text, require_file, ToolError};
use crate::config::FetchConfig;
use crate::models::InputType;

/// Reads campaign briefs from local documents or the web.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    client: reqwest::Client,
}

impl DocumentParser {
    pub fn new(config: &FetchConfig) -> Result<Self, ToolError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Extract trimmed text from a file path or URL.
    pub async fn extract_text(&self, input: &str, input_type: InputType) -> Result<String, ToolError> {
        let text = match input_type {
            InputType::TextFile => {
                let path = Path::new(input);
                require_file(path).await?;
                let text = tokio::fs::read_to_string(path).await?;
                tracing::info!("Text extracted from TXT file");
                text
            }
            InputType::PdfFile => {
                let path = Path::new(input);
                require_file(path).await?;
                let text = self.run_pdftotext(path).await?;
                tracing::info!("Text extracted from PDF file");
                text
            }
            InputType::DocxFile => {
                let path = Path::new(input);
                require_file(path).await?;
                let bytes = tokio::fs::read(path).await?;
                let text = docx_text(&bytes)?;
                tracing::info!("Text extracted from DOCX file");
                text
            }
            InputType::Url | InputType::DiscordLink => self.fetch(input).await?,
            InputType::Screenshot => {
                return Err(ToolError::UnsupportedInputType(input_type.to_string()));
            }
        };

        Ok(text.trim().to_string())
    }

    async fn fetch(&self, url: &str) -> Result<String, ToolError> {
        tracing::info!("Fetching content from URL: {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;
        tracing::info!("Content from URL fetched ({} bytes)", text.len());
        Ok(text)
    }

    async fn run_pdftotext(&self, path: &Path) -> Result<String, ToolError> {
        let output = tokio::process::Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8"])
            .arg(path)
            .arg("-") // Output to stdout
            .output()
            .await;

        command_text(output, "pdftotext (install poppler-utils)", "pdftotext failed")
    }
}

/// Paragraph text of a DOCX archive, one line per paragraph.
pub(crate) fn docx_text(bytes: &[u8]) -> Result<String, ToolError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ToolError::ExtractionFailed(format!("invalid DOCX archive: {}", e)))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ToolError::ExtractionFailed(format!("DOCX has no document body: {}", e)))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(document_xml_text(&xml))
}

fn document_xml_text(xml: &str) -> String {
    static EMPTY_PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    static TEXT_RUN: OnceLock<Regex> = OnceLock::new();

    let empty_paragraph =
        EMPTY_PARAGRAPH.get_or_init(|| Regex::new(r"<w:p(?:\s[^>]*)?/>").expect("valid regex"));
    let paragraph = PARAGRAPH
        .get_or_init(|| Regex::new(r"(?s)<w:p(?:\s[^>]*)?>(.*?)</w:p>").expect("valid regex"));
    let text_run = TEXT_RUN
        .get_or_init(|| Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>").expect("valid regex"));

    let xml = empty_paragraph.replace_all(xml, "<w:p></w:p>");

    let mut text = String::new();
    for para in paragraph.captures_iter(&xml) {
        for run in text_run.captures_iter(&para[1]) {
            text.push_str(&decode_entities(&run[1]));
        }
        text.push('\n');
    }
    text
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
