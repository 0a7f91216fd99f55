//! The strategist analyzes a campaign brief and produces an [`ActionPlan`].
//!
//! It dispatches the campaign input to the matching text acquisition tool,
//! then runs the requirement extractor over the result.

pub mod tools;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::models::{ActionPlan, CampaignDetails, InputType};
use tools::{DocumentParser, ImageSource, OcrModel, RequirementExtractor, ToolError};

/// Any failure while turning a campaign input into an action plan.
#[derive(Debug, Error)]
#[error("Strategist failed to process input: {0}")]
pub struct StrategistError(#[from] pub ToolError);

/// Failure to build a [`Strategist`] from configuration.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Failed to build document parser: {0}")]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Where the campaign's source material comes from.
#[derive(Debug, Clone)]
pub enum SourceInput {
    Screenshot(ImageSource),
    Document {
        input_type: InputType,
        location: String,
    },
}

impl SourceInput {
    /// Screenshots submitted with a campaign are base64 payloads.
    pub fn from_campaign(campaign: &CampaignDetails) -> Self {
        match campaign.input_type {
            InputType::Screenshot => Self::Screenshot(ImageSource::Base64(campaign.input_data.clone())),
            input_type => Self::Document {
                input_type,
                location: campaign.input_data.clone(),
            },
        }
    }

    /// Local input as given on the command line; screenshots are file paths here.
    pub fn from_local(input_type: InputType, input: String) -> Self {
        match input_type {
            InputType::Screenshot => Self::Screenshot(ImageSource::FilePath(PathBuf::from(input))),
            input_type => Self::Document {
                input_type,
                location: input,
            },
        }
    }
}

pub struct Strategist {
    ocr: OcrModel,
    documents: DocumentParser,
    requirements: RequirementExtractor,
}

impl Strategist {
    pub fn new(ocr: OcrModel, documents: DocumentParser, requirements: RequirementExtractor) -> Self {
        Self {
            ocr,
            documents,
            requirements,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, InitError> {
        let strategist = Self::new(
            OcrModel::from_config(config),
            DocumentParser::new(&config.fetch)?,
            RequirementExtractor::new(&config.extraction)?,
        );
        tracing::info!("Strategist initialized");
        Ok(strategist)
    }

    /// Get the raw text for an input from OCR or the document parser.
    pub async fn acquire_text(&self, input: &SourceInput) -> Result<String, ToolError> {
        match input {
            SourceInput::Screenshot(source) => {
                tracing::info!("Processing screenshot input for OCR");
                self.ocr.extract_text_from_image(source).await
            }
            SourceInput::Document {
                input_type,
                location,
            } => {
                tracing::info!(remote = input_type.is_remote(), "Processing {} input", input_type);
                self.documents.extract_text(location, *input_type).await
            }
        }
    }

    /// Acquire text for `input` and extract requirements from it.
    #[tracing::instrument(name = "strategist", skip_all, fields(campaign_id = %campaign_id))]
    pub async fn analyze(
        &self,
        campaign_id: &str,
        input: &SourceInput,
    ) -> Result<ActionPlan, StrategistError> {
        tracing::info!("Starting analysis for campaign");

        let extracted_text = self.acquire_text(input).await.map_err(|e| {
            tracing::error!("Content extraction failed: {}", e);
            e
        })?;
        tracing::info!(
            "Content extraction successful, extracted {} characters",
            extracted_text.chars().count()
        );

        let requirements = self.requirements.extract(&extracted_text);
        Ok(ActionPlan {
            campaign_id: campaign_id.to_string(),
            extracted_text,
            requirements,
        })
    }

    pub async fn run(
        &self,
        campaign_id: &str,
        campaign: &CampaignDetails,
    ) -> Result<ActionPlan, StrategistError> {
        self.analyze(campaign_id, &SourceInput::from_campaign(campaign))
            .await
    }
}
