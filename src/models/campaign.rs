use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::strategist::tools::ToolError;

/// How the campaign brief was supplied.
///
/// `Screenshot` carries a base64-encoded image; the document types carry a
/// local file path; `Url` and `DiscordLink` carry an address to fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Screenshot,
    TextFile,
    PdfFile,
    DocxFile,
    Url,
    DiscordLink,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Screenshot => "screenshot",
            Self::TextFile => "text_file",
            Self::PdfFile => "pdf_file",
            Self::DocxFile => "docx_file",
            Self::Url => "url",
            Self::DiscordLink => "discord_link",
        }
    }

    /// Whether the input is a network location rather than a local file.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url | Self::DiscordLink)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "screenshot" => Ok(Self::Screenshot),
            "text_file" => Ok(Self::TextFile),
            "pdf_file" => Ok(Self::PdfFile),
            "docx_file" => Ok(Self::DocxFile),
            "url" => Ok(Self::Url),
            "discord_link" => Ok(Self::DiscordLink),
            other => Err(ToolError::UnsupportedInputType(other.to_string())),
        }
    }
}

/// Platforms a finished campaign can be published to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    Instagram,
}

/// A content-creation request submitted by a client.
///
/// Exists only for the duration of one request. Required fields are enforced
/// by deserialization; everything optional defaults to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CampaignDetails {
    /// Unique ID for the campaign. Assigned by the server when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    /// Name of the campaign.
    pub campaign_name: String,
    /// Type of input provided.
    pub input_type: InputType,
    /// Base64 encoded image data, file path, or URL.
    pub input_data: String,
    /// Desired video length range (e.g., `15-60s`).
    pub required_length_sec: String,
    /// Product name or topic of the campaign.
    pub target_product: String,
    /// Target audience (e.g., `gamers`, `tech enthusiasts`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    /// Platforms to publish to.
    pub social_media_platforms: Vec<Platform>,
    /// Optional path to brand logo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_logo_path: Option<String>,
}

/// Body of `POST /start_campaign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCampaignRequest {
    pub campaign_details: CampaignDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_parses_wire_names() {
        for name in [
            "screenshot",
            "text_file",
            "pdf_file",
            "docx_file",
            "url",
            "discord_link",
        ] {
            let parsed: InputType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn input_type_rejects_unknown_names() {
        let err = "fax".parse::<InputType>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported input type: fax");
    }

    #[test]
    fn only_links_are_remote() {
        assert!(InputType::Url.is_remote());
        assert!(InputType::DiscordLink.is_remote());
        assert!(!InputType::PdfFile.is_remote());
        assert!(!InputType::Screenshot.is_remote());
    }

    #[test]
    fn campaign_details_optional_fields_default_to_none() {
        let details: CampaignDetails = serde_json::from_value(serde_json::json!({
            "campaign_name": "Launch",
            "input_type": "url",
            "input_data": "https://example.com",
            "required_length_sec": "15-60s",
            "target_product": "Widget",
            "social_media_platforms": ["youtube"]
        }))
        .unwrap();

        assert!(details.campaign_id.is_none());
        assert!(details.target_audience.is_none());
        assert!(details.brand_logo_path.is_none());
        assert_eq!(details.social_media_platforms, vec![Platform::Youtube]);
    }

    #[test]
    fn campaign_details_reject_unknown_platform() {
        let err = serde_json::from_value::<CampaignDetails>(serde_json::json!({
            "campaign_name": "Launch",
            "input_type": "url",
            "input_data": "https://example.com",
            "required_length_sec": "15-60s",
            "target_product": "Widget",
            "social_media_platforms": ["tiktok"]
        }))
        .unwrap_err();

        assert!(err.to_string().contains("tiktok"));
    }
}
