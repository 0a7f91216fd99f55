use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::AgentStatus;

/// Structured requirements pulled out of a campaign brief.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub product: Option<String>,
    pub audience: Option<String>,
    /// Terms for the research stage. Falls back to the product, then the
    /// audience, when the brief has no explicit keywords line.
    pub research_keywords: Vec<String>,
}

/// What the strategist hands to the downstream stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub campaign_id: String,
    pub extracted_text: String,
    #[serde(flatten)]
    pub requirements: Requirements,
}

/// Stages of the content-creation chain, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Strategist,
    Research,
    Story,
    Edit,
    Publish,
}

impl Stage {
    /// Stages that run after the strategist. None of them are implemented yet.
    pub const DOWNSTREAM: [Stage; 4] = [Stage::Research, Stage::Story, Stage::Edit, Stage::Publish];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageStatus {
    pub stage: Stage,
    pub status: AgentStatus,
}

/// Result of one campaign workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignOutcome {
    pub campaign_id: String,
    pub campaign_name: String,
    pub received_at: DateTime<Utc>,
    pub action_plan: ActionPlan,
    pub stages: Vec<StageStatus>,
}
