//! Campaign workflow orchestration.
//!
//! The manager runs the strategist and reports the downstream stages
//! (research, story, edit, publish), which are not implemented yet and stay pending.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{AgentStatus, CampaignDetails, CampaignOutcome, Stage, StageStatus};
use crate::strategist::{Strategist, StrategistError};

pub struct Manager {
    strategist: Strategist,
}

impl Manager {
    pub fn new(strategist: Strategist) -> Self {
        tracing::info!("Manager initialized");
        Self { strategist }
    }

    /// Run one campaign through the workflow.
    pub async fn start_campaign_workflow(
        &self,
        campaign: CampaignDetails,
    ) -> Result<CampaignOutcome, StrategistError> {
        let received_at = Utc::now();
        let campaign_id = campaign
            .campaign_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::info!(
            campaign_id = %campaign_id,
            "Starting campaign workflow for: {}",
            campaign.campaign_name
        );

        let action_plan = self.strategist.run(&campaign_id, &campaign).await?;

        let stages = std::iter::once(StageStatus {
            stage: Stage::Strategist,
            status: AgentStatus::Success,
        })
        .chain(Stage::DOWNSTREAM.into_iter().map(|stage| StageStatus {
            stage,
            status: AgentStatus::Pending,
        }))
        .collect();

        tracing::info!(campaign_id = %campaign_id, "Campaign workflow completed, downstream stages pending");

        Ok(CampaignOutcome {
            campaign_id,
            campaign_name: campaign.campaign_name,
            received_at,
            action_plan,
            stages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{InputType, Platform};

    fn manager() -> Manager {
        Manager::new(Strategist::from_config(&AppConfig::default()).unwrap())
    }

    fn campaign(campaign_id: Option<&str>, input_data: &str) -> CampaignDetails {
        CampaignDetails {
            campaign_id: campaign_id.map(str::to_string),
            campaign_name: "Launch".to_string(),
            input_type: InputType::TextFile,
            input_data: input_data.to_string(),
            required_length_sec: "15-60s".to_string(),
            target_product: "Widget".to_string(),
            target_audience: Some("gamers".to_string()),
            social_media_platforms: vec![Platform::Instagram],
            brand_logo_path: None,
        }
    }

    fn brief() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.txt");
        std::fs::write(&path, "Product: Widget").unwrap();
        let path = path.to_str().unwrap().to_string();
        (dir, path)
    }

    #[tokio::test]
    async fn assigns_campaign_id_when_missing() {
        let (_dir, path) = brief();
        let outcome = manager()
            .start_campaign_workflow(campaign(None, &path))
            .await
            .unwrap();

        assert!(Uuid::parse_str(&outcome.campaign_id).is_ok());
        assert_eq!(outcome.action_plan.campaign_id, outcome.campaign_id);
    }

    #[tokio::test]
    async fn keeps_client_campaign_id() {
        let (_dir, path) = brief();
        let outcome = manager()
            .start_campaign_workflow(campaign(Some("spring-24"), &path))
            .await
            .unwrap();

        assert_eq!(outcome.campaign_id, "spring-24");
    }

    #[tokio::test]
    async fn downstream_stages_are_pending() {
        let (_dir, path) = brief();
        let outcome = manager()
            .start_campaign_workflow(campaign(None, &path))
            .await
            .unwrap();

        assert_eq!(outcome.stages.len(), 5);
        assert_eq!(outcome.stages[0].stage, Stage::Strategist);
        assert_eq!(outcome.stages[0].status, AgentStatus::Success);
        assert!(outcome.stages[1..]
            .iter()
            .all(|s| s.status == AgentStatus::Pending));
    }
}
