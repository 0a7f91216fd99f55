use serde::{Deserialize, Serialize};

/// Status of an agent operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Success,
    Error,
    Pending,
}

/// Uniform success/error envelope returned by the campaign endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse<T = serde_json::Value> {
    pub status: AgentStatus,
    /// Human-readable description of the outcome.
    pub message: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> AgentResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: AgentStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: AgentStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_omits_data() {
        let response: AgentResponse = AgentResponse::error("boom");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "error", "message": "boom" }));
    }

    #[test]
    fn success_envelope_carries_data() {
        let response = AgentResponse::success("done", vec![1, 2]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"], serde_json::json!([1, 2]));
    }
}
