use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use super::AppState;
use crate::models::*;
use crate::strategist::tools::ToolError;
use crate::strategist::StrategistError;

type ApiError = (StatusCode, Json<AgentResponse>);

// ============================================================
// Error Handling
// ============================================================

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(AgentResponse::error(message)))
}

fn bad_request(message: impl Into<String>) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, message)
}

/// Map a workflow failure to a status code. Problems with what the client
/// sent are 400s, upstream fetch failures 502, everything else 500.
/// The strategist message is returned to the client in every case.
fn workflow_error(e: StrategistError) -> ApiError {
    let status = match &e.0 {
        ToolError::FileNotFound(_)
        | ToolError::UnsupportedInputType(_)
        | ToolError::InvalidImage(_) => StatusCode::BAD_REQUEST,
        ToolError::Network(_) => StatusCode::BAD_GATEWAY,
        ToolError::ToolNotFound(_) | ToolError::ExtractionFailed(_) | ToolError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!("Campaign workflow failed: {}", e);
    } else {
        tracing::warn!("Campaign workflow rejected input: {}", e);
    }
    error_response(status, e.to_string())
}

/// JSON values that count as "nothing sent": null, false, zero and empty
/// strings, arrays or objects.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Pull `campaign_details` out of the request body and check it against the
/// campaign schema.
fn validate_campaign(body: Result<Json<Value>, JsonRejection>) -> Result<CampaignDetails, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!("Oversized body for /start_campaign: {}", rejection);
            return error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request payload too large.",
            );
        }
        tracing::warn!("Unreadable JSON body for /start_campaign: {}", rejection);
        bad_request("Request must contain JSON data.")
    })?;

    if is_blank(&body) {
        tracing::warn!("No JSON data received for /start_campaign");
        return Err(bad_request("Request must contain JSON data."));
    }

    let details = match body.get("campaign_details") {
        Some(details) if !is_blank(details) => details.clone(),
        _ => {
            tracing::warn!("Missing 'campaign_details' in /start_campaign request");
            return Err(bad_request("Missing 'campaign_details' in request."));
        }
    };

    serde_json::from_value(details).map_err(|e| {
        tracing::warn!("Validation error: {}", e);
        bad_request(format!("Invalid campaign data: {}", e))
    })
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    tracing::debug!("Health check requested");
    Json(serde_json::json!({
        "status": "healthy",
        "message": "AI Agent Backend is running."
    }))
}

// ============================================================
// Campaigns
// ============================================================

/// JSON Schema describing the accepted `campaign_details` object.
pub async fn campaign_schema() -> impl IntoResponse {
    Json(schemars::schema_for!(CampaignDetails))
}

pub async fn start_campaign(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AgentResponse<CampaignOutcome>>, ApiError> {
    let campaign = validate_campaign(body)?;
    tracing::info!("Received campaign request: {}", campaign.campaign_name);

    let outcome = state
        .manager
        .start_campaign_workflow(campaign)
        .await
        .map_err(workflow_error)?;

    Ok(Json(AgentResponse::success(
        "Campaign workflow initiated successfully.",
        outcome,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(value: Value) -> Result<Json<Value>, JsonRejection> {
        Ok(Json(value))
    }

    fn message(err: ApiError) -> (StatusCode, String) {
        let (status, Json(response)) = err;
        (status, response.message)
    }

    #[test]
    fn empty_object_is_rejected() {
        let err = validate_campaign(body(serde_json::json!({}))).unwrap_err();
        assert_eq!(
            message(err),
            (StatusCode::BAD_REQUEST, "Request must contain JSON data.".to_string())
        );
    }

    #[test]
    fn null_details_are_missing() {
        let err =
            validate_campaign(body(serde_json::json!({ "campaign_details": null }))).unwrap_err();
        assert_eq!(message(err).1, "Missing 'campaign_details' in request.");
    }

    #[test]
    fn empty_details_are_missing() {
        for details in [serde_json::json!({}), serde_json::json!(""), serde_json::json!([])] {
            let err = validate_campaign(body(serde_json::json!({ "campaign_details": details })))
                .unwrap_err();
            assert_eq!(
                message(err),
                (StatusCode::BAD_REQUEST, "Missing 'campaign_details' in request.".to_string())
            );
        }
    }

    #[test]
    fn empty_array_body_is_rejected() {
        let err = validate_campaign(body(serde_json::json!([]))).unwrap_err();
        assert_eq!(message(err).1, "Request must contain JSON data.");
    }

    #[test]
    fn tool_errors_map_to_status_codes() {
        let err = StrategistError(ToolError::UnsupportedInputType("fax".to_string()));
        assert_eq!(workflow_error(err).0, StatusCode::BAD_REQUEST);

        let err = StrategistError(ToolError::ToolNotFound("tesseract".to_string()));
        assert_eq!(workflow_error(err).0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
