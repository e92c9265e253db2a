use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::fill::{Detection, FillAction, FillPlan, FillReport};
use crate::models::form::FormSnapshot;
use crate::state::AppState;
use crate::store::load_profile_or_empty;

/// A message from the extension, tagged by `action`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExtensionMessage {
    FillForm(FormRequest),
    DetectForms(FormRequest),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormRequest {
    /// Storage key of the profile to use; the configured default when absent.
    pub profile_key: Option<String>,
    pub form: FormSnapshot,
}

#[derive(Debug, Serialize)]
pub struct FillResponse {
    pub actions: Vec<FillAction>,
    pub report: FillReport,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub success: bool,
    pub detections: Vec<Detection>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageResponse {
    Fill(FillResponse),
    Detect(DetectResponse),
}

/// POST /api/v1/messages
///
/// Fire-and-forget from the extension's point of view: a fill always answers
/// with a plan, possibly empty, even when the profile store is down.
pub async fn handle_message(
    State(state): State<AppState>,
    Json(message): Json<ExtensionMessage>,
) -> Result<Json<MessageResponse>, AppError> {
    match message {
        ExtensionMessage::FillForm(req) => {
            let key = req.profile_key.as_deref().unwrap_or(&state.config.profile_key);
            let profile = load_profile_or_empty(state.store.as_ref(), key).await;

            let mut form = req.form;
            let mut plan = FillPlan::default();
            let report = state.engine.fill_form(&profile, &mut form, &mut plan);

            Ok(Json(MessageResponse::Fill(FillResponse {
                actions: plan.into_actions(),
                report,
            })))
        }
        ExtensionMessage::DetectForms(req) => {
            let key = req.profile_key.as_deref().unwrap_or(&state.config.profile_key);
            let profile = load_profile_or_empty(state.store.as_ref(), key).await;
            let detections = state.engine.detect(&profile, &req.form);
            info!(
                controls = detections.len(),
                matched = detections.iter().filter(|d| d.key.is_some()).count(),
                "Detected form controls"
            );
            Ok(Json(MessageResponse::Detect(DetectResponse {
                success: true,
                detections,
            })))
        }
    }
}
