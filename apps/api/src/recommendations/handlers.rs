//! Axum route handlers for the Recommendations API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::admission::QuotaStatus;
use crate::errors::AppError;
use crate::llm_client::prompts::{build_career_prompt, REQUESTED_PROFESSIONS};
use crate::models::career::CareerReport;
use crate::models::profile::NewProfile;
use crate::recommendations::normalizer::normalize;
use crate::recommendations::render::render_report_markdown;
use crate::recommendations::storage::{fetch_report, store_report};
use crate::state::AppState;

/// Response header carrying the id of the stored profile.
pub const PROFILE_ID_HEADER: &str = "x-profile-id";
const REPORT_FILENAME: &str = "career-recommendations.md";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub goals: String,
    pub interests: String,
    pub current_skills: String,
}

impl AnalyzeRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("goals", &self.goals),
            ("interests", &self.interests),
            ("currentSkills", &self.current_skills),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    fn as_new_profile(&self) -> NewProfile<'_> {
        NewProfile {
            name: self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            goals: self.goals.trim(),
            interests: self.interests.trim(),
            current_skills: self.current_skills.trim(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// admission gate → persist profile → model call → normalize → store document.
/// The body is the normalized report mapping; the stored profile id is returned
/// in the `x-profile-id` header. A failed model call is not retried.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;
    state.gate.try_admit()?;

    let profile = state.profiles.insert(&request.as_new_profile()).await?;

    let prompt = build_career_prompt(&profile.goals, &profile.interests, &profile.current_skills);
    let raw = state
        .generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Career analysis failed: {e}")))?;

    let report = normalize(&raw);
    let typed = CareerReport::from_normalized(&report);
    info!(
        "Analysis for profile {} produced {} professions",
        profile.id,
        typed.professions.len()
    );
    if typed.professions.len() != REQUESTED_PROFESSIONS {
        warn!(
            "Expected {REQUESTED_PROFESSIONS} professions for profile {}, got {}",
            profile.id,
            typed.professions.len()
        );
    }

    // The document is a convenience; the analysis itself already succeeded.
    let markdown = render_report_markdown(&profile, &typed);
    if let Err(e) = store_report(&state.s3, &state.config.s3_bucket, profile.id, markdown).await {
        warn!("Report for profile {} not stored: {e}", profile.id);
    }

    Ok((
        [(PROFILE_ID_HEADER, profile.id.to_string())],
        Json(Value::Object(report)),
    ))
}

/// GET /api/v1/reports/:profile_id
///
/// Downloads the rendered recommendations document as an attachment.
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let body = fetch_report(&state.s3, &state.config.s3_bucket, profile_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        body,
    ))
}

/// GET /api/v1/quota
pub async fn handle_quota(State(state): State<AppState>) -> Json<QuotaStatus> {
    Json(state.gate.status())
}
