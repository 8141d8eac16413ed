//! Axum route handlers for the career guidance actions.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, AppError};
use crate::models::career::{JobQuery, LearningResource, UserProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DomainResponse {
    pub domain: String,
}

#[derive(Debug, Deserialize)]
pub struct ResourcesRequest {
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub domain: String,
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Serialize)]
pub struct JobGuideResponse {
    pub job_title: String,
    pub guide: String,
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub target_job: String,
    pub report: String,
}

fn validate_profile(profile: &UserProfile) -> Result<(), AppError> {
    if profile.skills.is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }
    if profile.interests.is_empty() {
        return Err(AppError::Validation("interests cannot be empty".to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/career/domain
pub async fn handle_domain(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<DomainResponse>, AppError> {
    validate_profile(&profile)?;
    let domain = state.advisor.recommend_domain(&profile).await?;
    Ok(Json(DomainResponse { domain }))
}

/// POST /api/v1/career/resources
pub async fn handle_resources(
    State(state): State<AppState>,
    Json(request): Json<ResourcesRequest>,
) -> Result<Json<ResourcesResponse>, AppError> {
    require_text("domain", &request.domain)?;
    let resources = state.advisor.learning_resources(&request.domain).await?;
    Ok(Json(ResourcesResponse {
        domain: request.domain,
        resources,
    }))
}

/// POST /api/v1/career/recommendation
///
/// Domain first, then resources for that domain. If the second call fails
/// the whole action fails; nothing is retried.
pub async fn handle_recommendation(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<ResourcesResponse>, AppError> {
    validate_profile(&profile)?;
    let domain = state.advisor.recommend_domain(&profile).await?;
    let resources = state.advisor.learning_resources(&domain).await?;
    Ok(Json(ResourcesResponse { domain, resources }))
}

/// POST /api/v1/career/job-guide
pub async fn handle_job_guide(
    State(state): State<AppState>,
    Json(query): Json<JobQuery>,
) -> Result<Json<JobGuideResponse>, AppError> {
    require_text("title", &query.title)?;
    let guide = state.advisor.job_preparation_guide(&query).await?;
    Ok(Json(JobGuideResponse {
        job_title: query.title,
        guide,
    }))
}

/// POST /api/v1/career/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(query): Json<JobQuery>,
) -> Result<Json<SkillGapResponse>, AppError> {
    require_text("title", &query.title)?;
    if query.current_skills.as_ref().map_or(true, Vec::is_empty) {
        return Err(AppError::Validation(
            "current_skills cannot be empty".to_string(),
        ));
    }
    let report = state.advisor.skill_gap(&query).await?;
    Ok(Json(SkillGapResponse {
        target_job: query.title,
        report,
    }))
}
