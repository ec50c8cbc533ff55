//! Axum route handlers for the job board pages.

use axum::{
    extract::{Path, State},
    response::Html,
};
use serde_json::json;
use tracing::{info, warn};

use crate::board::tenant::TenantContext;
use crate::errors::AppError;
use crate::models::job::Application;
use crate::state::AppState;
use crate::upstream::UpstreamError;
use crate::views::Page;

/// GET /
///
/// Malformed listing JSON renders as an empty list rather than an error page.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> Result<Html<String>, AppError> {
    let jobs = match state.jobs.list_jobs(&ctx.tenant).await {
        Ok(jobs) => jobs,
        Err(UpstreamError::Decode(e)) => {
            warn!(tenant = %ctx.tenant, "Job listing did not decode, rendering empty list: {e}");
            Vec::new()
        }
        Err(e) => return Err(AppError::from_upstream(state.config.error_status, e)),
    };

    let html = state.templates.render(Page::Index, &json!({ "jobs": jobs }))?;
    Ok(Html(html))
}

/// GET /job/:job
pub async fn handle_job_detail(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    ctx: TenantContext,
) -> Result<Html<String>, AppError> {
    let job = state
        .jobs
        .get_job(&ctx.tenant, &job_id)
        .await
        .map_err(|e| AppError::from_upstream(state.config.error_status, e))?;

    let html = state.templates.render(Page::Job, &job)?;
    Ok(Html(html))
}

/// GET /apply/:job
///
/// Resolves the applicant email from the SAML assertion, then submits the
/// application upstream. Any upstream failure stops the flow.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    ctx: TenantContext,
) -> Result<Html<String>, AppError> {
    let upstream_err = |e| AppError::from_upstream(state.config.error_status, e);

    let email = state
        .jobs
        .resolve_email(&ctx.tenant, &ctx.saml_key)
        .await
        .map_err(upstream_err)?;

    let application = Application {
        job: job_id,
        email,
    };
    state
        .jobs
        .submit_application(&ctx.tenant, &application)
        .await
        .map_err(upstream_err)?;
    info!(tenant = %ctx.tenant, job = %application.job, "Application submitted");

    let html = state
        .templates
        .render(Page::Thanks, &json!({ "job": application.job }))?;
    Ok(Html(html))
}
