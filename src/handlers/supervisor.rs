//! Supervisor review endpoints. All routes are scoped to the supervisor's
//! department by the review service.

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::TimeEntry;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::AuthEmployee;
use crate::services::review_service::{
    self, ReviewEntryRow, ReviewListFilter, SupervisorDashboard, TechnicianPerformance,
};

/// GET /api/supervisor/entries/pending
pub async fn pending_entries(
    Extension(auth): Extension<AuthEmployee>,
    Query(filter): Query<ReviewListFilter>,
) -> ApiResult<Vec<ReviewEntryRow>> {
    let pool = DatabaseManager::pool().await?;
    let entries = review_service::list_pending(&pool, &auth, &filter).await?;
    Ok(ApiResponse::success(entries))
}

/// GET /api/supervisor/entries
pub async fn list_entries(
    Extension(auth): Extension<AuthEmployee>,
    Query(filter): Query<ReviewListFilter>,
) -> ApiResult<Vec<ReviewEntryRow>> {
    let pool = DatabaseManager::pool().await?;
    let entries = review_service::list_entries(&pool, &auth, &filter).await?;
    Ok(ApiResponse::success(entries))
}

/// GET /api/supervisor/entries/:id
pub async fn get_entry(
    Extension(auth): Extension<AuthEmployee>,
    Path(entry_id): Path<Uuid>,
) -> ApiResult<TimeEntry> {
    let pool = DatabaseManager::pool().await?;
    let entry = review_service::get_entry(&pool, &auth, entry_id).await?;
    Ok(ApiResponse::success(entry))
}

#[derive(Debug, Deserialize, Default)]
pub struct ReviewDecision {
    pub feedback: Option<String>,
}

/// POST /api/supervisor/entries/:id/approve
pub async fn approve_entry(
    Extension(auth): Extension<AuthEmployee>,
    Path(entry_id): Path<Uuid>,
    Json(decision): Json<ReviewDecision>,
) -> ApiResult<TimeEntry> {
    let pool = DatabaseManager::pool().await?;
    let entry = review_service::approve(&pool, &auth, entry_id, decision.feedback).await?;
    Ok(ApiResponse::with_message("Work entry approved", entry))
}

/// POST /api/supervisor/entries/:id/reject
pub async fn reject_entry(
    Extension(auth): Extension<AuthEmployee>,
    Path(entry_id): Path<Uuid>,
    Json(decision): Json<ReviewDecision>,
) -> ApiResult<TimeEntry> {
    let feedback = decision
        .feedback
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::bad_request("Feedback is required when rejecting an entry"))?
        .to_string();

    let pool = DatabaseManager::pool().await?;
    let entry = review_service::reject(&pool, &auth, entry_id, &feedback).await?;
    Ok(ApiResponse::with_message("Work entry rejected", entry))
}

/// POST /api/supervisor/entries/:id/cancel-approval
pub async fn cancel_approval(
    Extension(auth): Extension<AuthEmployee>,
    Path(entry_id): Path<Uuid>,
    Json(decision): Json<ReviewDecision>,
) -> ApiResult<TimeEntry> {
    let pool = DatabaseManager::pool().await?;
    let entry = review_service::cancel_approval(&pool, &auth, entry_id, decision.feedback).await?;
    Ok(ApiResponse::with_message(
        "Approval cancelled, entry returned to pending",
        entry,
    ))
}

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub technician_id: Option<Uuid>,
}

/// GET /api/supervisor/dashboard
pub async fn dashboard(
    Extension(auth): Extension<AuthEmployee>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<SupervisorDashboard> {
    let pool = DatabaseManager::pool().await?;
    let dashboard = review_service::dashboard(
        &pool,
        &auth,
        query.start_date,
        query.end_date,
        query.technician_id,
    )
    .await?;
    Ok(ApiResponse::success(dashboard))
}

#[derive(Debug, Deserialize, Default)]
pub struct PerformanceQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/supervisor/technicians/:id/performance
pub async fn technician_performance(
    Extension(auth): Extension<AuthEmployee>,
    Path(technician_id): Path<Uuid>,
    Query(query): Query<PerformanceQuery>,
) -> ApiResult<TechnicianPerformance> {
    let pool = DatabaseManager::pool().await?;
    let performance = review_service::technician_performance(
        &pool,
        &auth,
        technician_id,
        query.start_date,
        query.end_date,
    )
    .await?;
    Ok(ApiResponse::success(performance))
}
