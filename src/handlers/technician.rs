//! Technician-facing time entry endpoints. Every route operates on the
//! authenticated technician's own entries only.

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::TimeEntry;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::AuthEmployee;
use crate::services::entry_service::{
    self, BulkTimeEntryRequest, CreateTimeEntryRequest, EntryListFilter, UpdateTimeEntryRequest,
    WorkSummary,
};

/// POST /api/technician/work-entries
pub async fn create_entry(
    Extension(auth): Extension<AuthEmployee>,
    Json(request): Json<CreateTimeEntryRequest>,
) -> ApiResult<TimeEntry> {
    let pool = DatabaseManager::pool().await?;
    let entry = entry_service::create_entry(&pool, &auth, request).await?;
    Ok(ApiResponse::created("Work entry created successfully", entry))
}

/// POST /api/technician/work-entries/bulk
pub async fn create_entries_bulk(
    Extension(auth): Extension<AuthEmployee>,
    Json(request): Json<BulkTimeEntryRequest>,
) -> ApiResult<Vec<TimeEntry>> {
    let pool = DatabaseManager::pool().await?;
    let entries = entry_service::create_entries_bulk(&pool, &auth, request).await?;
    Ok(ApiResponse::created(
        format!("{} entries created successfully", entries.len()),
        entries,
    ))
}

/// GET /api/technician/work-entries
pub async fn list_entries(
    Extension(auth): Extension<AuthEmployee>,
    Query(filter): Query<EntryListFilter>,
) -> ApiResult<Vec<TimeEntry>> {
    let pool = DatabaseManager::pool().await?;
    let entries = entry_service::list_my_entries(&pool, auth.id, &filter).await?;
    Ok(ApiResponse::success(entries))
}

/// GET /api/technician/work-entries/:id
pub async fn get_entry(
    Extension(auth): Extension<AuthEmployee>,
    Path(entry_id): Path<Uuid>,
) -> ApiResult<TimeEntry> {
    let pool = DatabaseManager::pool().await?;
    let entry = entry_service::get_my_entry(&pool, auth.id, entry_id).await?;
    Ok(ApiResponse::success(entry))
}

/// PUT /api/technician/work-entries/:id
pub async fn update_entry(
    Extension(auth): Extension<AuthEmployee>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateTimeEntryRequest>,
) -> ApiResult<TimeEntry> {
    let pool = DatabaseManager::pool().await?;
    let entry = entry_service::update_entry(&pool, &auth, entry_id, request).await?;
    Ok(ApiResponse::with_message(
        "Work entry updated and resubmitted for review",
        entry,
    ))
}

/// DELETE /api/technician/work-entries/:id
pub async fn delete_entry(
    Extension(auth): Extension<AuthEmployee>,
    Path(entry_id): Path<Uuid>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    entry_service::delete_entry(&pool, auth.id, entry_id).await?;
    Ok(ApiResponse::with_message(
        "Work entry deleted successfully",
        Value::Null,
    ))
}

#[derive(Debug, Deserialize, Default)]
pub struct SummaryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/technician/summary
pub async fn summary(
    Extension(auth): Extension<AuthEmployee>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<WorkSummary> {
    let pool = DatabaseManager::pool().await?;
    let summary =
        entry_service::my_summary(&pool, auth.id, query.start_date, query.end_date).await?;
    Ok(ApiResponse::success(summary))
}
