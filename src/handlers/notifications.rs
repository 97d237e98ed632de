//! Notification inbox endpoints, mounted under both the technician and the
//! planner route groups. Always scoped to the authenticated recipient.

use axum::extract::{Path, Query};
use axum::Extension;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::Notification;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::AuthEmployee;
use crate::services::notification_service;
use crate::types::NotificationStatus;

#[derive(Debug, Deserialize, Default)]
pub struct NotificationQuery {
    pub status: Option<NotificationStatus>,
}

/// GET .../notifications
pub async fn list(
    Extension(auth): Extension<AuthEmployee>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Vec<Notification>> {
    let pool = DatabaseManager::pool().await?;
    let notifications = notification_service::list_for(&pool, auth.id, query.status).await?;
    Ok(ApiResponse::success(notifications))
}

/// GET .../notifications/unread-count
pub async fn unread_count(Extension(auth): Extension<AuthEmployee>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let count = notification_service::unread_count(&pool, auth.id).await?;
    Ok(ApiResponse::success(serde_json::json!({ "unread_count": count })))
}

/// POST .../notifications/:id/read
pub async fn mark_read(
    Extension(auth): Extension<AuthEmployee>,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    notification_service::mark_read(&pool, auth.id, notification_id).await?;
    Ok(ApiResponse::with_message(
        "Notification marked as read",
        Value::Null,
    ))
}

/// POST .../notifications/read-all
pub async fn mark_all_read(Extension(auth): Extension<AuthEmployee>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let updated = notification_service::mark_all_read(&pool, auth.id).await?;
    Ok(ApiResponse::with_message(
        format!("{} notifications marked as read", updated),
        Value::Null,
    ))
}
