//! Notification inbox: creation is internal (review/escalation flows), reads
//! and state changes are scoped to the recipient.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::Notification;
use crate::error::ApiError;
use crate::types::NotificationStatus;

pub const KIND_WORK_ENTRY_STATUS: &str = "work_entry_status";
pub const KIND_ESCALATION: &str = "consecutive_rejection";

pub async fn create(
    conn: &mut PgConnection,
    recipient_id: Uuid,
    entry_id: Option<Uuid>,
    kind: &str,
    title: &str,
    message: &str,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO notifications (id, recipient_id, entry_id, kind, title, message, status) \
         VALUES ($1, $2, $3, $4, $5, $6, 'unread') \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(recipient_id)
    .bind(entry_id)
    .bind(kind)
    .bind(title)
    .bind(message)
    .fetch_one(conn)
    .await
}

pub async fn list_for(
    pool: &PgPool,
    recipient_id: Uuid,
    status: Option<NotificationStatus>,
) -> Result<Vec<Notification>, ApiError> {
    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications \
         WHERE recipient_id = $1 AND ($2::notification_status IS NULL OR status = $2) \
         ORDER BY created_at DESC",
    )
    .bind(recipient_id)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

pub async fn unread_count(pool: &PgPool, recipient_id: Uuid) -> Result<i64, ApiError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*)::bigint FROM notifications WHERE recipient_id = $1 AND status = 'unread'",
    )
    .bind(recipient_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

pub async fn mark_read(
    pool: &PgPool,
    recipient_id: Uuid,
    notification_id: Uuid,
) -> Result<(), ApiError> {
    let result = sqlx::query(
        "UPDATE notifications SET status = 'read' WHERE id = $1 AND recipient_id = $2",
    )
    .bind(notification_id)
    .bind(recipient_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Notification not found"));
    }
    Ok(())
}

pub async fn mark_all_read(pool: &PgPool, recipient_id: Uuid) -> Result<u64, ApiError> {
    let result = sqlx::query(
        "UPDATE notifications SET status = 'read' WHERE recipient_id = $1 AND status = 'unread'",
    )
    .bind(recipient_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
