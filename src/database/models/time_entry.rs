use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::{ActivityType, EntryStatus};

/// The central mutable record: one logged block of a technician's day.
///
/// Invariants (enforced by the entry service, inside a transaction):
/// - per technician + entry_date, `[start_time, end_time)` ranges never overlap
/// - `duration_minutes` is always `end_time - start_time`, end strictly after start
/// - work entries carry product_id, operation_id and operation_count; other
///   activity types carry none of them
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeEntry {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub activity_type: ActivityType,
    pub entry_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    pub product_id: Option<Uuid>,
    pub operation_id: Option<Uuid>,
    pub operation_count: Option<i32>,
    pub status: EntryStatus,
    pub supervisor_id: Option<Uuid>,
    pub supervisor_feedback: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
