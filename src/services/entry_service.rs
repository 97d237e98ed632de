//! Time-entry submission: validation, overlap detection, persistence.
//!
//! All writes for a technician/day happen under a transaction holding an
//! advisory lock keyed on (technician, date), so two concurrent submissions
//! cannot both pass the overlap check against a stale read.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::{OperationWithStage, TimeEntry};
use crate::error::{ApiError, BulkEntryError};
use crate::middleware::AuthEmployee;
use crate::timeclock;
use crate::types::{ActivityType, EntryStatus};

/// Raw entry fields as submitted. Everything optional so validation can name
/// the missing field instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntryInput {
    pub activity_type: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub product_id: Option<Uuid>,
    pub operation_id: Option<Uuid>,
    pub operation_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTimeEntryRequest {
    #[serde(flatten)]
    pub entry: TimeEntryInput,
    pub entry_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct BulkTimeEntryRequest {
    pub entry_date: Option<NaiveDate>,
    pub entries: Option<Vec<TimeEntryInput>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTimeEntryRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub product_id: Option<Uuid>,
    pub operation_id: Option<Uuid>,
    pub operation_count: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EntryListFilter {
    pub status: Option<EntryStatus>,
    pub activity_type: Option<ActivityType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// An entry that passed shape validation: enums parsed, times parsed,
/// duration computed, work fields present iff the activity type is work.
#[derive(Debug, Clone)]
pub struct ValidatedEntry {
    pub activity_type: ActivityType,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    pub product_id: Option<Uuid>,
    pub operation_id: Option<Uuid>,
    pub operation_count: Option<i32>,
}

impl ValidatedEntry {
    /// Work entries await review; everything else is auto-approved.
    pub fn initial_status(&self) -> EntryStatus {
        match self.activity_type {
            ActivityType::Work => EntryStatus::Pending,
            _ => EntryStatus::Approved,
        }
    }
}

/// Field-level validation with no database access. Returns a client-facing
/// message naming the offending field or rule.
pub fn validate_entry_shape(input: &TimeEntryInput) -> Result<ValidatedEntry, String> {
    let activity_type = input
        .activity_type
        .as_deref()
        .and_then(ActivityType::parse)
        .ok_or_else(|| {
            "activity_type is required and must be: work, break, leave, waiting, or other"
                .to_string()
        })?;

    let (start_raw, end_raw) = match (&input.start_time, &input.end_time) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err("start_time and end_time are required for all activity types".to_string()),
    };

    let start_time = timeclock::parse_hhmm(start_raw).map_err(|e| e.to_string())?;
    let end_time = timeclock::parse_hhmm(end_raw).map_err(|e| e.to_string())?;
    let duration_minutes =
        timeclock::duration_minutes(start_time, end_time).map_err(|e| e.to_string())?;

    let is_work = activity_type == ActivityType::Work;
    if is_work {
        if input.product_id.is_none()
            || input.operation_id.is_none()
            || input.operation_count.is_none()
        {
            return Err(
                "For work entries: product_id, operation_id, and operation_count are required"
                    .to_string(),
            );
        }
        if input.operation_count.is_some_and(|c| c <= 0) {
            return Err("operation_count must be a positive number".to_string());
        }
    }

    Ok(ValidatedEntry {
        activity_type,
        start_time,
        end_time,
        duration_minutes,
        product_id: if is_work { input.product_id } else { None },
        operation_id: if is_work { input.operation_id } else { None },
        operation_count: if is_work { input.operation_count } else { None },
    })
}

/// Technicians may rework only entries a supervisor has rejected.
pub fn check_editable(status: EntryStatus) -> Result<(), ApiError> {
    if status == EntryStatus::Rejected {
        Ok(())
    } else {
        Err(ApiError::bad_request("Only rejected entries can be modified."))
    }
}

pub fn check_deletable(status: EntryStatus) -> Result<(), ApiError> {
    if status == EntryStatus::Rejected {
        Ok(())
    } else {
        Err(ApiError::bad_request("Only rejected entries can be deleted"))
    }
}

/// Shape-validate a whole batch, collecting every failure with its 1-based
/// index. One bad entry invalidates the batch: callers must not persist
/// anything unless the error list comes back empty.
pub fn validate_batch(inputs: &[TimeEntryInput]) -> (Vec<ValidatedEntry>, Vec<BulkEntryError>) {
    let mut validated = Vec::with_capacity(inputs.len());
    let mut errors = Vec::new();
    for (i, input) in inputs.iter().enumerate() {
        match validate_entry_shape(input) {
            Ok(entry) => validated.push(entry),
            Err(error) => errors.push(BulkEntryError {
                entry: i + 1,
                error,
            }),
        }
    }
    (validated, errors)
}

/// First overlapping pair inside a batch, as 0-based indices.
pub fn check_batch_overlaps(entries: &[ValidatedEntry]) -> Option<(usize, usize)> {
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            if timeclock::ranges_overlap(
                entries[i].start_time,
                entries[i].end_time,
                entries[j].start_time,
                entries[j].end_time,
            ) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Transaction-scoped advisory lock serializing all writes for one
/// technician/day pair.
async fn lock_technician_day(
    conn: &mut PgConnection,
    technician_id: Uuid,
    entry_date: NaiveDate,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text || ':' || $2::text, 0))")
        .bind(technician_id.to_string())
        .bind(entry_date.to_string())
        .execute(conn)
        .await?;
    Ok(())
}

/// Referential checks for a work entry: product exists, operation exists, and
/// the operation's process stage matches the technician's department.
async fn check_work_references(
    conn: &mut PgConnection,
    technician: &AuthEmployee,
    entry: &ValidatedEntry,
) -> Result<(), ApiError> {
    // Work entries carry these after shape validation, but a referenced
    // product/operation can have been deleted since (FK is SET NULL)
    let (product_id, operation_id) = match (entry.product_id, entry.operation_id) {
        (Some(p), Some(o)) => (p, o),
        _ => {
            return Err(ApiError::bad_request(
                "For work entries: product_id, operation_id, and operation_count are required",
            ))
        }
    };

    let product_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;
    if product_exists.is_none() {
        return Err(ApiError::not_found(format!(
            "Product with ID {} not found",
            product_id
        )));
    }

    let operation: Option<OperationWithStage> = sqlx::query_as(
        "SELECT o.id, o.process_id, o.operation_name, o.minimum_time_minutes, \
                o.minimum_output_count, p.stage \
         FROM operations o JOIN processes p ON p.id = o.process_id \
         WHERE o.id = $1",
    )
    .bind(operation_id)
    .fetch_optional(&mut *conn)
    .await?;

    let operation = operation.ok_or_else(|| {
        ApiError::not_found(format!("Operation with ID {} not found", operation_id))
    })?;

    let department = technician.department.ok_or_else(|| {
        ApiError::bad_request("Technician must have a department assigned to create work entries")
    })?;

    if department != operation.stage {
        return Err(ApiError::forbidden(format!(
            "Access denied. You ({} department) cannot work on {} operations. \
             Please use operations from your department ({}).",
            department, operation.stage, department
        )));
    }

    Ok(())
}

/// First stored entry on this technician/day overlapping [start, end).
async fn find_overlap(
    conn: &mut PgConnection,
    technician_id: Uuid,
    entry_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    exclude_entry: Option<Uuid>,
) -> Result<Option<(Uuid, NaiveTime, NaiveTime)>, sqlx::Error> {
    let existing: Vec<(Uuid, NaiveTime, NaiveTime)> = sqlx::query_as(
        "SELECT id, start_time, end_time FROM time_entries \
         WHERE technician_id = $1 AND entry_date = $2 \
           AND ($3::uuid IS NULL OR id <> $3) \
         ORDER BY start_time",
    )
    .bind(technician_id)
    .bind(entry_date)
    .bind(exclude_entry)
    .fetch_all(&mut *conn)
    .await?;

    Ok(existing
        .into_iter()
        .find(|(_, s, e)| timeclock::ranges_overlap(start_time, end_time, *s, *e)))
}

async fn insert_entry(
    conn: &mut PgConnection,
    technician_id: Uuid,
    entry_date: NaiveDate,
    entry: &ValidatedEntry,
) -> Result<TimeEntry, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO time_entries \
           (id, technician_id, activity_type, entry_date, start_time, end_time, \
            duration_minutes, product_id, operation_id, operation_count, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(technician_id)
    .bind(entry.activity_type)
    .bind(entry_date)
    .bind(entry.start_time)
    .bind(entry.end_time)
    .bind(entry.duration_minutes)
    .bind(entry.product_id)
    .bind(entry.operation_id)
    .bind(entry.operation_count)
    .bind(entry.initial_status())
    .fetch_one(&mut *conn)
    .await
}

fn overlap_message(id: Uuid, start: NaiveTime, end: NaiveTime) -> String {
    format!(
        "Time entry overlaps with existing entry #{} ({} - {}). Please adjust your times.",
        id,
        start.format("%H:%M"),
        end.format("%H:%M")
    )
}

/// Create a single entry. Validation, overlap check and insert share one
/// transaction and the technician/day advisory lock.
pub async fn create_entry(
    pool: &PgPool,
    technician: &AuthEmployee,
    request: CreateTimeEntryRequest,
) -> Result<TimeEntry, ApiError> {
    let validated = validate_entry_shape(&request.entry).map_err(ApiError::bad_request)?;
    let entry_date = request.entry_date.unwrap_or_else(|| Utc::now().date_naive());

    let mut tx = pool.begin().await?;
    lock_technician_day(&mut tx, technician.id, entry_date).await?;

    if validated.activity_type == ActivityType::Work {
        check_work_references(&mut tx, technician, &validated).await?;
    }

    if let Some((id, start, end)) = find_overlap(
        &mut tx,
        technician.id,
        entry_date,
        validated.start_time,
        validated.end_time,
        None,
    )
    .await?
    {
        return Err(ApiError::conflict(overlap_message(id, start, end)));
    }

    let entry = insert_entry(&mut tx, technician.id, entry_date, &validated).await?;
    tx.commit().await?;
    Ok(entry)
}

/// Create a whole day of entries atomically. Every entry is validated and all
/// errors collected before anything is written; any failure rolls back the
/// batch.
pub async fn create_entries_bulk(
    pool: &PgPool,
    technician: &AuthEmployee,
    request: BulkTimeEntryRequest,
) -> Result<Vec<TimeEntry>, ApiError> {
    let entry_date = request
        .entry_date
        .ok_or_else(|| ApiError::bad_request("entry_date is required"))?;
    let inputs = match request.entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(ApiError::bad_request("entries must be a non-empty array")),
    };

    // Step 1: shape validation, collecting every failure with its 1-based index
    let (validated, mut errors) = validate_batch(&inputs);

    let mut tx = pool.begin().await?;
    lock_technician_day(&mut tx, technician.id, entry_date).await?;

    // Step 2: referential checks for work entries, still collecting
    if errors.is_empty() {
        for (i, entry) in validated.iter().enumerate() {
            if entry.activity_type != ActivityType::Work {
                continue;
            }
            if let Err(err) = check_work_references(&mut tx, technician, entry).await {
                if matches!(err, ApiError::InternalServerError(_)) {
                    return Err(err);
                }
                errors.push(BulkEntryError {
                    entry: i + 1,
                    error: err.message().to_string(),
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::bulk_validation(
            format!("{} entry/entries failed validation", errors.len()),
            errors,
        ));
    }

    // Step 3: overlaps within the batch itself
    if let Some((i, j)) = check_batch_overlaps(&validated) {
        return Err(ApiError::conflict(format!(
            "Time overlap detected within bulk entries: Entry {} ({} - {}) overlaps with Entry {} ({} - {})",
            i + 1,
            validated[i].start_time.format("%H:%M"),
            validated[i].end_time.format("%H:%M"),
            j + 1,
            validated[j].start_time.format("%H:%M"),
            validated[j].end_time.format("%H:%M"),
        )));
    }

    // Step 4: overlaps against entries already stored for this date
    for (i, entry) in validated.iter().enumerate() {
        if let Some((id, start, end)) = find_overlap(
            &mut tx,
            technician.id,
            entry_date,
            entry.start_time,
            entry.end_time,
            None,
        )
        .await?
        {
            return Err(ApiError::conflict(format!(
                "Entry {} ({} - {}) overlaps with existing entry #{} ({} - {})",
                i + 1,
                entry.start_time.format("%H:%M"),
                entry.end_time.format("%H:%M"),
                id,
                start.format("%H:%M"),
                end.format("%H:%M"),
            )));
        }
    }

    // Step 5: all checks passed, write the batch
    let mut created = Vec::with_capacity(validated.len());
    for entry in &validated {
        created.push(insert_entry(&mut tx, technician.id, entry_date, entry).await?);
    }
    tx.commit().await?;

    Ok(created)
}

pub async fn list_my_entries(
    pool: &PgPool,
    technician_id: Uuid,
    filter: &EntryListFilter,
) -> Result<Vec<TimeEntry>, ApiError> {
    let entries = sqlx::query_as::<_, TimeEntry>(
        "SELECT * FROM time_entries \
         WHERE technician_id = $1 \
           AND ($2::entry_status IS NULL OR status = $2) \
           AND ($3::activity_type IS NULL OR activity_type = $3) \
           AND ($4::date IS NULL OR entry_date >= $4) \
           AND ($5::date IS NULL OR entry_date <= $5) \
         ORDER BY entry_date DESC, start_time ASC",
    )
    .bind(technician_id)
    .bind(filter.status)
    .bind(filter.activity_type)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

pub async fn get_my_entry(
    pool: &PgPool,
    technician_id: Uuid,
    entry_id: Uuid,
) -> Result<TimeEntry, ApiError> {
    sqlx::query_as::<_, TimeEntry>(
        "SELECT * FROM time_entries WHERE id = $1 AND technician_id = $2",
    )
    .bind(entry_id)
    .bind(technician_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Work entry not found"))
}

/// Rework a rejected entry. Re-runs duration, reference and overlap checks
/// for whatever changed, then resets the entry to `pending`.
pub async fn update_entry(
    pool: &PgPool,
    technician: &AuthEmployee,
    entry_id: Uuid,
    request: UpdateTimeEntryRequest,
) -> Result<TimeEntry, ApiError> {
    let mut tx = pool.begin().await?;

    let entry: TimeEntry = sqlx::query_as(
        "SELECT * FROM time_entries WHERE id = $1 AND technician_id = $2 FOR UPDATE",
    )
    .bind(entry_id)
    .bind(technician.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found("Work entry not found"))?;

    check_editable(entry.status)?;

    let start_time = match &request.start_time {
        Some(raw) => timeclock::parse_hhmm(raw).map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => entry.start_time,
    };
    let end_time = match &request.end_time {
        Some(raw) => timeclock::parse_hhmm(raw).map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => entry.end_time,
    };
    let duration_minutes = timeclock::duration_minutes(start_time, end_time)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    if request.operation_count.is_some_and(|c| c <= 0) {
        return Err(ApiError::bad_request("operation_count must be a positive number"));
    }

    let product_id = request.product_id.or(entry.product_id);
    let operation_id = request.operation_id.or(entry.operation_id);
    let operation_count = request.operation_count.or(entry.operation_count);

    let updated_shape = ValidatedEntry {
        activity_type: entry.activity_type,
        start_time,
        end_time,
        duration_minutes,
        product_id,
        operation_id,
        operation_count,
    };

    if entry.activity_type == ActivityType::Work {
        check_work_references(&mut tx, technician, &updated_shape).await?;
    }

    lock_technician_day(&mut tx, technician.id, entry.entry_date).await?;
    if let Some((id, start, end)) = find_overlap(
        &mut tx,
        technician.id,
        entry.entry_date,
        start_time,
        end_time,
        Some(entry.id),
    )
    .await?
    {
        return Err(ApiError::conflict(overlap_message(id, start, end)));
    }

    let updated: TimeEntry = sqlx::query_as(
        "UPDATE time_entries SET \
           start_time = $2, end_time = $3, duration_minutes = $4, \
           product_id = $5, operation_id = $6, operation_count = $7, \
           status = 'pending', updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(entry.id)
    .bind(start_time)
    .bind(end_time)
    .bind(duration_minutes)
    .bind(product_id)
    .bind(operation_id)
    .bind(operation_count)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

pub async fn delete_entry(
    pool: &PgPool,
    technician_id: Uuid,
    entry_id: Uuid,
) -> Result<(), ApiError> {
    let entry = get_my_entry(pool, technician_id, entry_id).await?;

    check_deletable(entry.status)?;

    sqlx::query("DELETE FROM time_entries WHERE id = $1")
        .bind(entry.id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Per-technician tallies, computed on read so they can never drift from the
/// underlying rows.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct WorkSummary {
    pub total_entries: i64,
    pub total_operations: i64,
    pub total_minutes: i64,
    pub pending_count: i64,
    pub rejected_count: i64,
}

pub async fn my_summary(
    pool: &PgPool,
    technician_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<WorkSummary, ApiError> {
    let summary = sqlx::query_as::<_, WorkSummary>(
        "SELECT \
           COUNT(*) FILTER (WHERE status = 'approved')::bigint AS total_entries, \
           COALESCE(SUM(operation_count) FILTER (WHERE status = 'approved'), 0)::bigint AS total_operations, \
           COALESCE(SUM(duration_minutes) FILTER (WHERE status = 'approved'), 0)::bigint AS total_minutes, \
           COUNT(*) FILTER (WHERE status = 'pending')::bigint AS pending_count, \
           COUNT(*) FILTER (WHERE status = 'rejected')::bigint AS rejected_count \
         FROM time_entries \
         WHERE technician_id = $1 \
           AND ($2::date IS NULL OR entry_date >= $2) \
           AND ($3::date IS NULL OR entry_date <= $3)",
    )
    .bind(technician_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_input() -> TimeEntryInput {
        TimeEntryInput {
            activity_type: Some("work".into()),
            start_time: Some("08:00".into()),
            end_time: Some("10:00".into()),
            product_id: Some(Uuid::new_v4()),
            operation_id: Some(Uuid::new_v4()),
            operation_count: Some(5),
        }
    }

    #[test]
    fn valid_work_entry_passes_shape_check() {
        let entry = validate_entry_shape(&work_input()).unwrap();
        assert_eq!(entry.activity_type, ActivityType::Work);
        assert_eq!(entry.duration_minutes, 120);
        assert_eq!(entry.initial_status(), EntryStatus::Pending);
    }

    #[test]
    fn unknown_activity_type_is_rejected() {
        let mut input = work_input();
        input.activity_type = Some("lunch".into());
        let err = validate_entry_shape(&input).unwrap_err();
        assert!(err.contains("activity_type"));

        input.activity_type = None;
        assert!(validate_entry_shape(&input).is_err());
    }

    #[test]
    fn missing_times_are_rejected() {
        let mut input = work_input();
        input.end_time = None;
        let err = validate_entry_shape(&input).unwrap_err();
        assert!(err.contains("start_time and end_time are required"));
    }

    #[test]
    fn end_not_after_start_is_rejected() {
        let mut input = work_input();
        input.start_time = Some("10:00".into());
        input.end_time = Some("10:00".into());
        assert!(validate_entry_shape(&input).is_err());

        input.end_time = Some("09:00".into());
        assert!(validate_entry_shape(&input).is_err());
    }

    #[test]
    fn work_entry_requires_all_work_fields() {
        for strip in ["product", "operation", "count"] {
            let mut input = work_input();
            match strip {
                "product" => input.product_id = None,
                "operation" => input.operation_id = None,
                _ => input.operation_count = None,
            }
            let err = validate_entry_shape(&input).unwrap_err();
            assert!(err.contains("product_id, operation_id, and operation_count"));
        }
    }

    #[test]
    fn non_positive_operation_count_is_rejected() {
        let mut input = work_input();
        input.operation_count = Some(0);
        assert!(validate_entry_shape(&input).is_err());
        input.operation_count = Some(-3);
        assert!(validate_entry_shape(&input).is_err());
    }

    #[test]
    fn break_entry_drops_work_fields_and_auto_approves() {
        let mut input = work_input();
        input.activity_type = Some("break".into());
        let entry = validate_entry_shape(&input).unwrap();
        assert_eq!(entry.product_id, None);
        assert_eq!(entry.operation_id, None);
        assert_eq!(entry.operation_count, None);
        assert_eq!(entry.initial_status(), EntryStatus::Approved);
    }

    fn plain_entry(start: &str, end: &str) -> ValidatedEntry {
        validate_entry_shape(&TimeEntryInput {
            activity_type: Some("break".into()),
            start_time: Some(start.into()),
            end_time: Some(end.into()),
            product_id: None,
            operation_id: None,
            operation_count: None,
        })
        .unwrap()
    }

    #[test]
    fn batch_overlap_finds_first_colliding_pair() {
        let batch = vec![
            plain_entry("08:00", "09:00"),
            plain_entry("09:00", "10:00"),
            plain_entry("09:30", "11:00"),
        ];
        assert_eq!(check_batch_overlaps(&batch), Some((1, 2)));
    }

    #[test]
    fn one_bad_entry_invalidates_the_whole_batch() {
        // The bulk path only inserts when the error list is empty, so a
        // single failure at position 2 means nothing gets persisted.
        let mut bad = work_input();
        bad.operation_count = Some(-1);
        let inputs = vec![work_input(), bad, work_input()];

        let (validated, errors) = validate_batch(&inputs);
        assert_eq!(validated.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].entry, 2);
        assert!(errors[0].error.contains("positive number"));
    }

    #[test]
    fn batch_errors_keep_one_based_positions() {
        let mut missing_times = work_input();
        missing_times.start_time = None;
        let mut unknown_activity = work_input();
        unknown_activity.activity_type = Some("lunch".into());
        let inputs = vec![missing_times, work_input(), unknown_activity];

        let (_, errors) = validate_batch(&inputs);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].entry, 1);
        assert_eq!(errors[1].entry, 3);
    }

    #[test]
    fn only_rejected_entries_can_be_reworked() {
        assert!(check_editable(EntryStatus::Rejected).is_ok());
        for status in [EntryStatus::Pending, EntryStatus::Approved] {
            let err = check_editable(status).unwrap_err();
            assert!(err.message().contains("Only rejected entries"));
        }
    }

    #[test]
    fn only_rejected_entries_can_be_deleted() {
        assert!(check_deletable(EntryStatus::Rejected).is_ok());
        for status in [EntryStatus::Pending, EntryStatus::Approved] {
            assert!(check_deletable(status).is_err());
        }
    }

    #[test]
    fn adjacent_batch_entries_are_accepted() {
        let batch = vec![
            plain_entry("08:00", "09:00"),
            plain_entry("09:00", "10:00"),
            plain_entry("10:00", "12:00"),
        ];
        assert_eq!(check_batch_overlaps(&batch), None);
    }
}
