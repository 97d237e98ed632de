//! Supervisor-side review of work entries.
//!
//! A supervisor may only touch an entry when both the entry's technician and
//! the entry's operation belong to the supervisor's own department. Approved
//! and rejected are not terminal states: a supervisor can correct a prior
//! decision at any time. Only cancel-approval is restricted to `approved`.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::TimeEntry;
use crate::error::ApiError;
use crate::middleware::AuthEmployee;
use crate::services::escalation::{self, EntryRejected};
use crate::services::notification_service;
use crate::services::stats::{self, StatsFilter};
use crate::types::{Department, EntryStatus};

/// Entry joined with reviewer-facing context.
#[derive(Debug, Serialize, FromRow)]
pub struct ReviewEntryRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: TimeEntry,
    pub technician_code: String,
    pub product_code: Option<String>,
    pub product_name: Option<String>,
    pub operation_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReviewListFilter {
    pub status: Option<EntryStatus>,
    pub technician_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Supervisors without a department have no review scope at all.
fn supervisor_department(supervisor: &AuthEmployee) -> Result<Department, ApiError> {
    supervisor
        .department
        .ok_or_else(|| ApiError::forbidden("Supervisor must have a department assigned"))
}

/// Both halves of the access invariant: the entry's technician and the
/// entry's operation must sit in the supervisor's department.
async fn check_department_access(
    conn: &mut PgConnection,
    entry: &TimeEntry,
    department: Department,
) -> Result<(), ApiError> {
    let technician_department: Option<(Option<Department>,)> =
        sqlx::query_as("SELECT department FROM employees WHERE id = $1")
            .bind(entry.technician_id)
            .fetch_optional(&mut *conn)
            .await?;

    match technician_department {
        Some((Some(dept),)) if dept == department => {}
        _ => {
            return Err(ApiError::forbidden(
                "Access denied. This entry belongs to a technician from a different department.",
            ))
        }
    }

    if let Some(operation_id) = entry.operation_id {
        let stage: Option<(Department,)> = sqlx::query_as(
            "SELECT p.stage FROM operations o JOIN processes p ON p.id = o.process_id \
             WHERE o.id = $1",
        )
        .bind(operation_id)
        .fetch_optional(&mut *conn)
        .await?;

        match stage {
            Some((stage,)) if stage == department => {}
            _ => {
                return Err(ApiError::forbidden(
                    "Access denied. This entry belongs to an operation from a different department.",
                ))
            }
        }
    }

    Ok(())
}

/// Cancel-approval applies only to entries currently approved. Approve and
/// reject carry no such guard; a supervisor may revise either decision.
pub fn check_cancellable(status: EntryStatus) -> Result<(), ApiError> {
    if status == EntryStatus::Approved {
        Ok(())
    } else {
        Err(ApiError::bad_request("Only approved entries can be cancelled"))
    }
}

async fn fetch_entry(conn: &mut PgConnection, entry_id: Uuid) -> Result<TimeEntry, ApiError> {
    sqlx::query_as::<_, TimeEntry>("SELECT * FROM time_entries WHERE id = $1")
        .bind(entry_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| ApiError::not_found("Work entry not found"))
}

pub async fn list_pending(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    filter: &ReviewListFilter,
) -> Result<Vec<ReviewEntryRow>, ApiError> {
    let department = supervisor_department(supervisor)?;

    let entries = sqlx::query_as::<_, ReviewEntryRow>(
        "SELECT te.*, e.employee_code AS technician_code, \
                pr.product_code, pr.product_name, o.operation_name \
         FROM time_entries te \
         JOIN employees e ON e.id = te.technician_id \
         JOIN operations o ON o.id = te.operation_id \
         JOIN processes p ON p.id = o.process_id \
         LEFT JOIN products pr ON pr.id = te.product_id \
         WHERE te.status = 'pending' AND te.activity_type = 'work' \
           AND e.department = $1 AND p.stage = $1 \
           AND ($2::uuid IS NULL OR te.technician_id = $2) \
           AND ($3::date IS NULL OR te.entry_date = $3) \
         ORDER BY te.entry_date DESC, te.created_at DESC",
    )
    .bind(department)
    .bind(filter.technician_id)
    .bind(filter.date)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

pub async fn list_entries(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    filter: &ReviewListFilter,
) -> Result<Vec<ReviewEntryRow>, ApiError> {
    let department = supervisor_department(supervisor)?;

    let entries = sqlx::query_as::<_, ReviewEntryRow>(
        "SELECT te.*, e.employee_code AS technician_code, \
                pr.product_code, pr.product_name, o.operation_name \
         FROM time_entries te \
         JOIN employees e ON e.id = te.technician_id \
         JOIN operations o ON o.id = te.operation_id \
         JOIN processes p ON p.id = o.process_id \
         LEFT JOIN products pr ON pr.id = te.product_id \
         WHERE te.activity_type = 'work' \
           AND e.department = $1 AND p.stage = $1 \
           AND ($2::entry_status IS NULL OR te.status = $2) \
           AND ($3::uuid IS NULL OR te.technician_id = $3) \
           AND ($4::date IS NULL OR te.entry_date >= $4) \
           AND ($5::date IS NULL OR te.entry_date <= $5) \
         ORDER BY te.entry_date DESC, te.created_at DESC",
    )
    .bind(department)
    .bind(filter.status)
    .bind(filter.technician_id)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

pub async fn get_entry(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    entry_id: Uuid,
) -> Result<TimeEntry, ApiError> {
    let department = supervisor_department(supervisor)?;

    let mut conn = pool.acquire().await?;
    let entry = fetch_entry(&mut conn, entry_id).await?;
    check_department_access(&mut conn, &entry, department).await?;
    Ok(entry)
}

pub async fn approve(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    entry_id: Uuid,
    feedback: Option<String>,
) -> Result<TimeEntry, ApiError> {
    let department = supervisor_department(supervisor)?;

    let mut tx = pool.begin().await?;
    let entry = fetch_entry(&mut tx, entry_id).await?;
    check_department_access(&mut tx, &entry, department).await?;

    // Re-approval from any prior state is allowed
    let updated: TimeEntry = sqlx::query_as(
        "UPDATE time_entries SET \
           status = 'approved', supervisor_id = $2, supervisor_feedback = $3, \
           reviewed_at = $4, updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(entry.id)
    .bind(supervisor.id)
    .bind(feedback.unwrap_or_else(|| "Approved".to_string()))
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    notification_service::create(
        &mut tx,
        updated.technician_id,
        Some(updated.id),
        notification_service::KIND_WORK_ENTRY_STATUS,
        "Work Entry Approved",
        &format!("Your work entry #{} was approved by supervisor.", updated.id),
    )
    .await?;

    tx.commit().await?;
    Ok(updated)
}

/// Reject with mandatory feedback. The state transition and the technician's
/// notification commit together; the escalation check runs after the commit
/// and can never undo it.
pub async fn reject(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    entry_id: Uuid,
    feedback: &str,
) -> Result<TimeEntry, ApiError> {
    let department = supervisor_department(supervisor)?;

    let mut tx = pool.begin().await?;
    let entry = fetch_entry(&mut tx, entry_id).await?;
    check_department_access(&mut tx, &entry, department).await?;

    let (technician_code,): (String,) =
        sqlx::query_as("SELECT employee_code FROM employees WHERE id = $1")
            .bind(entry.technician_id)
            .fetch_one(&mut *tx)
            .await?;

    let updated: TimeEntry = sqlx::query_as(
        "UPDATE time_entries SET \
           status = 'rejected', supervisor_id = $2, supervisor_feedback = $3, \
           reviewed_at = $4, updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(entry.id)
    .bind(supervisor.id)
    .bind(feedback)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    notification_service::create(
        &mut tx,
        updated.technician_id,
        Some(updated.id),
        notification_service::KIND_WORK_ENTRY_STATUS,
        "Work Entry Rejected",
        &format!("Your work entry #{} was rejected: {}", updated.id, feedback),
    )
    .await?;

    tx.commit().await?;

    // Post-commit hook; logs its own failures
    escalation::on_entry_rejected(
        pool,
        EntryRejected {
            technician_id: updated.technician_id,
            technician_code,
            entry_date: updated.entry_date,
        },
    )
    .await;

    Ok(updated)
}

pub async fn cancel_approval(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    entry_id: Uuid,
    feedback: Option<String>,
) -> Result<TimeEntry, ApiError> {
    let department = supervisor_department(supervisor)?;

    let mut tx = pool.begin().await?;
    let entry = fetch_entry(&mut tx, entry_id).await?;
    check_department_access(&mut tx, &entry, department).await?;

    check_cancellable(entry.status)?;

    let updated: TimeEntry = sqlx::query_as(
        "UPDATE time_entries SET \
           status = 'pending', supervisor_feedback = $2, reviewed_at = NULL, \
           updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(entry.id)
    .bind(feedback.unwrap_or_else(|| "Approval cancelled.".to_string()))
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

#[derive(Debug, Serialize, FromRow)]
pub struct StatusCount {
    pub status: EntryStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TopTechnician {
    pub technician_id: Uuid,
    pub employee_code: String,
    pub entries_count: i64,
    pub total_output: i64,
}

#[derive(Debug, Serialize)]
pub struct SupervisorDashboard {
    pub statistics: stats::DashboardStats,
    pub pending_count: i64,
    pub entries_by_status: Vec<StatusCount>,
    pub top_technicians: Vec<TopTechnician>,
    pub generated_at: chrono::DateTime<Utc>,
}

pub async fn dashboard(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    technician_id: Option<Uuid>,
) -> Result<SupervisorDashboard, ApiError> {
    let department = supervisor_department(supervisor)?;

    let filter = StatsFilter {
        start_date,
        end_date,
        department: Some(department),
        technician_id,
        product_id: None,
    };
    let statistics = stats::dashboard_stats(pool, &filter).await?;

    let (pending_count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*)::bigint FROM time_entries te \
         JOIN employees e ON e.id = te.technician_id \
         JOIN operations o ON o.id = te.operation_id \
         JOIN processes p ON p.id = o.process_id \
         WHERE te.status = 'pending' AND te.activity_type = 'work' \
           AND e.department = $1 AND p.stage = $1",
    )
    .bind(department)
    .fetch_one(pool)
    .await?;

    let entries_by_status = sqlx::query_as::<_, StatusCount>(
        "SELECT te.status, COUNT(*)::bigint AS count \
         FROM time_entries te \
         JOIN employees e ON e.id = te.technician_id \
         JOIN operations o ON o.id = te.operation_id \
         JOIN processes p ON p.id = o.process_id \
         WHERE te.activity_type = 'work' AND e.department = $1 AND p.stage = $1 \
         GROUP BY te.status",
    )
    .bind(department)
    .fetch_all(pool)
    .await?;

    let top_technicians = sqlx::query_as::<_, TopTechnician>(
        "SELECT te.technician_id, e.employee_code, \
                COUNT(*)::bigint AS entries_count, \
                COALESCE(SUM(te.operation_count), 0)::bigint AS total_output \
         FROM time_entries te \
         JOIN employees e ON e.id = te.technician_id \
         JOIN operations o ON o.id = te.operation_id \
         JOIN processes p ON p.id = o.process_id \
         WHERE te.status = 'approved' AND te.activity_type = 'work' \
           AND e.department = $1 AND p.stage = $1 AND e.role = 'technician' \
         GROUP BY te.technician_id, e.employee_code \
         ORDER BY total_output DESC \
         LIMIT 10",
    )
    .bind(department)
    .fetch_all(pool)
    .await?;

    Ok(SupervisorDashboard {
        statistics,
        pending_count,
        entries_by_status,
        top_technicians,
        generated_at: Utc::now(),
    })
}

#[derive(Debug, Serialize)]
pub struct TechnicianPerformance {
    pub technician_id: Uuid,
    pub employee_code: String,
    pub department: Department,
    pub total_entries: i64,
    pub total_output: i64,
    pub total_time_minutes: i64,
    pub average_output_per_entry: f64,
    pub generated_at: chrono::DateTime<Utc>,
}

pub async fn technician_performance(
    pool: &PgPool,
    supervisor: &AuthEmployee,
    technician_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<TechnicianPerformance, ApiError> {
    let department = supervisor_department(supervisor)?;

    let technician: Option<(String, Option<Department>)> =
        sqlx::query_as("SELECT employee_code, department FROM employees WHERE id = $1")
            .bind(technician_id)
            .fetch_optional(pool)
            .await?;

    let (employee_code, technician_department) =
        technician.ok_or_else(|| ApiError::not_found("Technician not found"))?;

    if technician_department != Some(department) {
        return Err(ApiError::forbidden(
            "Access denied. This technician belongs to a different department.",
        ));
    }

    let (total_entries, total_output, total_time_minutes): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*)::bigint, \
                COALESCE(SUM(te.operation_count), 0)::bigint, \
                COALESCE(SUM(te.duration_minutes), 0)::bigint \
         FROM time_entries te \
         JOIN operations o ON o.id = te.operation_id \
         JOIN processes p ON p.id = o.process_id \
         WHERE te.technician_id = $1 AND te.status = 'approved' \
           AND te.activity_type = 'work' AND p.stage = $2 \
           AND ($3::date IS NULL OR te.entry_date >= $3) \
           AND ($4::date IS NULL OR te.entry_date <= $4)",
    )
    .bind(technician_id)
    .bind(department)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?;

    let average_output_per_entry = if total_entries > 0 {
        total_output as f64 / total_entries as f64
    } else {
        0.0
    };

    Ok(TechnicianPerformance {
        technician_id,
        employee_code,
        department,
        total_entries,
        total_output,
        total_time_minutes,
        average_output_per_entry,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_approval_requires_approved_state() {
        assert!(check_cancellable(EntryStatus::Approved).is_ok());
        for status in [EntryStatus::Pending, EntryStatus::Rejected] {
            let err = check_cancellable(status).unwrap_err();
            assert!(err.message().contains("Only approved entries"));
        }
    }
}
