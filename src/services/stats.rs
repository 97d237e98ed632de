//! Aggregate statistics over approved work entries.
//!
//! All figures are computed on read from the entries themselves; nothing is
//! incrementally maintained. Only approved `work` entries count.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::Department;

/// Nominal shift length used by the utilization metric.
pub const WORKDAY_MINUTES: i64 = 480;

#[derive(Debug, Default, Clone)]
pub struct StatsFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department: Option<Department>,
    pub technician_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

/// One approved work entry joined with its operation's targets.
#[derive(Debug, Clone, FromRow)]
pub struct WorkEntryStatRow {
    pub technician_id: Uuid,
    pub entry_date: NaiveDate,
    pub duration_minutes: i32,
    pub operation_count: Option<i32>,
    pub minimum_time_minutes: i32,
    pub minimum_output_count: i32,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_entries: i64,
    pub total_output: i64,
    pub total_time_minutes: i64,
    pub workdays: i64,
    pub productivity_percent: f64,
    pub efficiency_percent: f64,
    pub utilization_percent: f64,
}

fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Actual output against the operation's target output.
pub fn productivity(rows: &[WorkEntryStatRow]) -> f64 {
    let actual: i64 = rows.iter().map(|r| r.operation_count.unwrap_or(0) as i64).sum();
    let target: i64 = rows.iter().map(|r| r.minimum_output_count as i64).sum();
    percent(actual as f64, target as f64)
}

/// Standard time earned against time actually spent. An entry that produces
/// `n` units at `m` minutes per unit earns `n * m` standard minutes.
pub fn efficiency(rows: &[WorkEntryStatRow]) -> f64 {
    let earned: i64 = rows
        .iter()
        .map(|r| r.minimum_time_minutes as i64 * r.operation_count.unwrap_or(0) as i64)
        .sum();
    let spent: i64 = rows.iter().map(|r| r.duration_minutes as i64).sum();
    percent(earned as f64, spent as f64)
}

/// Logged time against available time. A workday is a distinct
/// (technician, date) pair among the rows; each contributes one nominal shift.
pub fn utilization(rows: &[WorkEntryStatRow]) -> f64 {
    let spent: i64 = rows.iter().map(|r| r.duration_minutes as i64).sum();
    let workdays = count_workdays(rows);
    percent(spent as f64, (workdays * WORKDAY_MINUTES) as f64)
}

pub fn count_workdays(rows: &[WorkEntryStatRow]) -> i64 {
    rows.iter()
        .map(|r| (r.technician_id, r.entry_date))
        .collect::<HashSet<_>>()
        .len() as i64
}

pub async fn fetch_stat_rows(
    pool: &PgPool,
    filter: &StatsFilter,
) -> Result<Vec<WorkEntryStatRow>, ApiError> {
    let rows = sqlx::query_as::<_, WorkEntryStatRow>(
        "SELECT te.technician_id, te.entry_date, te.duration_minutes, te.operation_count, \
                o.minimum_time_minutes, o.minimum_output_count \
         FROM time_entries te \
         JOIN employees e ON e.id = te.technician_id \
         JOIN operations o ON o.id = te.operation_id \
         JOIN processes p ON p.id = o.process_id \
         WHERE te.status = 'approved' AND te.activity_type = 'work' \
           AND ($1::date IS NULL OR te.entry_date >= $1) \
           AND ($2::date IS NULL OR te.entry_date <= $2) \
           AND ($3::department IS NULL OR (e.department = $3 AND p.stage = $3)) \
           AND ($4::uuid IS NULL OR te.technician_id = $4) \
           AND ($5::uuid IS NULL OR te.product_id = $5)",
    )
    .bind(filter.start_date)
    .bind(filter.end_date)
    .bind(filter.department)
    .bind(filter.technician_id)
    .bind(filter.product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn dashboard_stats(pool: &PgPool, filter: &StatsFilter) -> Result<DashboardStats, ApiError> {
    let rows = fetch_stat_rows(pool, filter).await?;
    Ok(summarize(&rows))
}

pub fn summarize(rows: &[WorkEntryStatRow]) -> DashboardStats {
    DashboardStats {
        total_entries: rows.len() as i64,
        total_output: rows.iter().map(|r| r.operation_count.unwrap_or(0) as i64).sum(),
        total_time_minutes: rows.iter().map(|r| r.duration_minutes as i64).sum(),
        workdays: count_workdays(rows),
        productivity_percent: productivity(rows),
        efficiency_percent: efficiency(rows),
        utilization_percent: utilization(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        technician: Uuid,
        date: &str,
        duration: i32,
        count: i32,
        min_time: i32,
        min_output: i32,
    ) -> WorkEntryStatRow {
        WorkEntryStatRow {
            technician_id: technician,
            entry_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            duration_minutes: duration,
            operation_count: Some(count),
            minimum_time_minutes: min_time,
            minimum_output_count: min_output,
        }
    }

    #[test]
    fn productivity_is_actual_over_target() {
        let t = Uuid::new_v4();
        let rows = vec![
            row(t, "2024-03-01", 60, 12, 5, 10),
            row(t, "2024-03-01", 120, 8, 5, 10),
        ];
        // 20 produced against 20 targeted
        assert_eq!(productivity(&rows), 100.0);
    }

    #[test]
    fn efficiency_weights_output_by_standard_time() {
        let t = Uuid::new_v4();
        // earned 10 * 6 = 60 standard minutes in 120 actual minutes
        let rows = vec![row(t, "2024-03-01", 120, 10, 6, 10)];
        assert_eq!(efficiency(&rows), 50.0);
    }

    #[test]
    fn utilization_counts_distinct_technician_days() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let rows = vec![
            row(t1, "2024-03-01", 240, 1, 1, 1),
            row(t1, "2024-03-01", 240, 1, 1, 1), // same day, same workday
            row(t2, "2024-03-01", 480, 1, 1, 1),
        ];
        assert_eq!(count_workdays(&rows), 2);
        // 960 logged over 2 * 480 available
        assert_eq!(utilization(&rows), 100.0);
    }

    #[test]
    fn empty_input_yields_zero_not_nan() {
        assert_eq!(productivity(&[]), 0.0);
        assert_eq!(efficiency(&[]), 0.0);
        assert_eq!(utilization(&[]), 0.0);
    }

    #[test]
    fn missing_operation_count_counts_as_zero_output() {
        let t = Uuid::new_v4();
        let mut r = row(t, "2024-03-01", 60, 0, 5, 10);
        r.operation_count = None;
        assert_eq!(productivity(&[r]), 0.0);
    }

    #[test]
    fn summarize_reports_totals() {
        let t = Uuid::new_v4();
        let rows = vec![
            row(t, "2024-03-01", 60, 12, 5, 10),
            row(t, "2024-03-02", 90, 6, 5, 10),
        ];
        let s = summarize(&rows);
        assert_eq!(s.total_entries, 2);
        assert_eq!(s.total_output, 18);
        assert_eq!(s.total_time_minutes, 150);
        assert_eq!(s.workdays, 2);
        assert_eq!(s.productivity_percent, 90.0);
    }
}
