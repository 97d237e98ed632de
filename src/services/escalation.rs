//! Consecutive-rejection escalation.
//!
//! Rejections accumulate silently per technician; once rejections land on
//! three consecutive calendar days, every planner gets a notification. The
//! check runs as a post-commit hook of the rejection - it can never fail or
//! roll back the rejection itself.

use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::notification_service;

/// How far back from the triggering rejection we look for a pattern. A streak
/// older than this window will not re-fire. Bounded on purpose; see DESIGN.md.
pub const LOOKBACK_DAYS: i64 = 14;

/// Event emitted after a rejection has been committed.
#[derive(Debug, Clone)]
pub struct EntryRejected {
    pub technician_id: Uuid,
    pub technician_code: String,
    pub entry_date: NaiveDate,
}

/// Scan a sorted set of distinct rejection dates for the first run of three
/// consecutive calendar days, oldest first. Calendar-day arithmetic: a gap of
/// even one day breaks the streak.
pub fn consecutive_rejection_run(dates: &[NaiveDate]) -> Option<[NaiveDate; 3]> {
    if dates.len() < 3 {
        return None;
    }
    for window in dates.windows(3) {
        let (d1, d2, d3) = (window[0], window[1], window[2]);
        if d2 == d1 + Duration::days(1) && d3 == d2 + Duration::days(1) {
            return Some([d1, d2, d3]);
        }
    }
    None
}

/// Post-commit hook for rejections. Failures are logged and swallowed so the
/// already-committed rejection stays reported as successful.
pub async fn on_entry_rejected(pool: &PgPool, event: EntryRejected) {
    if let Err(e) = detect_and_notify(pool, &event).await {
        tracing::error!(
            technician = %event.technician_code,
            "Error checking consecutive rejections or notifying planners: {}",
            e
        );
    }
}

async fn detect_and_notify(pool: &PgPool, event: &EntryRejected) -> Result<(), sqlx::Error> {
    let window_start = event.entry_date - Duration::days(LOOKBACK_DAYS);

    // Distinct dates: several rejections on the same day count once
    let rows: Vec<(NaiveDate,)> = sqlx::query_as(
        "SELECT DISTINCT entry_date FROM time_entries \
         WHERE technician_id = $1 AND status = 'rejected' \
           AND entry_date BETWEEN $2 AND $3 \
         ORDER BY entry_date",
    )
    .bind(event.technician_id)
    .bind(window_start)
    .bind(event.entry_date)
    .fetch_all(pool)
    .await?;

    let dates: Vec<NaiveDate> = rows.into_iter().map(|(d,)| d).collect();
    let Some(run) = consecutive_rejection_run(&dates) else {
        return Ok(());
    };

    let planners: Vec<(Uuid,)> =
        sqlx::query_as("SELECT id FROM employees WHERE role = 'planner'")
            .fetch_all(pool)
            .await?;

    if planners.is_empty() {
        tracing::warn!("No planners found to notify about consecutive rejections");
        return Ok(());
    }

    let formatted_dates = run
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!(
        "Technician {} (ID: {}) has rejected work entries on 3 consecutive days: {}. Please review.",
        event.technician_code, event.technician_id, formatted_dates
    );

    let mut conn = pool.acquire().await?;
    for (planner_id,) in &planners {
        notification_service::create(
            &mut conn,
            *planner_id,
            None,
            notification_service::KIND_ESCALATION,
            "Consecutive Rejection Alert",
            &message,
        )
        .await?;
    }

    tracing::info!(
        technician = %event.technician_code,
        planners = planners.len(),
        dates = %formatted_dates,
        "Sent consecutive rejection notifications"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn three_consecutive_days_are_detected() {
        let dates = [d("2024-01-01"), d("2024-01-02"), d("2024-01-03")];
        assert_eq!(
            consecutive_rejection_run(&dates),
            Some([d("2024-01-01"), d("2024-01-02"), d("2024-01-03")])
        );
    }

    #[test]
    fn a_gap_breaks_the_streak() {
        // 01, 03, 04: no run even after a third rejection
        let dates = [d("2024-01-01"), d("2024-01-03"), d("2024-01-04")];
        assert_eq!(consecutive_rejection_run(&dates), None);
    }

    #[test]
    fn fewer_than_three_days_never_match() {
        assert_eq!(consecutive_rejection_run(&[]), None);
        assert_eq!(consecutive_rejection_run(&[d("2024-01-01")]), None);
        assert_eq!(
            consecutive_rejection_run(&[d("2024-01-01"), d("2024-01-02")]),
            None
        );
    }

    #[test]
    fn first_oldest_run_wins() {
        let dates = [
            d("2024-01-01"),
            d("2024-01-02"),
            d("2024-01-03"),
            d("2024-01-05"),
            d("2024-01-06"),
            d("2024-01-07"),
        ];
        assert_eq!(
            consecutive_rejection_run(&dates),
            Some([d("2024-01-01"), d("2024-01-02"), d("2024-01-03")])
        );
    }

    #[test]
    fn run_across_month_boundary() {
        let dates = [d("2024-01-30"), d("2024-01-31"), d("2024-02-01")];
        assert!(consecutive_rejection_run(&dates).is_some());
    }

    #[test]
    fn run_may_start_mid_sequence() {
        let dates = [
            d("2024-01-01"),
            d("2024-01-04"),
            d("2024-01-05"),
            d("2024-01-06"),
        ];
        assert_eq!(
            consecutive_rejection_run(&dates),
            Some([d("2024-01-04"), d("2024-01-05"), d("2024-01-06")])
        );
    }
}
