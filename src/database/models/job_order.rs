use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobOrder {
    pub id: Uuid,
    pub order_number: String,
    pub order_type: String,
    pub product_id: Uuid,
    pub planner_id: Uuid,
    pub target_quantity: i32,
    pub completed_quantity: i32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub priority: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobOrder {
    /// Completion ratio in percent; 0 when the target is 0.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_quantity <= 0 {
            return 0.0;
        }
        (self.completed_quantity as f64 / self.target_quantity as f64) * 100.0
    }
}
