use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::Department;

/// A manufacturing stage of a product. `stage` doubles as the department that
/// owns every operation underneath it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Process {
    pub id: Uuid,
    pub product_id: Uuid,
    pub stage: Department,
    pub stage_order: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
