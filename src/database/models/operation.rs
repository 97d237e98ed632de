use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::Department;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Operation {
    pub id: Uuid,
    pub process_id: Uuid,
    pub operation_name: String,
    pub operation_order: i32,
    pub description: Option<String>,
    pub minimum_time_minutes: i32,
    pub minimum_output_count: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Operation joined with its process stage, for department-access checks.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OperationWithStage {
    pub id: Uuid,
    pub process_id: Uuid,
    pub operation_name: String,
    pub minimum_time_minutes: i32,
    pub minimum_output_count: i32,
    pub stage: Department,
}
