//! Planner endpoints: master data (products, operations, job orders) and the
//! planner dashboard.

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{JobOrder, Operation, Process, Product};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::AuthEmployee;
use crate::services::stats::{self, StatsFilter};
use crate::types::Department;

const JOB_ORDER_TYPES: [&str; 3] = ["production", "maintenance", "inspection"];
const JOB_ORDER_PRIORITIES: [&str; 4] = ["low", "medium", "high", "urgent"];
const JOB_ORDER_STATUSES: [&str; 4] = ["planned", "in_progress", "completed", "cancelled"];

// ---- products ----

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product_code: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessDetail {
    #[serde(flatten)]
    pub process: Process,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub processes: Vec<ProcessDetail>,
}

/// POST /api/planner/products
///
/// Creating a product also creates its three processes (production, testing,
/// qa) in stage order, atomically.
pub async fn create_product(
    Extension(auth): Extension<AuthEmployee>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<ProductDetail> {
    let product_code = request
        .product_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Product code and product name are required"))?;
    let product_name = request
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Product code and product name are required"))?;

    let pool = DatabaseManager::pool().await?;

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM products WHERE product_code = $1")
            .bind(product_code)
            .fetch_optional(&pool)
            .await?;
    if existing.is_some() {
        return Err(ApiError::conflict(format!(
            "Product code '{}' already exists",
            product_code
        )));
    }

    let mut tx = pool.begin().await?;

    let product: Product = sqlx::query_as(
        "INSERT INTO products (id, product_code, product_name, description, status, created_by) \
         VALUES ($1, $2, $3, $4, 'active', $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(product_code)
    .bind(product_name)
    .bind(request.description.as_deref())
    .bind(auth.id)
    .fetch_one(&mut *tx)
    .await?;

    let stages = [
        (Department::Production, 1),
        (Department::Testing, 2),
        (Department::Qa, 3),
    ];
    let mut processes = Vec::with_capacity(stages.len());
    for (stage, stage_order) in stages {
        let process: Process = sqlx::query_as(
            "INSERT INTO processes (id, product_id, stage, stage_order, status) \
             VALUES ($1, $2, $3, $4, 'active') RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(product.id)
        .bind(stage)
        .bind(stage_order)
        .fetch_one(&mut *tx)
        .await?;
        processes.push(ProcessDetail {
            process,
            operations: Vec::new(),
        });
    }

    tx.commit().await?;

    Ok(ApiResponse::created(
        "Product created successfully with 3 processes (Production, Testing, QA)",
        ProductDetail { product, processes },
    ))
}

/// GET /api/planner/products
pub async fn list_products() -> ApiResult<Vec<Product>> {
    let pool = DatabaseManager::pool().await?;
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/planner/products/:id
pub async fn get_product(Path(product_id): Path<Uuid>) -> ApiResult<ProductDetail> {
    let pool = DatabaseManager::pool().await?;

    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    let process_rows = sqlx::query_as::<_, Process>(
        "SELECT * FROM processes WHERE product_id = $1 ORDER BY stage_order",
    )
    .bind(product.id)
    .fetch_all(&pool)
    .await?;

    let mut processes = Vec::with_capacity(process_rows.len());
    for process in process_rows {
        let operations = sqlx::query_as::<_, Operation>(
            "SELECT * FROM operations WHERE process_id = $1 ORDER BY operation_order",
        )
        .bind(process.id)
        .fetch_all(&pool)
        .await?;
        processes.push(ProcessDetail {
            process,
            operations,
        });
    }

    Ok(ApiResponse::success(ProductDetail { product, processes }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// PUT /api/planner/products/:id
pub async fn update_product(
    Path(product_id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<Product> {
    if let Some(status) = request.status.as_deref() {
        if !["active", "inactive"].contains(&status) {
            return Err(ApiError::bad_request("Status must be one of: active, inactive"));
        }
    }

    let pool = DatabaseManager::pool().await?;
    let product: Product = sqlx::query_as(
        "UPDATE products SET \
           product_name = COALESCE($2, product_name), \
           description = COALESCE($3, description), \
           status = COALESCE($4, status), \
           updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(product_id)
    .bind(request.product_name.as_deref())
    .bind(request.description.as_deref())
    .bind(request.status.as_deref())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::with_message("Product updated successfully", product))
}

/// DELETE /api/planner/products/:id
pub async fn delete_product(Path(product_id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Product not found"));
    }
    Ok(ApiResponse::with_message("Product deleted successfully", Value::Null))
}

// ---- processes ----

/// GET /api/planner/processes
pub async fn list_processes() -> ApiResult<Vec<ProcessDetail>> {
    let pool = DatabaseManager::pool().await?;

    let process_rows = sqlx::query_as::<_, Process>(
        "SELECT * FROM processes ORDER BY product_id, stage_order",
    )
    .fetch_all(&pool)
    .await?;

    let mut processes = Vec::with_capacity(process_rows.len());
    for process in process_rows {
        let operations = sqlx::query_as::<_, Operation>(
            "SELECT * FROM operations WHERE process_id = $1 ORDER BY operation_order",
        )
        .bind(process.id)
        .fetch_all(&pool)
        .await?;
        processes.push(ProcessDetail {
            process,
            operations,
        });
    }

    Ok(ApiResponse::success(processes))
}

/// GET /api/planner/processes/:id
pub async fn get_process(Path(process_id): Path<Uuid>) -> ApiResult<ProcessDetail> {
    let pool = DatabaseManager::pool().await?;

    let process = sqlx::query_as::<_, Process>("SELECT * FROM processes WHERE id = $1")
        .bind(process_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Process not found"))?;

    let operations = sqlx::query_as::<_, Operation>(
        "SELECT * FROM operations WHERE process_id = $1 ORDER BY operation_order",
    )
    .bind(process.id)
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(ProcessDetail {
        process,
        operations,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProcessRequest {
    pub stage_order: Option<i32>,
    pub status: Option<String>,
}

/// Validation for process updates, shared with the unit tests below.
pub fn validate_process_update(request: &UpdateProcessRequest) -> Result<(), ApiError> {
    if let Some(status) = request.status.as_deref() {
        if !["active", "inactive"].contains(&status) {
            return Err(ApiError::bad_request("Status must be one of: active, inactive"));
        }
    }
    if request.stage_order.is_some_and(|o| o <= 0) {
        return Err(ApiError::bad_request("stage_order must be a positive number"));
    }
    Ok(())
}

/// PUT /api/planner/processes/:id
///
/// The stage itself is immutable; it doubles as the owning department of
/// every operation underneath, so only ordering and status can change.
pub async fn update_process(
    Path(process_id): Path<Uuid>,
    Json(request): Json<UpdateProcessRequest>,
) -> ApiResult<Process> {
    validate_process_update(&request)?;

    let pool = DatabaseManager::pool().await?;
    let process: Process = sqlx::query_as(
        "UPDATE processes SET \
           stage_order = COALESCE($2, stage_order), \
           status = COALESCE($3, status), \
           updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(process_id)
    .bind(request.stage_order)
    .bind(request.status.as_deref())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Process not found"))?;

    Ok(ApiResponse::with_message("Process updated successfully", process))
}

// ---- operations ----

#[derive(Debug, Deserialize)]
pub struct CreateOperationRequest {
    pub process_id: Option<Uuid>,
    pub operation_name: Option<String>,
    pub description: Option<String>,
    pub minimum_time_minutes: Option<i32>,
    pub minimum_output_count: Option<i32>,
}

/// POST /api/planner/operations
pub async fn create_operation(
    Json(request): Json<CreateOperationRequest>,
) -> ApiResult<Operation> {
    let process_id = request
        .process_id
        .ok_or_else(|| ApiError::bad_request("Process ID and operation name are required"))?;
    let operation_name = request
        .operation_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Process ID and operation name are required"))?;

    if request.minimum_time_minutes.is_some_and(|m| m < 0)
        || request.minimum_output_count.is_some_and(|c| c < 0)
    {
        return Err(ApiError::bad_request(
            "minimum_time_minutes and minimum_output_count must not be negative",
        ));
    }

    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let process: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM processes WHERE id = $1")
        .bind(process_id)
        .fetch_optional(&mut *tx)
        .await?;
    if process.is_none() {
        return Err(ApiError::not_found("Process not found"));
    }

    let duplicate: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM operations WHERE process_id = $1 AND operation_name = $2",
    )
    .bind(process_id)
    .bind(operation_name)
    .fetch_optional(&mut *tx)
    .await?;
    if duplicate.is_some() {
        return Err(ApiError::conflict(format!(
            "Operation '{}' already exists for this process",
            operation_name
        )));
    }

    let (next_order,): (i32,) = sqlx::query_as(
        "SELECT COALESCE(MAX(operation_order), 0) + 1 FROM operations WHERE process_id = $1",
    )
    .bind(process_id)
    .fetch_one(&mut *tx)
    .await?;

    let operation: Operation = sqlx::query_as(
        "INSERT INTO operations \
           (id, process_id, operation_name, operation_order, description, \
            minimum_time_minutes, minimum_output_count, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'active') RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(process_id)
    .bind(operation_name)
    .bind(next_order)
    .bind(request.description.as_deref())
    .bind(request.minimum_time_minutes.unwrap_or(0))
    .bind(request.minimum_output_count.unwrap_or(0))
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(ApiResponse::created("Operation created successfully", operation))
}

/// Operation joined with its process stage and product, for listings.
#[derive(Debug, Serialize, FromRow)]
pub struct OperationListRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub operation: Operation,
    pub stage: Department,
    pub product_code: String,
    pub product_name: String,
}

/// GET /api/planner/operations
pub async fn list_operations() -> ApiResult<Vec<OperationListRow>> {
    let pool = DatabaseManager::pool().await?;
    let operations = sqlx::query_as::<_, OperationListRow>(
        "SELECT o.*, p.stage, pr.product_code, pr.product_name \
         FROM operations o \
         JOIN processes p ON p.id = o.process_id \
         JOIN products pr ON pr.id = p.product_id \
         ORDER BY pr.product_code, p.stage_order, o.operation_order",
    )
    .fetch_all(&pool)
    .await?;
    Ok(ApiResponse::success(operations))
}

#[derive(Debug, Deserialize)]
pub struct UpdateOperationRequest {
    pub operation_name: Option<String>,
    pub description: Option<String>,
    pub minimum_time_minutes: Option<i32>,
    pub minimum_output_count: Option<i32>,
    pub status: Option<String>,
}

/// PUT /api/planner/operations/:id
pub async fn update_operation(
    Path(operation_id): Path<Uuid>,
    Json(request): Json<UpdateOperationRequest>,
) -> ApiResult<Operation> {
    if request.minimum_time_minutes.is_some_and(|m| m < 0)
        || request.minimum_output_count.is_some_and(|c| c < 0)
    {
        return Err(ApiError::bad_request(
            "minimum_time_minutes and minimum_output_count must not be negative",
        ));
    }

    let pool = DatabaseManager::pool().await?;
    let operation: Operation = sqlx::query_as(
        "UPDATE operations SET \
           operation_name = COALESCE($2, operation_name), \
           description = COALESCE($3, description), \
           minimum_time_minutes = COALESCE($4, minimum_time_minutes), \
           minimum_output_count = COALESCE($5, minimum_output_count), \
           status = COALESCE($6, status), \
           updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(operation_id)
    .bind(request.operation_name.as_deref())
    .bind(request.description.as_deref())
    .bind(request.minimum_time_minutes)
    .bind(request.minimum_output_count)
    .bind(request.status.as_deref())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Operation not found"))?;

    Ok(ApiResponse::with_message("Operation updated successfully", operation))
}

/// DELETE /api/planner/operations/:id
pub async fn delete_operation(Path(operation_id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM operations WHERE id = $1")
        .bind(operation_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Operation not found"));
    }
    Ok(ApiResponse::with_message("Operation deleted successfully", Value::Null))
}

// ---- job orders ----

#[derive(Debug, Deserialize)]
pub struct CreateJobOrderRequest {
    pub order_number: Option<String>,
    pub order_type: Option<String>,
    pub product_id: Option<Uuid>,
    pub target_quantity: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

/// POST /api/planner/job-orders
pub async fn create_job_order(
    Extension(auth): Extension<AuthEmployee>,
    Json(request): Json<CreateJobOrderRequest>,
) -> ApiResult<JobOrder> {
    let (order_number, product_id, target_quantity, start_date, due_date) = match (
        request.order_number.as_deref().map(str::trim),
        request.product_id,
        request.target_quantity,
        request.start_date,
        request.due_date,
    ) {
        (Some(n), Some(p), Some(q), Some(s), Some(d)) if !n.is_empty() => (n, p, q, s, d),
        _ => {
            return Err(ApiError::bad_request(
                "Order number, product ID, target quantity, start date, and due date are required",
            ))
        }
    };

    if let Some(order_type) = request.order_type.as_deref() {
        if !JOB_ORDER_TYPES.contains(&order_type) {
            return Err(ApiError::bad_request(
                "Order type must be one of: production, maintenance, inspection",
            ));
        }
    }
    if let Some(priority) = request.priority.as_deref() {
        if !JOB_ORDER_PRIORITIES.contains(&priority) {
            return Err(ApiError::bad_request(
                "Priority must be one of: low, medium, high, urgent",
            ));
        }
    }
    if target_quantity <= 0 {
        return Err(ApiError::bad_request("Target quantity must be greater than 0"));
    }

    let pool = DatabaseManager::pool().await?;

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM job_orders WHERE order_number = $1")
            .bind(order_number)
            .fetch_optional(&pool)
            .await?;
    if existing.is_some() {
        return Err(ApiError::conflict(format!(
            "Order number '{}' already exists",
            order_number
        )));
    }

    let product: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&pool)
        .await?;
    if product.is_none() {
        return Err(ApiError::not_found(format!(
            "Product with ID {} not found",
            product_id
        )));
    }

    let job_order: JobOrder = sqlx::query_as(
        "INSERT INTO job_orders \
           (id, order_number, order_type, product_id, planner_id, target_quantity, \
            completed_quantity, start_date, due_date, status, priority, notes) \
         VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, 'planned', $9, $10) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(order_number)
    .bind(request.order_type.as_deref().unwrap_or("production"))
    .bind(product_id)
    .bind(auth.id)
    .bind(target_quantity)
    .bind(start_date)
    .bind(due_date)
    .bind(request.priority.as_deref().unwrap_or("medium"))
    .bind(request.notes.as_deref())
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::created("Job order created successfully", job_order))
}

#[derive(Debug, Deserialize, Default)]
pub struct JobOrderQuery {
    pub status: Option<String>,
}

/// GET /api/planner/job-orders
pub async fn list_job_orders(Query(query): Query<JobOrderQuery>) -> ApiResult<Vec<JobOrder>> {
    let pool = DatabaseManager::pool().await?;
    let orders = sqlx::query_as::<_, JobOrder>(
        "SELECT * FROM job_orders \
         WHERE ($1::text IS NULL OR status = $1) \
         ORDER BY created_at DESC",
    )
    .bind(query.status.as_deref())
    .fetch_all(&pool)
    .await?;
    Ok(ApiResponse::success(orders))
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobOrderRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub completed_quantity: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// PUT /api/planner/job-orders/:id
pub async fn update_job_order(
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateJobOrderRequest>,
) -> ApiResult<JobOrder> {
    if let Some(status) = request.status.as_deref() {
        if !JOB_ORDER_STATUSES.contains(&status) {
            return Err(ApiError::bad_request(
                "Status must be one of: planned, in_progress, completed, cancelled",
            ));
        }
    }
    if let Some(priority) = request.priority.as_deref() {
        if !JOB_ORDER_PRIORITIES.contains(&priority) {
            return Err(ApiError::bad_request(
                "Priority must be one of: low, medium, high, urgent",
            ));
        }
    }
    if request.completed_quantity.is_some_and(|q| q < 0) {
        return Err(ApiError::bad_request("Completed quantity must not be negative"));
    }

    let pool = DatabaseManager::pool().await?;
    let job_order: JobOrder = sqlx::query_as(
        "UPDATE job_orders SET \
           status = COALESCE($2, status), \
           priority = COALESCE($3, priority), \
           completed_quantity = COALESCE($4, completed_quantity), \
           due_date = COALESCE($5, due_date), \
           notes = COALESCE($6, notes), \
           updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(order_id)
    .bind(request.status.as_deref())
    .bind(request.priority.as_deref())
    .bind(request.completed_quantity)
    .bind(request.due_date)
    .bind(request.notes.as_deref())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Job order not found"))?;

    Ok(ApiResponse::with_message("Job order updated successfully", job_order))
}

#[derive(Debug, Serialize)]
pub struct JobOrderProgress {
    pub order_number: String,
    pub status: String,
    pub target_quantity: i32,
    pub completed_quantity: i32,
    pub remaining_quantity: i32,
    pub progress_percentage: f64,
}

/// GET /api/planner/job-orders/:id/progress
pub async fn job_order_progress(Path(order_id): Path<Uuid>) -> ApiResult<JobOrderProgress> {
    let pool = DatabaseManager::pool().await?;
    let order = sqlx::query_as::<_, JobOrder>("SELECT * FROM job_orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Job order not found"))?;

    Ok(ApiResponse::success(JobOrderProgress {
        progress_percentage: order.progress_percentage(),
        remaining_quantity: (order.target_quantity - order.completed_quantity).max(0),
        order_number: order.order_number,
        status: order.status,
        target_quantity: order.target_quantity,
        completed_quantity: order.completed_quantity,
    }))
}

// ---- dashboard ----

#[derive(Debug, Serialize, FromRow)]
pub struct JobOrderSummaryRow {
    pub status: String,
    pub count: i64,
    pub total_target: i64,
    pub total_completed: i64,
}

#[derive(Debug, Serialize)]
pub struct PlannerDashboard {
    pub statistics: stats::DashboardStats,
    pub job_orders_summary: Vec<JobOrderSummaryRow>,
    pub generated_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlannerDashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product_id: Option<Uuid>,
}

/// GET /api/planner/dashboard
pub async fn dashboard(Query(query): Query<PlannerDashboardQuery>) -> ApiResult<PlannerDashboard> {
    let pool = DatabaseManager::pool().await?;

    let filter = StatsFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        department: None,
        technician_id: None,
        product_id: query.product_id,
    };
    let statistics = stats::dashboard_stats(&pool, &filter).await?;

    let job_orders_summary = sqlx::query_as::<_, JobOrderSummaryRow>(
        "SELECT status, COUNT(*)::bigint AS count, \
                COALESCE(SUM(target_quantity), 0)::bigint AS total_target, \
                COALESCE(SUM(completed_quantity), 0)::bigint AS total_completed \
         FROM job_orders GROUP BY status",
    )
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(PlannerDashboard {
        statistics,
        job_orders_summary,
        generated_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_update_accepts_known_status_and_positive_order() {
        let request = UpdateProcessRequest {
            stage_order: Some(2),
            status: Some("inactive".into()),
        };
        assert!(validate_process_update(&request).is_ok());
    }

    #[test]
    fn process_update_rejects_unknown_status() {
        let request = UpdateProcessRequest {
            stage_order: None,
            status: Some("paused".into()),
        };
        let err = validate_process_update(&request).unwrap_err();
        assert!(err.message().contains("active, inactive"));
    }

    #[test]
    fn process_update_rejects_non_positive_stage_order() {
        for order in [0, -1] {
            let request = UpdateProcessRequest {
                stage_order: Some(order),
                status: None,
            };
            assert!(validate_process_update(&request).is_err());
        }
    }
}
