//! Admin endpoints: employee account management and system-wide statistics.
//!
//! Role and department strings are normalized here, at the boundary; past
//! this point the closed enums are the only representation.

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::{generate_password, hash_password};
use crate::database::manager::DatabaseManager;
use crate::database::models::Employee;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::AuthEmployee;
use crate::types::{Department, Role};

const GENERATED_PASSWORD_LENGTH: usize = 12;

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    Role::parse(raw).ok_or_else(|| {
        ApiError::bad_request("Role must be one of: admin, planner, supervisor, technician")
    })
}

fn parse_department(raw: &str) -> Result<Department, ApiError> {
    Department::parse(raw).ok_or_else(|| {
        ApiError::bad_request("Department must be one of: management, production, testing, qa")
    })
}

/// An admin can never remove their own account.
fn check_not_self(auth_id: Uuid, target_id: Uuid) -> Result<(), ApiError> {
    if auth_id == target_id {
        Err(ApiError::bad_request("You cannot delete your own account"))
    } else {
        Ok(())
    }
}

/// Admins and planners sit above departments; supervisors and technicians
/// must belong to one.
fn resolve_department(
    role: Role,
    department: Option<&str>,
) -> Result<Option<Department>, ApiError> {
    if role.requires_department() {
        let raw = department.ok_or_else(|| {
            ApiError::bad_request(format!("A department is required for the {} role", role))
        })?;
        Ok(Some(parse_department(raw)?))
    } else {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub employee_code: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedEmployee {
    #[serde(flatten)]
    pub employee: Employee,
    /// Present only when the password was generated server-side. Shown once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_password: Option<String>,
}

/// POST /api/admin/employees
pub async fn create_employee(Json(request): Json<CreateEmployeeRequest>) -> ApiResult<CreatedEmployee> {
    let employee_code = request
        .employee_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Employee code and role are required"))?;
    let role = parse_role(
        request
            .role
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("Employee code and role are required"))?,
    )?;
    let department = resolve_department(role, request.department.as_deref())?;

    let generated = request.password.is_none();
    let password = request
        .password
        .clone()
        .unwrap_or_else(|| generate_password(GENERATED_PASSWORD_LENGTH));

    let salt = Uuid::new_v4().to_string();
    let hash = hash_password(&password, &salt);

    let pool = DatabaseManager::pool().await?;
    let employee: Employee = sqlx::query_as(
        "INSERT INTO employees (id, employee_code, password_hash, password_salt, role, department) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(employee_code)
    .bind(&hash)
    .bind(&salt)
    .bind(role)
    .bind(department)
    .fetch_one(&pool)
    .await?;

    tracing::info!(employee = %employee.employee_code, role = %role, "Employee created");

    Ok(ApiResponse::created(
        "Employee created successfully",
        CreatedEmployee {
            employee,
            generated_password: generated.then_some(password),
        },
    ))
}

#[derive(Debug, Deserialize, Default)]
pub struct EmployeeQuery {
    pub role: Option<Role>,
    pub department: Option<Department>,
}

/// GET /api/admin/employees
pub async fn list_employees(Query(query): Query<EmployeeQuery>) -> ApiResult<Vec<Employee>> {
    let pool = DatabaseManager::pool().await?;
    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employees \
         WHERE ($1::role IS NULL OR role = $1) \
           AND ($2::department IS NULL OR department = $2) \
         ORDER BY created_at DESC",
    )
    .bind(query.role)
    .bind(query.department)
    .fetch_all(&pool)
    .await?;
    Ok(ApiResponse::success(employees))
}

/// GET /api/admin/employees/:id
pub async fn get_employee(Path(employee_id): Path<Uuid>) -> ApiResult<Employee> {
    let pool = DatabaseManager::pool().await?;
    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
        .bind(employee_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;
    Ok(ApiResponse::success(employee))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub employee_code: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// PUT /api/admin/employees/:id
pub async fn update_employee(
    Path(employee_id): Path<Uuid>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> ApiResult<Employee> {
    let pool = DatabaseManager::pool().await?;

    let current = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
        .bind(employee_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    let role = match request.role.as_deref() {
        Some(raw) => parse_role(raw)?,
        None => current.role,
    };

    // Department follows the target role: required for supervisor/technician,
    // forced to NULL for admin/planner.
    let department = if role.requires_department() {
        match request.department.as_deref() {
            Some(raw) => Some(parse_department(raw)?),
            None => match current.department {
                Some(dept) => Some(dept),
                None => {
                    return Err(ApiError::bad_request(format!(
                        "A department is required when changing role to {}",
                        role
                    )))
                }
            },
        }
    } else {
        None
    };

    let employee_code = request
        .employee_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(&current.employee_code);

    let employee: Employee = sqlx::query_as(
        "UPDATE employees SET employee_code = $2, role = $3, department = $4, updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(employee_id)
    .bind(employee_code)
    .bind(role)
    .bind(department)
    .fetch_one(&pool)
    .await?;

    Ok(ApiResponse::with_message("Employee updated successfully", employee))
}

/// DELETE /api/admin/employees/:id
pub async fn delete_employee(
    Extension(auth): Extension<AuthEmployee>,
    Path(employee_id): Path<Uuid>,
) -> ApiResult<Value> {
    check_not_self(auth.id, employee_id)?;

    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(employee_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee not found"));
    }

    Ok(ApiResponse::with_message("Employee deleted successfully", Value::Null))
}

#[derive(Debug, Deserialize, Default)]
pub struct ResetPasswordRequest {
    pub new_password: Option<String>,
}

/// POST /api/admin/employees/:id/reset-password
pub async fn reset_password(
    Path(employee_id): Path<Uuid>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Value> {
    let password = request
        .new_password
        .unwrap_or_else(|| generate_password(GENERATED_PASSWORD_LENGTH));
    let salt = Uuid::new_v4().to_string();
    let hash = hash_password(&password, &salt);

    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query(
        "UPDATE employees SET password_hash = $2, password_salt = $3, updated_at = now() \
         WHERE id = $1",
    )
    .bind(employee_id)
    .bind(&hash)
    .bind(&salt)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee not found"));
    }

    Ok(ApiResponse::with_message(
        "Password reset successfully",
        serde_json::json!({ "new_password": password }),
    ))
}

/// GET /api/admin/generate-password
pub async fn generate_password_endpoint() -> ApiResult<Value> {
    Ok(ApiResponse::success(serde_json::json!({
        "password": generate_password(GENERATED_PASSWORD_LENGTH)
    })))
}

#[derive(Debug, Serialize, FromRow)]
pub struct RoleCount {
    pub role: Role,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SystemStats {
    pub total_employees: i64,
    pub total_products: i64,
    pub total_operations: i64,
    pub total_entries: i64,
    pub pending_entries: i64,
    pub approved_entries: i64,
    pub rejected_entries: i64,
    pub total_job_orders: i64,
    pub employees_by_role: Vec<RoleCount>,
    pub generated_at: chrono::DateTime<Utc>,
}

/// GET /api/admin/stats
pub async fn system_stats() -> ApiResult<SystemStats> {
    let pool = DatabaseManager::pool().await?;

    let (total_employees, total_products, total_operations, total_job_orders): (i64, i64, i64, i64) =
        sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM employees)::bigint, \
                    (SELECT COUNT(*) FROM products)::bigint, \
                    (SELECT COUNT(*) FROM operations)::bigint, \
                    (SELECT COUNT(*) FROM job_orders)::bigint",
        )
        .fetch_one(&pool)
        .await?;

    let (total_entries, pending_entries, approved_entries, rejected_entries): (i64, i64, i64, i64) =
        sqlx::query_as(
            "SELECT COUNT(*)::bigint, \
                    COUNT(*) FILTER (WHERE status = 'pending')::bigint, \
                    COUNT(*) FILTER (WHERE status = 'approved')::bigint, \
                    COUNT(*) FILTER (WHERE status = 'rejected')::bigint \
             FROM time_entries",
        )
        .fetch_one(&pool)
        .await?;

    let employees_by_role = sqlx::query_as::<_, RoleCount>(
        "SELECT role, COUNT(*)::bigint AS count FROM employees GROUP BY role",
    )
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(SystemStats {
        total_employees,
        total_products,
        total_operations,
        total_entries,
        pending_entries,
        approved_entries,
        rejected_entries,
        total_job_orders,
        employees_by_role,
        generated_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_deletion_is_refused() {
        let me = Uuid::new_v4();
        let err = check_not_self(me, me).unwrap_err();
        assert!(err.message().contains("your own account"));
    }

    #[test]
    fn deleting_another_employee_is_allowed() {
        assert!(check_not_self(Uuid::new_v4(), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn supervisor_and_technician_require_a_department() {
        for role in [Role::Supervisor, Role::Technician] {
            assert!(resolve_department(role, None).is_err());
            assert_eq!(
                resolve_department(role, Some("production")).unwrap(),
                Some(Department::Production)
            );
        }
    }

    #[test]
    fn admin_and_planner_never_carry_a_department() {
        for role in [Role::Admin, Role::Planner] {
            assert_eq!(resolve_department(role, None).unwrap(), None);
            // A submitted department is ignored for these roles
            assert_eq!(resolve_department(role, Some("qa")).unwrap(), None);
        }
    }

    #[test]
    fn unknown_department_is_rejected() {
        let err = resolve_department(Role::Technician, Some("warehouse")).unwrap_err();
        assert!(err.message().contains("management, production, testing, qa"));
    }
}
