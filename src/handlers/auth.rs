//! Login and identity endpoints.

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{generate_jwt, verify_password, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::models::Employee;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::AuthEmployee;
use crate::types::{Department, Role};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub employee_code: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeInfo {
    pub id: Uuid,
    pub employee_code: String,
    pub role: Role,
    pub department: Option<Department>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee: EmployeeInfo,
}

/// POST /auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    let employee_code = request
        .employee_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Employee code and password are required"))?;
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Employee code and password are required"))?;

    let pool = DatabaseManager::pool().await?;
    let employee =
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_code = $1")
            .bind(employee_code)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(password, &employee.password_salt, &employee.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = generate_jwt(Claims::new(employee.id, employee.role))
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    tracing::info!(employee = %employee.employee_code, role = %employee.role, "Login successful");

    Ok(ApiResponse::with_message(
        "Login successful",
        LoginResponse {
            token,
            employee: EmployeeInfo {
                id: employee.id,
                employee_code: employee.employee_code,
                role: employee.role,
                department: employee.department,
            },
        },
    ))
}

/// GET /api/auth/whoami
pub async fn whoami(Extension(auth): Extension<AuthEmployee>) -> ApiResult<EmployeeInfo> {
    Ok(ApiResponse::success(EmployeeInfo {
        id: auth.id,
        employee_code: auth.employee_code,
        role: auth.role,
        department: auth.department,
    }))
}
