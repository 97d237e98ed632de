use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::Claims;
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::Employee;
use crate::error::ApiError;
use crate::types::{Department, Role};

/// Acting employee, resolved from the database on every request. The token
/// only proves identity; role and department always come from the current row.
#[derive(Clone, Debug)]
pub struct AuthEmployee {
    pub id: Uuid,
    pub employee_code: String,
    pub role: Role,
    pub department: Option<Department>,
}

impl From<Employee> for AuthEmployee {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            employee_code: employee.employee_code,
            role: employee.role,
            department: employee.department,
        }
    }
}

/// JWT authentication middleware: validates the bearer token, re-resolves the
/// employee, and injects the context into request extensions.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;
    let claims = validate_jwt(&token).map_err(ApiError::unauthorized)?;

    let pool = DatabaseManager::pool().await?;
    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
        .bind(claims.sub)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    request.extensions_mut().insert(AuthEmployee::from(employee));

    Ok(next.run(request).await)
}

fn authorize(request: &Request, allowed: &[Role]) -> Result<(), ApiError> {
    let employee = request
        .extensions()
        .get::<AuthEmployee>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if allowed.contains(&employee.role) {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "Access denied. Insufficient permissions.",
        ))
    }
}

pub async fn admin_only(request: Request, next: Next) -> Result<Response, ApiError> {
    authorize(&request, &[Role::Admin])?;
    Ok(next.run(request).await)
}

pub async fn planner_or_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    authorize(&request, &[Role::Admin, Role::Planner])?;
    Ok(next.run(request).await)
}

pub async fn supervisor_or_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    authorize(&request, &[Role::Admin, Role::Supervisor])?;
    Ok(next.run(request).await)
}

pub async fn technician_or_above(request: Request, next: Next) -> Result<Response, ApiError> {
    authorize(
        &request,
        &[Role::Admin, Role::Planner, Role::Supervisor, Role::Technician],
    )?;
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid or expired token: {}", e))?;

    Ok(token_data.claims)
}
