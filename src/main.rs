use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod services;
mod timeclock;
mod types;

use middleware::auth::{
    admin_only, jwt_auth_middleware, planner_or_admin, supervisor_or_admin, technician_or_above,
};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopfloor_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = crate::config::config();
    tracing::info!("Starting shopfloor API in {:?} mode", config.environment);

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    database::manager::DatabaseManager::close().await;
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/login", post(handlers::auth::login))
        // Protected API
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn protected_routes() -> Router {
    Router::new()
        .route("/api/auth/whoami", get(handlers::auth::whoami))
        .nest("/api/technician", technician_routes())
        .nest("/api/supervisor", supervisor_routes())
        .nest("/api/planner", planner_routes())
        .nest("/api/admin", admin_routes())
        .layer(from_fn(jwt_auth_middleware))
}

fn technician_routes() -> Router {
    use handlers::technician;

    Router::new()
        .route(
            "/work-entries",
            post(technician::create_entry).get(technician::list_entries),
        )
        .route("/work-entries/bulk", post(technician::create_entries_bulk))
        .route(
            "/work-entries/:id",
            get(technician::get_entry)
                .put(technician::update_entry)
                .delete(technician::delete_entry),
        )
        .route("/summary", get(technician::summary))
        .merge(notification_routes())
        .layer(from_fn(technician_or_above))
}

fn supervisor_routes() -> Router {
    use handlers::supervisor;

    Router::new()
        .route("/entries/pending", get(supervisor::pending_entries))
        .route("/entries", get(supervisor::list_entries))
        .route("/entries/:id", get(supervisor::get_entry))
        .route("/entries/:id/approve", post(supervisor::approve_entry))
        .route("/entries/:id/reject", post(supervisor::reject_entry))
        .route(
            "/entries/:id/cancel-approval",
            post(supervisor::cancel_approval),
        )
        .route("/dashboard", get(supervisor::dashboard))
        .route(
            "/technicians/:id/performance",
            get(supervisor::technician_performance),
        )
        .layer(from_fn(supervisor_or_admin))
}

fn planner_routes() -> Router {
    use handlers::planner;

    Router::new()
        // Product creation stays admin-only inside the planner group
        .route(
            "/products",
            post(planner::create_product)
                .route_layer(from_fn(admin_only))
                .get(planner::list_products),
        )
        .route(
            "/products/:id",
            get(planner::get_product)
                .put(planner::update_product)
                .delete(planner::delete_product),
        )
        .route("/processes", get(planner::list_processes))
        .route(
            "/processes/:id",
            get(planner::get_process).put(planner::update_process),
        )
        .route(
            "/operations",
            post(planner::create_operation).get(planner::list_operations),
        )
        .route(
            "/operations/:id",
            put(planner::update_operation).delete(planner::delete_operation),
        )
        .route(
            "/job-orders",
            post(planner::create_job_order).get(planner::list_job_orders),
        )
        .route("/job-orders/:id", put(planner::update_job_order))
        .route("/job-orders/:id/progress", get(planner::job_order_progress))
        .route("/dashboard", get(planner::dashboard))
        .merge(notification_routes())
        .layer(from_fn(planner_or_admin))
}

fn notification_routes() -> Router {
    use handlers::notifications;

    Router::new()
        .route("/notifications", get(notifications::list))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/:id/read", post(notifications::mark_read))
        .route("/notifications/read-all", post(notifications::mark_all_read))
}

fn admin_routes() -> Router {
    use handlers::admin;

    Router::new()
        .route("/generate-password", get(admin::generate_password_endpoint))
        .route(
            "/employees",
            post(admin::create_employee).get(admin::list_employees),
        )
        .route(
            "/employees/:id",
            get(admin::get_employee)
                .put(admin::update_employee)
                .delete(admin::delete_employee),
        )
        .route(
            "/employees/:id/reset-password",
            post(admin::reset_password),
        )
        .route("/stats", get(admin::system_stats))
        .layer(from_fn(admin_only))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Shopfloor API",
        "version": version,
        "description": "Factory-floor time tracking: technicians log work, supervisors review, planners watch",
        "endpoints": {
            "login": "POST /auth/login (public)",
            "technician": "/api/technician/* (technician and above)",
            "supervisor": "/api/supervisor/* (supervisor or admin)",
            "planner": "/api/planner/* (planner or admin)",
            "admin": "/api/admin/* (admin only)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
