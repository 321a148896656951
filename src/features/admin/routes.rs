use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create routes for the admin surface.
///
/// All routes require authentication; the admin role check happens in
/// the handlers via the RequireAdmin guard.
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/admin/reports", get(handlers::list_all_reports))
        .route("/api/admin/report/{id}", patch(handlers::update_report))
        .route("/api/admin/analytics", get(handlers::analytics))
        .with_state(service)
}
