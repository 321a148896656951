use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::{AnalyticsDto, ReportFilterQuery, UpdateReportDto};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::reports::dtos::ReportDto;
use crate::shared::types::{ApiResponse, Meta};

/// List all reports with optional status/category filters (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    tag = "admin",
    params(ReportFilterQuery),
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<ReportDto>>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_all_reports(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(filter): Query<ReportFilterQuery>,
) -> Result<Json<ApiResponse<Vec<ReportDto>>>> {
    let reports = service.list_reports(filter.status, filter.category).await?;
    let dtos: Vec<ReportDto> = reports.into_iter().map(ReportDto::from).collect();
    let total = dtos.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Update a report's status or remove its image (admin only)
///
/// Admins cannot touch a report that is still Pending; a department has
/// to act on it first.
#[utoipa::path(
    patch,
    path = "/api/admin/report/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required or report still Pending"),
        (status = 404, description = "Report not found"),
        (status = 502, description = "Storage delete failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_report(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportDto>>> {
    let report = service.update_report(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ReportDto::from(report)),
        Some("Report updated".to_string()),
        None,
    )))
}

/// Report analytics (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = "admin",
    responses(
        (status = 200, description = "Report analytics", body = ApiResponse<AnalyticsDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn analytics(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<AnalyticsDto>>> {
    let analytics = service.analytics().await?;
    Ok(Json(ApiResponse::success(Some(analytics), None, None)))
}
