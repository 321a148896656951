use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::RequireDepartment;
use crate::features::reports::dtos::{DepartmentUpdateFormDto, ImageUpload, ReportDto};
use crate::features::reports::models::ReportStatus;
use crate::features::reports::services::ReportService;
use crate::shared::constants::MAX_IMAGE_SIZE;
use crate::shared::types::{ApiResponse, Meta};

/// List reports routed to a department
///
/// The path segment is the department account's display name; the word
/// "department" is stripped before matching against routed names.
#[utoipa::path(
    get,
    path = "/api/department-reports/{name}",
    tag = "department-reports",
    params(("name" = String, Path, description = "Department display name")),
    responses(
        (status = 200, description = "Reports for the department", body = ApiResponse<Vec<ReportDto>>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Department access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_department_reports(
    RequireDepartment(_user): RequireDepartment,
    State(service): State<Arc<ReportService>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReportDto>>>> {
    let reports = service.list_by_department(&name).await?;
    let dtos: Vec<ReportDto> = reports.into_iter().map(ReportDto::from).collect();
    let total = dtos.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Update a report's status and attach a proof image
///
/// Accepts multipart/form-data with an optional `status` text field and
/// an optional `file` image part. The caller's department name must
/// match the report's routed department.
#[utoipa::path(
    patch,
    path = "/api/department-reports/{id}",
    tag = "department-reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body(
        content = DepartmentUpdateFormDto,
        content_type = "multipart/form-data",
        description = "Optional status and proof image",
    ),
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportDto>),
        (status = 400, description = "Invalid status value"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not assigned to this department"),
        (status = 404, description = "Report not found"),
        (status = 502, description = "Proof upload failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_department_report(
    RequireDepartment(user): RequireDepartment,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ReportDto>>> {
    let mut status: Option<ReportStatus> = None;
    let mut proof: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "status" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read status field: {}", e))
                })?;
                if !text.is_empty() {
                    status = Some(
                        ReportStatus::from_str(&text).map_err(AppError::Validation)?,
                    );
                }
            }
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read proof image: {}", e))
                })?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Image too large. Maximum size is {} MB",
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                if !data.is_empty() {
                    proof = Some(ImageUpload {
                        data: data.to_vec(),
                        file_name,
                        content_type,
                    });
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let report = service.department_update(&user, id, status, proof).await?;
    Ok(Json(ApiResponse::success(
        Some(ReportDto::from(report)),
        Some("Report updated".to_string()),
        None,
    )))
}
