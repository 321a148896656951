use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::reports::dtos::{
    CreateReportDto, CreateReportFormDto, ImageUpload, ReportDto, VoteResponseDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::constants::MAX_IMAGE_SIZE;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a new report
///
/// Accepts multipart/form-data with:
/// - `title`, `description`, `category`: required text fields
/// - `latitude`, `longitude`: optional, default to 0
/// - `address`: optional, defaults to empty
/// - `image`: optional photo of the issue
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = CreateReportFormDto,
        content_type = "multipart/form-data",
        description = "Report form with optional image",
    ),
    responses(
        (status = 201, description = "Report created and routed", body = ApiResponse<ReportDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Authentication required"),
        (status = 502, description = "Image upload failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_report(
    user: CurrentUser,
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportDto>>)> {
    let mut title = String::new();
    let mut description = String::new();
    let mut category = String::new();
    let mut latitude = 0.0_f64;
    let mut longitude = 0.0_f64;
    let mut address = String::new();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Image too large. Maximum size is {} MB",
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                // Empty file parts happen when a form has the field but
                // no file was chosen; treat them as no image.
                if !data.is_empty() {
                    image = Some(ImageUpload {
                        data: data.to_vec(),
                        file_name,
                        content_type,
                    });
                }
            }
            "title" => title = read_text(field, "title").await?,
            "description" => description = read_text(field, "description").await?,
            "category" => category = read_text(field, "category").await?,
            "latitude" => {
                latitude = read_text(field, "latitude").await?.parse().unwrap_or(0.0);
            }
            "longitude" => {
                longitude = read_text(field, "longitude").await?.parse().unwrap_or(0.0);
            }
            "address" => address = read_text(field, "address").await?,
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let dto = CreateReportDto {
        title,
        description,
        category,
        latitude,
        longitude,
        address,
    };

    let report = service.create(&user, dto, image).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ReportDto::from(report)),
            Some("Report submitted successfully".to_string()),
            None,
        )),
    ))
}

/// List one account's reports (self or admin only)
#[utoipa::path(
    get,
    path = "/api/reports/user/{id}",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Reports for the account", body = ApiResponse<Vec<ReportDto>>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not your reports")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_user_reports(
    user: CurrentUser,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReportDto>>>> {
    let reports = service.list_by_owner(&user, id).await?;
    let dtos: Vec<ReportDto> = reports.into_iter().map(ReportDto::from).collect();
    let total = dtos.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Upvote a report
#[utoipa::path(
    post,
    path = "/api/reports/{id}/vote",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Vote recorded", body = ApiResponse<VoteResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn vote_report(
    _user: CurrentUser,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VoteResponseDto>>> {
    let votes = service.vote(id).await?;
    Ok(Json(ApiResponse::success(
        Some(VoteResponseDto { id, votes }),
        Some("Vote recorded".to_string()),
        None,
    )))
}

/// Remove the image from a report (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/reports/{id}/image",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Image removed", body = ApiResponse<ReportDto>),
        (status = 400, description = "Report has no image"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not your report"),
        (status = 404, description = "Report not found"),
        (status = 502, description = "Storage delete failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_report_image(
    user: CurrentUser,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportDto>>> {
    let report = service.detach_image(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(ReportDto::from(report)),
        Some("Image removed".to_string()),
        None,
    )))
}

/// Delete a report (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted", body = ApiResponse<Object>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not your report"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_report(
    user: CurrentUser,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}
