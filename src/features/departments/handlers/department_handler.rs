use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::departments::dtos::DepartmentDto;
use crate::features::departments::services::DepartmentService;
use crate::shared::types::ApiResponse;

/// List the department directory
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "List of departments", body = ApiResponse<Vec<DepartmentDto>>),
    ),
    tag = "departments"
)]
pub async fn list_departments(
    State(service): State<Arc<DepartmentService>>,
) -> Result<Json<ApiResponse<Vec<DepartmentDto>>>> {
    let departments = service.list().await?;
    Ok(Json(ApiResponse::success(Some(departments), None, None)))
}
