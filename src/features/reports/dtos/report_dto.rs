use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Report, ReportStatus};

/// Parsed `create report` form fields. Latitude/longitude arrive as text
/// and parse leniently to 0.0; address defaults to an empty string.
#[derive(Debug, Clone, Validate)]
pub struct CreateReportDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// An image read out of a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Create report request body for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateReportFormDto {
    #[schema(example = "Pothole on Main Street")]
    pub title: String,
    #[schema(example = "Large pothole near the intersection")]
    pub description: String,
    #[schema(example = "Road damage")]
    pub category: String,
    #[schema(example = "12.9716")]
    pub latitude: Option<String>,
    #[schema(example = "77.5946")]
    pub longitude: Option<String>,
    #[schema(example = "Main Street, Ward 12")]
    pub address: Option<String>,
    /// Optional photo of the issue
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
}

/// Department status update request body for OpenAPI documentation.
/// The actual handler parses multipart fields directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct DepartmentUpdateFormDto {
    /// New status: "Pending", "In Progress" or "Resolved"
    #[schema(example = "In Progress")]
    pub status: Option<String>,
    /// Optional proof-of-work image
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: Option<String>,
}

/// Response DTO for a report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportDto {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub department: String,
    pub status: ReportStatus,
    pub image_url: Option<String>,
    pub proof_image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub votes: i64,
    pub last_updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            account_id: report.account_id,
            title: report.title,
            description: report.description,
            category: report.category,
            department: report.department,
            status: report.status,
            image_url: report.image_url,
            proof_image_url: report.proof_image_url,
            latitude: report.latitude,
            longitude: report.longitude,
            address: report.address,
            votes: report.votes,
            last_updated_by: report.last_updated_by,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// Response DTO for the vote endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoteResponseDto {
    pub id: Uuid,
    pub votes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    fn valid_dto() -> CreateReportDto {
        CreateReportDto {
            title: "Pothole".to_string(),
            description: "Big one".to_string(),
            category: "Road damage".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            address: String::new(),
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn missing_fields_are_named_in_the_error() {
        let mut dto = valid_dto();
        dto.title = String::new();
        dto.category = String::new();

        let err: AppError = dto.validate().unwrap_err().into();
        let AppError::Validation(message) = err else {
            panic!("expected validation error");
        };
        assert_eq!(message, "Invalid or missing fields: category, title");
    }
}
