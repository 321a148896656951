use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::ReportStatus;

/// Admin report update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReportDto {
    /// New status: "Pending", "In Progress" or "Resolved"
    pub status: Option<ReportStatus>,
    /// Remove the citizen image and release its storage object
    pub remove_image: Option<bool>,
}

/// Query filters for the admin report list. Both filters are exact-match.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportFilterQuery {
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
}

/// One category with its report count
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountDto {
    pub category: String,
    pub count: i64,
}

/// Platform-wide report analytics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsDto {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
    /// Categories sorted by report count, descending
    pub by_category: Vec<CategoryCountDto>,
}
