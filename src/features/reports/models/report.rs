use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Report lifecycle status.
///
/// There is no enforced transition order between the three values; the
/// role gate in the status update paths is the only restriction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    Pending,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ReportStatus::Pending),
            "In Progress" => Ok(ReportStatus::InProgress),
            "Resolved" => Ok(ReportStatus::Resolved),
            other => Err(format!("'{}' is not a valid report status", other)),
        }
    }
}

/// Database model for a report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Routing result, written once at creation and immutable afterward.
    pub department: String,
    pub status: ReportStatus,
    pub image_url: Option<String>,
    /// Storage deletion handle for the citizen image.
    pub image_key: Option<String>,
    pub proof_image_url: Option<String>,
    /// Storage deletion handle for the department proof image.
    pub proof_image_key: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub votes: i64,
    pub last_updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ReportStatus::Pending,
            ReportStatus::InProgress,
            ReportStatus::Resolved,
        ] {
            assert_eq!(ReportStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(ReportStatus::from_str("Closed").is_err());
        assert!(ReportStatus::from_str("pending").is_err());
    }

    #[test]
    fn status_serializes_with_display_labels() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, r#""In Progress""#);
    }
}
