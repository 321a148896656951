use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::admin::dtos::{AnalyticsDto, CategoryCountDto, UpdateReportDto};
use crate::features::auth::model::CurrentUser;
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reports::ReportService;

/// Service for admin queries and moderation
pub struct AdminService {
    pool: PgPool,
    reports: Arc<ReportService>,
}

impl AdminService {
    pub fn new(pool: PgPool, reports: Arc<ReportService>) -> Self {
        Self { pool, reports }
    }

    /// List all reports, newest first, optionally filtered by exact
    /// status and category.
    pub async fn list_reports(
        &self,
        status: Option<ReportStatus>,
        category: Option<String>,
    ) -> Result<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT id, account_id, title, description, category, department, status,
                   image_url, image_key, proof_image_url, proof_image_key,
                   latitude, longitude, address, votes, last_updated_by,
                   created_at, updated_at
            FROM reports
            WHERE ($1::report_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Apply an admin update to a report. Status changes go through the
    /// same gate as department updates, so Pending reports stay locked.
    pub async fn update_report(
        &self,
        caller: &CurrentUser,
        id: Uuid,
        dto: UpdateReportDto,
    ) -> Result<Report> {
        self.reports
            .admin_update(caller, id, dto.status, dto.remove_image.unwrap_or(false))
            .await
    }

    /// Platform-wide report counts for the admin dashboard.
    pub async fn analytics(&self) -> Result<AnalyticsDto> {
        let (total, pending, in_progress, resolved) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE status = 'Pending'),
                       COUNT(*) FILTER (WHERE status = 'In Progress'),
                       COUNT(*) FILTER (WHERE status = 'Resolved')
                FROM reports
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        let by_category = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT category, COUNT(*)
            FROM reports
            GROUP BY category
            ORDER BY COUNT(*) DESC, category
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(category, count)| CategoryCountDto { category, count })
        .collect();

        Ok(AnalyticsDto {
            total,
            pending,
            in_progress,
            resolved,
            by_category,
        })
    }
}
