use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::departments::dtos::DepartmentDto;
use crate::features::departments::models::Department;

/// Service for the department directory
pub struct DepartmentService {
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all directory entries, ordered by name
    pub async fn list(&self) -> Result<Vec<DepartmentDto>> {
        let departments = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, email, description, image_url
            FROM departments
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list departments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(departments.into_iter().map(|d| d.into()).collect())
    }

    /// Directory names in a stable order, used as the routing fallback
    /// snapshot at report-creation time.
    pub async fn names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT name FROM departments ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load department names: {:?}", e);
                AppError::Database(e)
            })
    }
}
