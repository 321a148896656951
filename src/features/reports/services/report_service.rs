use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::departments::DepartmentService;
use crate::features::reports::dtos::{CreateReportDto, ImageUpload};
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reports::services::matching::{department_fragment, department_matches};
use crate::features::reports::services::routing::route_category;
use crate::features::reports::services::status_gate::authorize_status_change;
use crate::modules::notify::Mailer;
use crate::modules::storage::MinIOClient;
use crate::shared::constants::{PROOF_IMAGE_FOLDER, REPORT_IMAGE_FOLDER};

const REPORT_COLUMNS: &str = "id, account_id, title, description, category, department, status, \
     image_url, image_key, proof_image_url, proof_image_key, latitude, longitude, address, \
     votes, last_updated_by, created_at, updated_at";

/// Service for citizen reports: creation with routing, listing, voting,
/// image lifecycle and department status updates.
pub struct ReportService {
    pool: PgPool,
    storage: Arc<MinIOClient>,
    mailer: Arc<Mailer>,
    departments: Arc<DepartmentService>,
}

impl ReportService {
    pub fn new(
        pool: PgPool,
        storage: Arc<MinIOClient>,
        mailer: Arc<Mailer>,
        departments: Arc<DepartmentService>,
    ) -> Self {
        Self {
            pool,
            storage,
            mailer,
            departments,
        }
    }

    /// Create a report. The department is resolved synchronously from the
    /// category; an optional image is uploaded before the row is written,
    /// so a failed upload fails the whole call.
    pub async fn create(
        &self,
        owner: &CurrentUser,
        dto: CreateReportDto,
        image: Option<ImageUpload>,
    ) -> Result<Report> {
        dto.validate()?;

        // Routing never fails: a directory read error degrades to the
        // keyword rules plus the default department.
        let directory = match self.departments.names().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Department directory unavailable for routing: {}", e);
                Vec::new()
            }
        };
        let department = route_category(&dto.category, &directory);

        let stored = match image {
            Some(image) => Some(
                self.storage
                    .upload(
                        image.data,
                        REPORT_IMAGE_FOLDER,
                        &image.file_name,
                        &image.content_type,
                    )
                    .await?,
            ),
            None => None,
        };

        let (image_url, image_key) = match stored {
            Some(obj) => (Some(obj.url), Some(obj.key)),
            None => (None, None),
        };

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            INSERT INTO reports
                (account_id, title, description, category, department,
                 image_url, image_key, latitude, longitude, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(owner.id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.category)
        .bind(&department)
        .bind(&image_url)
        .bind(&image_key)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(&dto.address)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            report_id = %report.id,
            category = %report.category,
            department = %report.department,
            "Report created and routed"
        );

        self.notify_creation(owner, &report);

        Ok(report)
    }

    /// Load a report or fail with NotFound.
    pub async fn get(&self, id: Uuid) -> Result<Report> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// List one account's reports, newest first. Callers may only read
    /// their own history unless they are admin.
    pub async fn list_by_owner(&self, caller: &CurrentUser, owner_id: Uuid) -> Result<Vec<Report>> {
        if caller.id != owner_id && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "You can only view your own reports".to_string(),
            ));
        }

        let reports = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE account_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Reports routed to a department, matched fuzzily against the path
    /// fragment with the word "department" stripped. Empty list, never 404.
    pub async fn list_by_department(&self, name: &str) -> Result<Vec<Report>> {
        let fragment = department_fragment(name);

        let reports = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE department ILIKE $1 ORDER BY created_at DESC"
        ))
        .bind(format!("%{}%", fragment))
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Atomic vote increment. Concurrent votes never lose updates because
    /// the addition happens inside the UPDATE itself.
    pub async fn vote(&self, id: Uuid) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE reports SET votes = votes + 1, updated_at = now() WHERE id = $1 RETURNING votes",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Remove the citizen image. The storage delete runs first; the row is
    /// only cleared once the object is gone, so the key is never dropped
    /// while the object still exists.
    pub async fn detach_image(&self, caller: &CurrentUser, id: Uuid) -> Result<Report> {
        let report = self.get(id).await?;
        self.ensure_owner_or_admin(caller, &report)?;

        let Some(key) = report.image_key.as_deref() else {
            return Err(AppError::Validation(
                "Report has no image to remove".to_string(),
            ));
        };

        self.storage.delete(key).await?;

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET image_url = NULL, image_key = NULL, updated_at = now()
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    /// Delete a report, releasing its primary image first. A storage
    /// failure here is logged and does not block the delete.
    pub async fn delete(&self, caller: &CurrentUser, id: Uuid) -> Result<()> {
        let report = self.get(id).await?;
        self.ensure_owner_or_admin(caller, &report)?;

        if let Some(key) = report.image_key.as_deref() {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(report_id = %id, "Failed to release report image: {}", e);
            }
        }

        sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(report_id = %id, "Report deleted");
        Ok(())
    }

    /// Department-side update: optional new status and optional proof
    /// image in one call, gated by role and department assignment.
    pub async fn department_update(
        &self,
        caller: &CurrentUser,
        id: Uuid,
        status: Option<ReportStatus>,
        proof: Option<ImageUpload>,
    ) -> Result<Report> {
        let report = self.get(id).await?;

        authorize_status_change(caller, &report.department, report.status)?;

        let stored = match proof {
            Some(image) => Some(
                self.storage
                    .upload(
                        image.data,
                        PROOF_IMAGE_FOLDER,
                        &image.file_name,
                        &image.content_type,
                    )
                    .await?,
            ),
            None => None,
        };

        let new_status = status.unwrap_or(report.status);
        let (proof_url, proof_key) = match &stored {
            Some(obj) => (Some(obj.url.clone()), Some(obj.key.clone())),
            None => (report.proof_image_url.clone(), report.proof_image_key.clone()),
        };

        let updated = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET status = $2, proof_image_url = $3, proof_image_key = $4,
                last_updated_by = $5, updated_at = now()
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(new_status)
        .bind(&proof_url)
        .bind(&proof_key)
        .bind(caller.id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            report_id = %id,
            status = updated.status.as_str(),
            updated_by = %caller.id,
            "Report status updated by department"
        );

        self.notify_status_change(&updated);

        Ok(updated)
    }

    /// Admin-side update: optional new status and optional removal of the
    /// citizen image. Gated like the department path, so a Pending report
    /// cannot be touched by an admin.
    pub async fn admin_update(
        &self,
        caller: &CurrentUser,
        id: Uuid,
        status: Option<ReportStatus>,
        remove_image: bool,
    ) -> Result<Report> {
        let report = self.get(id).await?;

        authorize_status_change(caller, &report.department, report.status)?;

        let (image_url, image_key) = if remove_image {
            if let Some(key) = report.image_key.as_deref() {
                self.storage.delete(key).await?;
            }
            (None, None)
        } else {
            (report.image_url.clone(), report.image_key.clone())
        };

        let new_status = status.unwrap_or(report.status);

        let updated = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET status = $2, image_url = $3, image_key = $4,
                last_updated_by = $5, updated_at = now()
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(new_status)
        .bind(&image_url)
        .bind(&image_key)
        .bind(caller.id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            report_id = %id,
            status = updated.status.as_str(),
            updated_by = %caller.id,
            "Report updated by admin"
        );

        self.notify_status_change(&updated);

        Ok(updated)
    }

    fn ensure_owner_or_admin(&self, caller: &CurrentUser, report: &Report) -> Result<()> {
        if caller.id != report.account_id && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "You do not have access to this report".to_string(),
            ));
        }
        Ok(())
    }

    /// Confirmation mail to the owner plus a routing mail to the matching
    /// department account, both fire-and-forget.
    fn notify_creation(&self, owner: &CurrentUser, report: &Report) {
        let mailer = self.mailer.clone();
        let pool = self.pool.clone();
        let owner_email = owner.email.clone();
        let title = report.title.clone();
        let department = report.department.clone();
        let report_id = report.id;

        tokio::spawn(async move {
            mailer
                .send_best_effort(
                    &owner_email,
                    "Your report has been submitted",
                    &format!(
                        "Your report '{}' (id {}) was received and routed to {}.",
                        title, report_id, department
                    ),
                )
                .await;

            match department_account_email(&pool, &department).await {
                Ok(Some(dept_email)) => {
                    mailer
                        .send_best_effort(
                            &dept_email,
                            "New report assigned to your department",
                            &format!("Report '{}' (id {}) has been routed to {}.", title, report_id, department),
                        )
                        .await;
                }
                Ok(None) => {
                    tracing::debug!(%department, "No department account to notify");
                }
                Err(e) => {
                    tracing::warn!(%department, "Department account lookup failed: {}", e);
                }
            }
        });
    }

    /// Status-change mail to the report owner, fire-and-forget.
    fn notify_status_change(&self, report: &Report) {
        let mailer = self.mailer.clone();
        let pool = self.pool.clone();
        let account_id = report.account_id;
        let title = report.title.clone();
        let status = report.status.as_str();

        tokio::spawn(async move {
            match owner_email(&pool, account_id).await {
                Ok(Some(email)) => {
                    mailer
                        .send_best_effort(
                            &email,
                            "Your report status has changed",
                            &format!("Your report '{}' is now: {}.", title, status),
                        )
                        .await;
                }
                Ok(None) => {
                    tracing::debug!(%account_id, "Report owner no longer exists, skipping mail");
                }
                Err(e) => {
                    tracing::warn!(%account_id, "Owner lookup for notification failed: {}", e);
                }
            }
        });
    }
}

async fn owner_email(pool: &PgPool, account_id: Uuid) -> Result<Option<String>> {
    let email = sqlx::query_scalar::<_, String>("SELECT email FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
    Ok(email)
}

/// Find the email of a department-role account whose display name matches
/// the routed department name.
async fn department_account_email(pool: &PgPool, department: &str) -> Result<Option<String>> {
    let accounts = sqlx::query_as::<_, (String, String)>(
        "SELECT name, email FROM accounts WHERE role = 'department'",
    )
    .fetch_all(pool)
    .await?;

    Ok(accounts
        .into_iter()
        .find(|(name, _)| department_matches(name, department))
        .map(|(_, email)| email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::Name;
    use fake::Fake;

    use crate::core::config::MinIOConfig;
    use crate::features::auth::model::AccountRole;

    /// Gated on TEST_DATABASE_URL so the suite stays green without a
    /// database; point it at a disposable Postgres instance to run these.
    async fn test_pool() -> Option<PgPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("TEST_DATABASE_URL is set but not reachable");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("migrations failed on the test database");
        Some(pool)
    }

    fn test_service(pool: PgPool) -> Arc<ReportService> {
        let storage = Arc::new(
            MinIOClient::new(MinIOConfig {
                endpoint: "http://localhost:9000".to_string(),
                public_endpoint: "http://localhost:9000".to_string(),
                access_key: "minioadmin".to_string(),
                secret_key: "minioadmin".to_string(),
                bucket: "civiceye-test".to_string(),
                region: "us-east-1".to_string(),
            })
            .unwrap(),
        );
        let mailer = Arc::new(Mailer::new(None).unwrap());
        let departments = Arc::new(crate::features::departments::DepartmentService::new(
            pool.clone(),
        ));
        Arc::new(ReportService::new(pool, storage, mailer, departments))
    }

    async fn create_citizen(pool: &PgPool) -> CurrentUser {
        let name: String = Name().fake();
        // Unique per run so the suite can be re-run against the same database.
        let email = format!("{}@example.com", Uuid::new_v4());
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO accounts (name, email, password_hash, role)
             VALUES ($1, $2, 'test-hash', 'citizen') RETURNING id",
        )
        .bind(&name)
        .bind(&email)
        .fetch_one(pool)
        .await
        .unwrap();

        CurrentUser {
            id,
            name,
            email,
            role: AccountRole::Citizen,
        }
    }

    fn report_dto() -> CreateReportDto {
        CreateReportDto {
            title: "Pothole".to_string(),
            description: "Large pothole near the intersection".to_string(),
            category: "Road damage".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            address: String::new(),
        }
    }

    #[tokio::test]
    async fn concurrent_votes_add_exactly_n() {
        let Some(pool) = test_pool().await else { return };
        let service = test_service(pool.clone());
        let owner = create_citizen(&pool).await;
        let report = service.create(&owner, report_dto(), None).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..25 {
            let service = Arc::clone(&service);
            let id = report.id;
            handles.push(tokio::spawn(async move { service.vote(id).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let fresh = service.get(report.id).await.unwrap();
        assert_eq!(fresh.votes, 25);
    }

    #[tokio::test]
    async fn detaching_a_missing_image_is_a_validation_error() {
        let Some(pool) = test_pool().await else { return };
        let service = test_service(pool.clone());
        let owner = create_citizen(&pool).await;
        let report = service.create(&owner, report_dto(), None).await.unwrap();

        // No image was attached, so the first detach already hits the
        // guard; a second attempt after a successful detach takes the
        // same path because both fields are cleared together.
        let err = service.detach_image(&owner, report.id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = service.detach_image(&owner, report.id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_requires_owner_or_admin_and_removes_the_row() {
        let Some(pool) = test_pool().await else { return };
        let service = test_service(pool.clone());
        let owner = create_citizen(&pool).await;
        let stranger = create_citizen(&pool).await;
        let report = service.create(&owner, report_dto(), None).await.unwrap();

        let err = service.delete(&stranger, report.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        service.delete(&owner, report.id).await.unwrap();
        let err = service.get(report.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
