use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::chat::handler as chat_handler;
use crate::features::departments::{
    dtos as departments_dtos, handlers as departments_handlers,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::auth_handler::register,
        auth_handlers::auth_handler::login,
        // Departments (public)
        departments_handlers::department_handler::list_departments,
        // Reports
        reports_handlers::report_handler::create_report,
        reports_handlers::report_handler::list_user_reports,
        reports_handlers::report_handler::vote_report,
        reports_handlers::report_handler::delete_report_image,
        reports_handlers::report_handler::delete_report,
        // Department report views
        reports_handlers::department_report_handler::list_department_reports,
        reports_handlers::department_report_handler::update_department_report,
        // Admin
        admin_handlers::admin_handler::list_all_reports,
        admin_handlers::admin_handler::update_report,
        admin_handlers::admin_handler::analytics,
        // Chat (public)
        chat_handler::chat_ws,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::AccountRole,
            auth_dtos::RegisterDto,
            auth_dtos::LoginDto,
            auth_dtos::AuthResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            // Departments
            departments_dtos::DepartmentDto,
            ApiResponse<Vec<departments_dtos::DepartmentDto>>,
            // Reports
            reports_models::ReportStatus,
            reports_dtos::CreateReportFormDto,
            reports_dtos::DepartmentUpdateFormDto,
            reports_dtos::ReportDto,
            reports_dtos::VoteResponseDto,
            ApiResponse<reports_dtos::ReportDto>,
            ApiResponse<Vec<reports_dtos::ReportDto>>,
            ApiResponse<reports_dtos::VoteResponseDto>,
            // Admin
            admin_dtos::UpdateReportDto,
            admin_dtos::CategoryCountDto,
            admin_dtos::AnalyticsDto,
            ApiResponse<admin_dtos::AnalyticsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "departments", description = "Department directory (public)"),
        (name = "reports", description = "Citizen reports"),
        (name = "department-reports", description = "Department report views"),
        (name = "admin", description = "Admin moderation and analytics"),
        (name = "chat", description = "Per-report chat relay (WebSocket)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicEye API",
        version = "0.1.0",
        description = "API documentation for CivicEye",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
