mod admin_dto;

pub use admin_dto::{AnalyticsDto, CategoryCountDto, ReportFilterQuery, UpdateReportDto};
