pub mod matching;
pub mod routing;
pub mod status_gate;

mod report_service;

pub use report_service::ReportService;
