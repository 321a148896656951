pub mod department_report_handler;
pub mod report_handler;

pub use department_report_handler::{list_department_reports, update_department_report};
pub use report_handler::{
    create_report, delete_report, delete_report_image, list_user_reports, vote_report,
};
