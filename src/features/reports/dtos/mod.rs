mod report_dto;

pub use report_dto::{
    CreateReportDto, CreateReportFormDto, DepartmentUpdateFormDto, ImageUpload, ReportDto,
    VoteResponseDto,
};
