mod report_dto;

pub use report_dto::{
    ReportFormat, ReportQueryParams, ReportRowDto, ReportSentDto, ReportSummaryDto, SendReportDto,
};
