pub mod csv_export;
mod report_service;

pub use report_service::ReportService;
