mod daily_report;
mod report_row;

pub use daily_report::{DailyReport, NewDailyReport};
pub use report_row::{ReportRow, RouteSummary};
