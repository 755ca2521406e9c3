//! CSV rendering of route reports.
//!
//! The address column is always quoted since addresses carry commas; the
//! remaining columns are quoted only when they contain a delimiter.

use chrono::{DateTime, Utc};

use crate::features::reports::models::ReportRow;
use crate::shared::constants::CSV_NO_DATA;

pub const CSV_HEADER: &str = "Дата,Промоутер,Телефон,Адрес,Выполнено,Листовок,Время выполнения,Фото";

const YES: &str = "Да";
const NO: &str = "Нет";

/// Render report rows; an empty report renders as the "no data" placeholder.
pub fn render(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return CSV_NO_DATA.to_string();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(rows.iter().map(render_row));
    lines.join("\n")
}

fn render_row(row: &ReportRow) -> String {
    let fields = [
        row.route_date.to_string(),
        escape(&row.promoter_name),
        escape(row.promoter_phone.as_deref().unwrap_or("")),
        quote(&row.address),
        if row.completed { YES } else { NO }.to_string(),
        row.leaflets_distributed.unwrap_or(0).to_string(),
        row.completed_at.map(format_timestamp).unwrap_or_default(),
        escape(row.photo_url.as_deref().unwrap_or("")),
    ];
    fields.join(",")
}

/// `2024-01-01 10:30:00.250000+00:00`; the fraction is omitted when zero
fn format_timestamp(ts: DateTime<Utc>) -> String {
    if ts.timestamp_subsec_micros() == 0 {
        ts.format("%Y-%m-%d %H:%M:%S%:z").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.6f%:z").to_string()
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote(value)
    } else {
        value.to_string()
    }
}
