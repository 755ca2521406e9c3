/// Promoter used when a request does not name one
pub const DEFAULT_PROMOTER_ID: i64 = 1;

/// Display name of the promoter created by the initial migration and the seed endpoint
pub const DEFAULT_PROMOTER_NAME: &str = "Иван Петров";

pub const DEFAULT_PROMOTER_PHONE: &str = "+7 (911) 123-45-67";

/// Placeholder returned instead of an empty CSV table
pub const CSV_NO_DATA: &str = "Нет данных";

pub fn default_promoter_id() -> i64 {
    DEFAULT_PROMOTER_ID
}
