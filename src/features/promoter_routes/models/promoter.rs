use sqlx::FromRow;

/// Field agent who walks routes. Read-only outside of seeding.
#[derive(Debug, Clone, FromRow)]
pub struct Promoter {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
}
