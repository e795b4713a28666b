use sqlx::FromRow;

/// A staff user. Created only at seed time; never exposed for mutation.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
