use serde::Serialize;
use sqlx::FromRow;

/// A payment row as stored. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub method: Option<String>,
    pub note: Option<String>,
    pub payer_name: Option<String>,
    /// Server-assigned, SQLite CURRENT_TIMESTAMP ("YYYY-MM-DD HH:MM:SS", UTC).
    pub created_at: String,
}

/// Fields for inserting a new payment; defaults are applied at the handler.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub student_id: i64,
    pub amount: f64,
    pub method: String,
    pub note: String,
    pub payer_name: String,
}
