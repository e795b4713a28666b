use serde::Serialize;
use sqlx::FromRow;

/// A student row as stored. Balance is a signed amount in cedis and may go
/// negative when a student overpays; it is mutated only by payment recording.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: i64,
    /// Human-assigned external identifier, e.g. "ADM001".
    pub admission_no: Option<String>,
    pub name: String,
    pub class: Option<String>,
    pub guardian: Option<String>,
    pub balance: f64,
}
