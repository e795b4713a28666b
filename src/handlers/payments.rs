use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::format::{PaymentView, StudentView};
use crate::database::models::NewPayment;
use crate::error::ApiError;
use crate::state::AppState;

const GLOBAL_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    #[serde(rename = "studentId")]
    pub student_id: Option<i64>,
    pub amount: Option<f64>,
    pub method: Option<String>,
    pub note: Option<String>,
    pub payer_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentListParams {
    #[serde(rename = "studentId")]
    pub student_id: Option<i64>,
}

/// POST /api/payments
///
/// Inserts the payment row, then decrements the student's balance. The two
/// writes are independent statements, not a single transaction; a failure
/// between them leaves an orphaned payment row (see DESIGN.md).
pub async fn record(
    State(state): State<AppState>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(student_id), Some(amount)) = (body.student_id, body.amount) else {
        return Err(ApiError::bad_request("studentId and amount required"));
    };

    let payment = NewPayment {
        student_id,
        amount,
        method: body.method.unwrap_or_else(|| "cash".to_string()),
        note: body.note.unwrap_or_default(),
        payer_name: body.payer_name.unwrap_or_default(),
    };

    state.db.insert_payment(&payment).await?;
    state.db.decrement_balance(student_id, amount).await?;

    let student = state
        .db
        .student_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not found"))?;

    Ok(Json(json!({
        "success": true,
        "student": StudentView::from(&student),
    })))
}

/// GET /api/payments
///
/// With `studentId`, every payment for that student newest-first; without,
/// the 200 most recent payments globally.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaymentListParams>,
) -> Result<Json<Vec<PaymentView>>, ApiError> {
    let payments = match params.student_id {
        Some(student_id) => state.db.payments_for_student(student_id).await?,
        None => state.db.recent_payments(GLOBAL_LIMIT).await?,
    };

    Ok(Json(payments.iter().map(PaymentView::from).collect()))
}
