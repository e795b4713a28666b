use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::api::format::StudentView;
use crate::error::ApiError;
use crate::state::AppState;

const SEARCH_LIMIT: i64 = 30;

/// Search accepts either `query` or `q`; `query` wins when both are present.
#[derive(Debug, Deserialize)]
pub struct StudentSearchParams {
    pub query: Option<String>,
    pub q: Option<String>,
}

/// GET /api/students and GET /api/typeahead
///
/// A blank query lists the first 30 students by name; otherwise a substring
/// match against name or admission number, same ordering and cap.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<StudentSearchParams>,
) -> Result<Json<Vec<StudentView>>, ApiError> {
    let raw = params.query.or(params.q).unwrap_or_default();
    let query = raw.trim();

    let students = if query.is_empty() {
        state.db.list_students(SEARCH_LIMIT).await?
    } else {
        state.db.search_students(query, SEARCH_LIMIT).await?
    };

    Ok(Json(students.iter().map(StudentView::from).collect()))
}

/// GET /api/students/:id
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StudentView>, ApiError> {
    let student = state
        .db
        .student_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not found"))?;

    Ok(Json(StudentView::from(&student)))
}
