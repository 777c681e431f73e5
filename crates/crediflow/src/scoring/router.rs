use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::SubjectId;
use super::repository::LoanRepository;
use super::service::{ScoreServiceError, TrustScoreService};

/// Router builder exposing the scoring endpoint.
pub fn scoring_router<L>(service: Arc<TrustScoreService<L>>) -> Router
where
    L: LoanRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/subjects/:subject_id/score",
            get(score_handler::<L>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler<L>(
    State(service): State<Arc<TrustScoreService<L>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    L: LoanRepository + 'static,
{
    let subject = SubjectId(subject_id);
    match service.score_subject(&subject) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err @ ScoreServiceError::NoDataset { .. }) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
