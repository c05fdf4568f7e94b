use super::QUIZ_TAG;
use crate::quiz::ResponseDeadline;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Per-response quiz policy
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizPolicyResponse {
    /// Time limit for one response, in seconds
    deadline_seconds: i64,
    /// Number of questions in one response
    questions_per_response: usize,
}

#[utoipa::path(
    get,
    path = "/api/quiz/policy",
    responses((status = OK, description = "Quiz timing and sizing policy", body = QuizPolicyResponse)),
    tag = QUIZ_TAG,
)]
pub(super) async fn policy_handler() -> Json<QuizPolicyResponse> {
    Json(QuizPolicyResponse {
        deadline_seconds: ResponseDeadline::duration().num_seconds(),
        questions_per_response: ResponseDeadline::question_quota(),
    })
}
