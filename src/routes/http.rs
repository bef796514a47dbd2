//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::logic::*;
use crate::protocol::*;
use crate::session::SessionError;
use crate::state::AppState;

impl IntoResponse for SessionError {
  fn into_response(self) -> Response {
    let status = match self {
      SessionError::UnknownSession(_) => StatusCode::NOT_FOUND,
      SessionError::HintPending | SessionError::NotValidating(_) => StatusCode::CONFLICT,
    };
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let view = new_session(&state).await;
  (StatusCode::CREATED, Json(view))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, SessionError> {
  session_view(&state, id).await.map(Json)
}

#[instrument(level = "info", skip(state, body), fields(%id, language = ?body.language))]
pub async fn http_post_language(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<LanguageIn>,
) -> Result<Json<SessionView>, SessionError> {
  choose_language(&state, id, body.language).await.map(Json)
}

#[instrument(level = "info", skip(state, body), fields(%id, mode = ?body.mode))]
pub async fn http_post_mode(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ModeIn>,
) -> Result<Json<SessionView>, SessionError> {
  choose_mode(&state, id, body.mode).await.map(Json)
}

#[instrument(level = "info", skip(state, body), fields(%id, method = ?body.method))]
pub async fn http_post_method(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<MethodIn>,
) -> Result<Json<SessionView>, SessionError> {
  choose_method(&state, id, body.method).await.map(Json)
}

#[instrument(level = "info", skip(state, body), fields(%id))]
pub async fn http_post_submit(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SubmitIn>,
) -> Result<Json<SubmitOut>, SessionError> {
  let out = submit_answer(&state, id, body.input, None).await?;
  info!(target: "tutor", %id, accepted = out.accepted, step = ?out.session.step, "HTTP submit evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_post_start_over(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, SessionError> {
  start_over(&state, id).await.map(Json)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_practice(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let expression = state.sample_practice();
  info!(target: "tutor", %expression, "HTTP practice served");
  Json(PracticeOut { expression })
}

#[instrument(level = "info", skip(body), fields(expression = %body.expression))]
pub async fn http_post_check_roots(Json(body): Json<RootsIn>) -> Response {
  match check_roots(&body.expression) {
    Ok(out) => Json(out).into_response(),
    Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorOut { error: e.to_string() })).into_response(),
  }
}
