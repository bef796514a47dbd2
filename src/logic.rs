//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Session lifecycle (create, prologue choices, start over)
//!   - Submitting answers and scheduling hint requests on rejection
//!   - Fetching hints with a bounded wait and static fallbacks
//!   - Practice problems and a plain root check

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::domain::{Language, Method, Mode};
use crate::numeric::gcf;
use crate::openai::HintError;
use crate::parser::{parse, ParseError};
use crate::protocol::{to_view, RootsOut, ServerWsMessage, SessionView, SubmitOut};
use crate::session::{HintRequest, HintTag, SessionError, Submission};
use crate::solver::solve;
use crate::state::AppState;
use crate::validator::LearnerInput;

#[instrument(level = "info", skip(state))]
pub async fn new_session(state: &AppState) -> SessionView {
  to_view(&state.create_session().await)
}

pub async fn session_view(state: &AppState, id: Uuid) -> Result<SessionView, SessionError> {
  state.get_session(id).await.map(|s| to_view(&s))
}

#[instrument(level = "info", skip(state))]
pub async fn choose_language(
  state: &AppState,
  id: Uuid,
  language: Language,
) -> Result<SessionView, SessionError> {
  state
    .update_session(id, |s| {
      s.choose_language(language);
      to_view(s)
    })
    .await
}

#[instrument(level = "info", skip(state))]
pub async fn choose_mode(
  state: &AppState,
  id: Uuid,
  mode: Mode,
) -> Result<SessionView, SessionError> {
  state
    .update_session(id, |s| {
      s.choose_mode(mode);
      to_view(s)
    })
    .await
}

#[instrument(level = "info", skip(state))]
pub async fn choose_method(
  state: &AppState,
  id: Uuid,
  method: Method,
) -> Result<SessionView, SessionError> {
  state
    .update_session(id, |s| {
      s.choose_method(method);
      to_view(s)
    })
    .await
}

#[instrument(level = "info", skip(state))]
pub async fn start_over(state: &AppState, id: Uuid) -> Result<SessionView, SessionError> {
  state
    .update_session(id, |s| {
      s.start_over();
      to_view(s)
    })
    .await
}

/// Validate one answer. On rejection a hint task is spawned; when it resolves
/// and still matches the session's step, the hint is stored and, if `notify`
/// is given, pushed through it.
#[instrument(level = "info", skip(state, input, notify), fields(%id, kind = input_kind(&input)))]
pub async fn submit_answer(
  state: &Arc<AppState>,
  id: Uuid,
  input: LearnerInput,
  notify: Option<UnboundedSender<ServerWsMessage>>,
) -> Result<SubmitOut, SessionError> {
  let (submission, view) = state
    .update_session(id, |s| {
      let submission = s.submit(&input)?;
      Ok::<_, SessionError>((submission, to_view(s)))
    })
    .await??;

  match submission {
    Submission::Accepted { .. } => Ok(SubmitOut {
      accepted: true,
      expected: None,
      submitted: None,
      session: view,
    }),
    Submission::Rejected { rejection, tag, request } => {
      spawn_hint(state.clone(), id, tag, request, notify);
      Ok(SubmitOut {
        accepted: false,
        expected: Some(rejection.expected),
        submitted: Some(rejection.submitted),
        session: view,
      })
    }
  }
}

fn input_kind(input: &LearnerInput) -> &'static str {
  match input {
    LearnerInput::Text { .. } => "text",
    LearnerInput::Coefficients { .. } => "coefficients",
    LearnerInput::FactorPair { .. } => "factor_pair",
    LearnerInput::AreaModel { .. } => "area_model",
  }
}

/// Fire-and-forget: fetch, then apply only if the tag still matches.
fn spawn_hint(
  state: Arc<AppState>,
  id: Uuid,
  tag: HintTag,
  request: HintRequest,
  notify: Option<UnboundedSender<ServerWsMessage>>,
) {
  tokio::spawn(async move {
    let text = fetch_hint(&state, &request).await;
    let applied = state
      .update_session(id, |s| s.apply_hint(tag, text.clone()))
      .await
      .unwrap_or(false);
    if !applied {
      debug!(target: "tutor", session = %id, step = ?tag.step, "Hint arrived after the step changed; dropped");
      return;
    }
    if let Some(tx) = notify {
      let _ = tx.send(ServerWsMessage::Hint { step: tag.step, text });
    }
  });
}

/// Ask the hint service, never failing: errors, timeouts and a disabled
/// client all produce the configured static text.
#[instrument(level = "info", skip(state, request), fields(step = %request.step_name))]
pub async fn fetch_hint(state: &AppState, request: &HintRequest) -> String {
  let lang = request.language;
  let Some(oa) = &state.openai else {
    return state.hints.fallback(lang).to_string();
  };

  let limit = Duration::from_secs(state.hints.timeout_secs);
  let result = match tokio::time::timeout(limit, oa.step_hint(&state.prompts, request)).await {
    Ok(r) => r,
    Err(_) => Err(HintError::Timeout(limit)),
  };

  match result {
    Ok(text) => text,
    Err(HintError::Empty) => {
      warn!(target: "tutor", step = %request.step_name, "Hint service returned empty text; using static hint.");
      state.hints.empty(lang).to_string()
    }
    Err(e) => {
      error!(target: "tutor", step = %request.step_name, error = %e, "Hint service failed; using static hint.");
      state.hints.fallback(lang).to_string()
    }
  }
}

/// Parse a standard-form expression and report its real roots.
pub fn check_roots(expression: &str) -> Result<RootsOut, ParseError> {
  let eq = parse(expression)?;
  Ok(RootsOut {
    a: eq.a,
    b: eq.b,
    c: eq.c,
    total_gcf: gcf(eq.a, eq.b, eq.c),
    roots: solve(eq.a, eq.b, eq.c),
  })
}
