//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and presentation layer independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Language, Method, Mode, Step};
use crate::problem::{ProblemState, Stats};
use crate::session::{Feedback, Reference, Session};
use crate::validator::LearnerInput;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    State,
    ChooseLanguage { language: Language },
    ChooseMode { mode: Mode },
    ChooseMethod { method: Method },
    Submit { input: LearnerInput },
    StartOver,
    Practice,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session { session: SessionView },
    SubmitResult { result: SubmitOut },
    /// Pushed when a hint resolves while the learner is still on that step.
    Hint { step: Step, text: String },
    Practice { expression: String },
    Error { message: String },
}

/// Snapshot of a session for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub step: Step,
    pub language: Language,
    pub mode: Mode,
    pub method: Method,
    pub problem: ProblemState,
    pub stats: Stats,
    pub feedback: Option<Feedback>,
    pub hint: Option<String>,
    pub hint_pending: bool,
    pub reference: Option<Reference>,
}

/// Convert the internal `Session` to the public DTO.
pub fn to_view(s: &Session) -> SessionView {
    SessionView {
        id: s.id,
        step: s.step,
        language: s.language,
        mode: s.problem.mode,
        method: s.problem.method,
        problem: s.problem.clone(),
        stats: s.stats,
        feedback: s.feedback.clone(),
        hint: s.hint.clone(),
        hint_pending: s.pending_hint.is_some(),
        reference: s.reference(),
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitOut {
    pub accepted: bool,
    /// Only set on rejection: what the step wanted and what was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<String>,
    pub session: SessionView,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct LanguageIn {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct ModeIn {
    pub mode: Mode,
}

#[derive(Debug, Deserialize)]
pub struct MethodIn {
    pub method: Method,
}

#[derive(Debug, Deserialize)]
pub struct SubmitIn {
    pub input: LearnerInput,
}

#[derive(Debug, Serialize)]
pub struct PracticeOut {
    pub expression: String,
}

#[derive(Debug, Deserialize)]
pub struct RootsIn {
    pub expression: String,
}

#[derive(Debug, Serialize)]
pub struct RootsOut {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub total_gcf: i64,
    pub roots: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
