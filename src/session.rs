//! One learner's walkthrough: current step, problem record, stats, feedback,
//! and the single outstanding hint request.
//!
//! Hint requests are tagged with `(problem_id, step)`. A hint that resolves
//! after the learner moved on (next step, start over, new mode) no longer
//! matches and is dropped in `apply_hint`.

use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Language, Method, Mode, Step};
use crate::problem::{ProblemState, Stats};
use crate::util::format_math_display;
use crate::validator::{validate, LearnerInput, Rejection, Verdict};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
  #[error("unknown session: {0}")]
  UnknownSession(String),
  #[error("a hint for this step is still loading")]
  HintPending,
  #[error("step {0:?} does not take an answer")]
  NotValidating(Step),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct HintTag {
  pub problem_id: Uuid,
  pub step: Step,
}

/// Everything the hint service gets for one rejected attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HintRequest {
  pub step_name: String,
  pub equation: String,
  pub submitted: String,
  pub expected: String,
  pub language: Language,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
  Success,
  Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Feedback {
  pub kind: FeedbackKind,
  pub message: String,
}

/// Read-only work from earlier steps shown next to the current one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reference {
  pub label: String,
  pub content: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
  Accepted { next: Step },
  Rejected { rejection: Rejection, tag: HintTag, request: HintRequest },
}

#[derive(Clone, Debug)]
pub struct Session {
  pub id: Uuid,
  pub problem_id: Uuid,
  pub step: Step,
  pub language: Language,
  pub problem: ProblemState,
  pub stats: Stats,
  pub feedback: Option<Feedback>,
  pub hint: Option<String>,
  pub pending_hint: Option<HintTag>,
  /// Last learner activity; the store evicts sessions idle for too long.
  pub last_touched: Instant,
}

impl Default for Session {
  fn default() -> Self {
    Self::new()
  }
}

impl Session {
  pub fn new() -> Self {
    Self {
      id: Uuid::new_v4(),
      problem_id: Uuid::new_v4(),
      step: Step::ChooseLanguage,
      language: Language::default(),
      problem: ProblemState::default(),
      stats: Stats::default(),
      feedback: None,
      hint: None,
      pending_hint: None,
      last_touched: Instant::now(),
    }
  }

  pub fn touch(&mut self) {
    self.last_touched = Instant::now();
  }

  pub fn choose_language(&mut self, language: Language) {
    self.language = language;
    if self.step == Step::ChooseLanguage {
      self.step = Step::ChooseMode;
    }
  }

  pub fn choose_mode(&mut self, mode: Mode) {
    self.reset_problem(mode, self.problem.method);
    self.step = Step::ChooseMethod;
  }

  pub fn choose_method(&mut self, method: Method) {
    self.reset_problem(self.problem.mode, method);
    self.step = Step::EnterExpression;
  }

  /// Back to mode selection with a blank problem; stats survive.
  pub fn start_over(&mut self) {
    self.reset_problem(self.problem.mode, self.problem.method);
    self.step = Step::ChooseMode;
  }

  fn reset_problem(&mut self, mode: Mode, method: Method) {
    self.problem = ProblemState::new(mode, method);
    self.problem_id = Uuid::new_v4();
    self.feedback = None;
    self.hint = None;
    self.pending_hint = None;
  }

  pub fn current_tag(&self) -> HintTag {
    HintTag { problem_id: self.problem_id, step: self.step }
  }

  /// Validate one answer for the current step and apply the outcome.
  pub fn submit(&mut self, input: &LearnerInput) -> Result<Submission, SessionError> {
    if !self.step.is_validating() {
      return Err(SessionError::NotValidating(self.step));
    }
    if self.pending_hint.is_some() {
      return Err(SessionError::HintPending);
    }

    let step = self.step;
    self.hint = None;
    match validate(step, &self.problem, input, self.language) {
      Verdict::Accept { update, next } => {
        self.problem.merge(update);
        self.stats.record(true);
        self.feedback = Some(Feedback {
          kind: FeedbackKind::Success,
          message: self.language.pick("Correct!", "¡Correcto!").to_string(),
        });
        self.step = next;
        info!(target: "tutor", session = %self.id, from = ?step, to = ?next, "Step accepted");
        Ok(Submission::Accepted { next })
      }
      Verdict::Reject(rejection) => {
        self.stats.record(false);
        self.feedback = Some(Feedback {
          kind: FeedbackKind::Error,
          message: self.language.pick("Try again.", "Inténtalo de nuevo.").to_string(),
        });
        let tag = self.current_tag();
        self.pending_hint = Some(tag);
        info!(target: "tutor", session = %self.id, ?step, expected = %rejection.expected, "Step rejected");
        let request = HintRequest {
          step_name: step.name().to_string(),
          equation: self.problem.raw().to_string(),
          submitted: rejection.submitted.clone(),
          expected: rejection.expected.clone(),
          language: self.language,
        };
        Ok(Submission::Rejected { rejection, tag, request })
      }
    }
  }

  /// Store a resolved hint if it still belongs to the current step.
  /// Returns false when the hint is stale and was discarded.
  pub fn apply_hint(&mut self, tag: HintTag, text: String) -> bool {
    if self.pending_hint == Some(tag) {
      self.pending_hint = None;
    }
    if tag != self.current_tag() {
      debug!(target: "tutor", session = %self.id, ?tag, "Discarding stale hint");
      return false;
    }
    self.hint = Some(text);
    true
  }

  /// Work from earlier steps to show beside the current one.
  pub fn reference(&self) -> Option<Reference> {
    let p = &self.problem;
    let lang = self.language;
    let working = p.reduced_raw.as_deref().unwrap_or(p.raw());
    let (label, content) = match self.step {
      Step::FactorGcfTotal => (lang.pick("Original Expression", "Expresión original"), p.raw().to_string()),
      Step::IdentifyAbc => (lang.pick("Current Form", "Forma actual"), working.to_string()),
      Step::MultiplyAc => (lang.pick("Working Coefficients", "Coeficientes de trabajo"), working.to_string()),
      Step::FindFactors => (
        lang.pick("Working Equation", "Ecuación de trabajo"),
        format!("{working} (ac = {}, b = {})", p.ac, p.b),
      ),
      Step::WorkMethod => (
        lang.pick("Target Factors", "Factores objetivo"),
        p.factors.map(|f| format!("{}, {}", f.factor1, f.factor2)).unwrap_or_default(),
      ),
      Step::FinalBinomials => (
        lang.pick("Grouped Expressions", "Expresiones agrupadas"),
        p.rewritten.clone().unwrap_or_default(),
      ),
      Step::SetToZero => (
        lang.pick("Factored Form", "Forma factorizada"),
        p.final_binomials.clone().unwrap_or_default(),
      ),
      Step::SolveLinear => (
        lang.pick("Equations to Solve", "Ecuaciones a resolver"),
        p.zero_equations.clone().unwrap_or_default(),
      ),
      Step::EnterZeros => (
        lang.pick("Linear Solutions", "Soluciones lineales"),
        p.solved_steps.clone().unwrap_or_default(),
      ),
      _ => return None,
    };
    if content.is_empty() {
      return None;
    }
    Some(Reference { label: label.to_string(), content: format_math_display(&content) })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::problem::FactorPair;

  fn ready(mode: Mode, method: Method) -> Session {
    let mut s = Session::new();
    s.choose_language(Language::En);
    s.choose_mode(mode);
    s.choose_method(method);
    s
  }

  fn pair(f1: &str, f2: &str) -> LearnerInput {
    LearnerInput::FactorPair { f1: f1.into(), f2: f2.into() }
  }

  fn walk_to_factors() -> Session {
    let mut s = ready(Mode::Solving, Method::Grouping);
    s.submit(&LearnerInput::text("x^2+5x+6")).unwrap();
    s.submit(&LearnerInput::Coefficients { a: "1".into(), b: "5".into(), c: "6".into() }).unwrap();
    s.submit(&LearnerInput::text("6")).unwrap();
    assert_eq!(s.step, Step::FindFactors);
    s
  }

  #[test]
  fn prologue_leads_to_expression_entry() {
    let mut s = Session::new();
    assert_eq!(s.step, Step::ChooseLanguage);
    s.choose_language(Language::Es);
    assert_eq!(s.step, Step::ChooseMode);
    s.choose_mode(Mode::Solving);
    assert_eq!(s.step, Step::ChooseMethod);
    s.choose_method(Method::AreaModel);
    assert_eq!(s.step, Step::EnterExpression);
    assert_eq!((s.problem.mode, s.problem.method), (Mode::Solving, Method::AreaModel));
  }

  #[test]
  fn submit_outside_validating_steps_is_refused() {
    let mut s = Session::new();
    assert_eq!(
      s.submit(&LearnerInput::text("x^2+5x+6")),
      Err(SessionError::NotValidating(Step::ChooseLanguage))
    );
    assert_eq!(s.stats, Stats::default());
  }

  #[test]
  fn rejected_factor_pair_leaves_problem_untouched() {
    let mut s = walk_to_factors();
    let before = s.problem.clone();
    let stats_before = s.stats;

    // 1*6 == ac but 1+6 != b
    let outcome = s.submit(&pair("1", "6")).unwrap();
    assert!(matches!(outcome, Submission::Rejected { .. }));
    assert_eq!(s.problem, before);
    assert_eq!(s.step, Step::FindFactors);
    assert_eq!(s.stats.total, stats_before.total + 1);
    assert_eq!(s.stats.correct, stats_before.correct);
    assert_eq!(s.feedback.as_ref().map(|f| f.kind), Some(FeedbackKind::Error));
  }

  #[test]
  fn rejection_builds_hint_request() {
    let mut s = walk_to_factors();
    let Submission::Rejected { request, tag, .. } = s.submit(&pair("1", "6")).unwrap() else {
      panic!("expected rejection");
    };
    assert_eq!(request.step_name, "FIND_FACTORS");
    assert_eq!(request.equation, "x^2+5x+6");
    assert_eq!(request.submitted, "1, 6");
    assert_eq!(request.expected, "Find factors of 6 that sum to 5");
    assert_eq!(tag, s.current_tag());
  }

  #[test]
  fn pending_hint_blocks_second_submit() {
    let mut s = walk_to_factors();
    let Submission::Rejected { tag, .. } = s.submit(&pair("1", "6")).unwrap() else {
      panic!("expected rejection");
    };
    let total = s.stats.total;
    assert_eq!(s.submit(&pair("2", "3")), Err(SessionError::HintPending));
    assert_eq!(s.stats.total, total);

    assert!(s.apply_hint(tag, "Which factors of 6 add to 5?".into()));
    assert_eq!(s.hint.as_deref(), Some("Which factors of 6 add to 5?"));
    assert_eq!(s.submit(&pair("2", "3")), Ok(Submission::Accepted { next: Step::WorkMethod }));
    assert_eq!(s.problem.factors, Some(FactorPair { factor1: 2, factor2: 3 }));
    assert_eq!(s.hint, None);
  }

  #[test]
  fn stale_hint_after_start_over_is_discarded() {
    let mut s = walk_to_factors();
    let Submission::Rejected { tag, .. } = s.submit(&pair("1", "6")).unwrap() else {
      panic!("expected rejection");
    };
    s.start_over();
    assert_eq!(s.step, Step::ChooseMode);
    assert!(!s.apply_hint(tag, "late".into()));
    assert_eq!(s.hint, None);
    assert_eq!(s.pending_hint, None);
    assert_eq!(s.problem.raw(), "");
  }

  #[test]
  fn hint_for_another_step_is_discarded() {
    let mut s = walk_to_factors();
    let stale = HintTag { problem_id: s.problem_id, step: Step::MultiplyAc };
    assert!(!s.apply_hint(stale, "old".into()));
    assert_eq!(s.hint, None);
  }

  #[test]
  fn mode_change_resets_problem_but_keeps_stats() {
    let mut s = walk_to_factors();
    let stats = s.stats;
    let old_problem = s.problem_id;
    s.choose_mode(Mode::Factoring);
    assert_ne!(s.problem_id, old_problem);
    assert_eq!(s.problem, ProblemState::new(Mode::Factoring, Method::Grouping));
    assert_eq!(s.stats, stats);
  }

  #[test]
  fn reference_shows_prior_work() {
    let mut s = walk_to_factors();
    let r = s.reference().unwrap();
    assert_eq!(r.label, "Working Equation");
    assert_eq!(r.content, "x²+5x+6 (ac = 6, b = 5)");
    s.submit(&pair("2", "3")).unwrap();
    assert_eq!(s.reference().unwrap().content, "2, 3");
  }

  #[test]
  fn language_change_mid_problem_keeps_step() {
    let mut s = walk_to_factors();
    s.choose_language(Language::Es);
    assert_eq!(s.step, Step::FindFactors);
    assert_eq!(s.reference().unwrap().label, "Ecuación de trabajo");
  }
}
