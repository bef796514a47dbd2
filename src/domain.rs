//! Domain tags used across the tutor: mode, method, language, steps, and the
//! parsed equation itself.

use serde::{Deserialize, Serialize};

/// Factor only, or factor and then solve for the roots?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  #[default]
  Factoring,
  Solving,
}

/// How the learner splits the middle term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
  /// Rewrite `bx` as two terms and group pairs.
  #[default]
  Grouping,
  /// 2x2 box with row/column common factors.
  AreaModel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
  #[default]
  En,
  Es,
}

impl Language {
  /// Pick the string for this language.
  pub fn pick<T>(self, en: T, es: T) -> T {
    match self {
      Language::En => en,
      Language::Es => es,
    }
  }

  pub fn tag(self) -> &'static str {
    self.pick("en", "es")
  }

  pub fn display_name(self) -> &'static str {
    self.pick("English", "Spanish")
  }
}

/// Every screen of the walkthrough, in pedagogical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
  ChooseLanguage,
  ChooseMode,
  ChooseMethod,
  EnterExpression,
  FactorGcfTotal,
  IdentifyAbc,
  MultiplyAc,
  FindFactors,
  WorkMethod,
  FinalBinomials,
  SetToZero,
  SolveLinear,
  EnterZeros,
  Complete,
}

impl Step {
  /// Step identifier sent along with hint requests.
  pub fn name(self) -> &'static str {
    match self {
      Step::ChooseLanguage => "CHOOSE_LANGUAGE",
      Step::ChooseMode => "CHOOSE_MODE",
      Step::ChooseMethod => "CHOOSE_METHOD",
      Step::EnterExpression => "ENTER_EXPRESSION",
      Step::FactorGcfTotal => "FACTOR_GCF_TOTAL",
      Step::IdentifyAbc => "IDENTIFY_ABC",
      Step::MultiplyAc => "MULTIPLY_AC",
      Step::FindFactors => "FIND_FACTORS",
      Step::WorkMethod => "WORK_METHOD",
      Step::FinalBinomials => "FINAL_BINOMIALS",
      Step::SetToZero => "SET_TO_ZERO",
      Step::SolveLinear => "SOLVE_LINEAR",
      Step::EnterZeros => "ENTER_ZEROS",
      Step::Complete => "COMPLETE",
    }
  }

  /// Steps that take learner math and go through the validator.
  pub fn is_validating(self) -> bool {
    !matches!(
      self,
      Step::ChooseLanguage | Step::ChooseMode | Step::ChooseMethod | Step::Complete
    )
  }
}

/// A quadratic as parsed from standard form. Never mutated after parsing;
/// GCF-reduced coefficients live in `ProblemState` instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEquation {
  pub a: i64,
  pub b: i64,
  pub c: i64,
  /// Compact lowercase text without the trailing `=0`.
  pub raw: String,
}
