//! Per-problem record read and written by the step validator.
//!
//! `ProblemState` only changes through `merge`, which folds in a
//! `ProblemUpdate` produced by an accepted step. Learner snapshots are
//! write-once: the first accepted value for a problem is kept.

use serde::{Deserialize, Serialize};

use crate::domain::{CanonicalEquation, Method, Mode};

/// The two integers that multiply to `ac` and add to `b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorPair {
  pub factor1: i64,
  pub factor2: i64,
}

/// Cells of the 2x2 box plus the row/column common factors the learner wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaBox {
  #[serde(default)] pub tl: String,
  #[serde(default)] pub tr: String,
  #[serde(default)] pub bl: String,
  #[serde(default)] pub br: String,
  #[serde(default)] pub row1_gcf: String,
  #[serde(default)] pub row2_gcf: String,
  #[serde(default)] pub col1_gcf: String,
  #[serde(default)] pub col2_gcf: String,
}

impl AreaBox {
  pub fn labels_filled(&self) -> bool {
    [&self.row1_gcf, &self.row2_gcf, &self.col1_gcf, &self.col2_gcf]
      .iter()
      .all(|s| !s.trim().is_empty())
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coefficients {
  pub a: i64,
  pub b: i64,
  pub c: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemState {
  /// Untouched parsed equation; `None` until an expression is entered.
  pub equation: Option<CanonicalEquation>,
  pub total_gcf: i64,
  /// Working coefficients, GCF-reduced once that step is passed.
  pub a: i64,
  pub b: i64,
  pub c: i64,
  pub ac: i64,
  pub factors: Option<FactorPair>,
  pub mode: Mode,
  pub method: Method,

  pub reduced_raw: Option<String>,
  pub rewritten: Option<String>,
  pub grouped: Option<String>,
  pub area_box: Option<AreaBox>,
  pub final_binomials: Option<String>,
  pub zero_equations: Option<String>,
  pub solved_steps: Option<String>,
}

impl ProblemState {
  /// Blank record for a new problem under the given mode and method.
  pub fn new(mode: Mode, method: Method) -> Self {
    Self {
      equation: None,
      total_gcf: 1,
      a: 0,
      b: 0,
      c: 0,
      ac: 0,
      factors: None,
      mode,
      method,
      reduced_raw: None,
      rewritten: None,
      grouped: None,
      area_box: None,
      final_binomials: None,
      zero_equations: None,
      solved_steps: None,
    }
  }

  pub fn raw(&self) -> &str {
    self.equation.as_ref().map(|e| e.raw.as_str()).unwrap_or("")
  }

  pub fn has_gcf(&self) -> bool {
    self.total_gcf > 1
  }

  pub fn merge(&mut self, update: ProblemUpdate) {
    if let Some(eq) = update.equation {
      self.equation = Some(eq);
    }
    if let Some(g) = update.total_gcf {
      self.total_gcf = g;
    }
    if let Some(Coefficients { a, b, c }) = update.coefficients {
      self.a = a;
      self.b = b;
      self.c = c;
      self.ac = a * c;
    }
    if let Some(f) = update.factors {
      self.factors = Some(f);
    }
    write_once(&mut self.reduced_raw, update.reduced_raw);
    write_once(&mut self.rewritten, update.rewritten);
    write_once(&mut self.grouped, update.grouped);
    write_once(&mut self.area_box, update.area_box);
    write_once(&mut self.final_binomials, update.final_binomials);
    write_once(&mut self.zero_equations, update.zero_equations);
    write_once(&mut self.solved_steps, update.solved_steps);
  }

  /// Copy with `update` applied.
  pub fn merged(&self, update: &ProblemUpdate) -> Self {
    let mut next = self.clone();
    next.merge(update.clone());
    next
  }
}

impl Default for ProblemState {
  fn default() -> Self {
    Self::new(Mode::default(), Method::default())
  }
}

fn write_once<T>(slot: &mut Option<T>, value: Option<T>) {
  if slot.is_none() {
    *slot = value;
  }
}

/// Partial update produced by an accepted step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemUpdate {
  pub equation: Option<CanonicalEquation>,
  pub total_gcf: Option<i64>,
  /// New working coefficients; `ac` is recomputed from them.
  pub coefficients: Option<Coefficients>,
  pub factors: Option<FactorPair>,
  pub reduced_raw: Option<String>,
  pub rewritten: Option<String>,
  pub grouped: Option<String>,
  pub area_box: Option<AreaBox>,
  pub final_binomials: Option<String>,
  pub zero_equations: Option<String>,
  pub solved_steps: Option<String>,
}

/// Attempts across problems in one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  pub correct: u32,
  pub total: u32,
}

impl Stats {
  pub fn record(&mut self, accepted: bool) {
    self.total += 1;
    if accepted {
      self.correct += 1;
    }
  }
}
