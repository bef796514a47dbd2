//! Step validation and the transition table.
//!
//! `validate` checks one learner submission against values recomputed from
//! the `ProblemState` and returns either an update to merge plus the next
//! step, or a `Rejection` describing what was expected (that description is
//! what the hint service receives). It never mutates state and never fails:
//! malformed input of any shape is a normal rejection.
//!
//! Several checks are purely syntactic (a parenthesis for grouping work,
//! `false` for the GCF equation). They are lenient on purpose and must stay
//! that way unless the product behaviour changes.

use serde::{Deserialize, Serialize};

use crate::domain::{Language, Method, Mode, Step};
use crate::normalize::structurally_equal;
use crate::numeric::{gcf, numerically_equal, parse_numeric};
use crate::parser::parse;
use crate::problem::{AreaBox, Coefficients, FactorPair, ProblemState, ProblemUpdate};
use crate::solver::solve;

/// What the learner submitted. The shape depends on the step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearnerInput {
  Text {
    text: String,
  },
  Coefficients {
    a: String,
    b: String,
    c: String,
  },
  FactorPair {
    f1: String,
    f2: String,
  },
  /// Area-model bundle: factor pair, filled box, and the final factored form.
  AreaModel {
    f1: String,
    f2: String,
    #[serde(rename = "box")]
    area: AreaBox,
    #[serde(rename = "final")]
    final_binomials: String,
  },
}

impl LearnerInput {
  pub fn text(text: impl Into<String>) -> Self {
    LearnerInput::Text { text: text.into() }
  }

  /// Literal summary of the submission, forwarded to the hint service.
  pub fn summary(&self) -> String {
    match self {
      LearnerInput::Text { text } => text.clone(),
      LearnerInput::Coefficients { a, b, c } => format!("a={a}, b={b}, c={c}"),
      LearnerInput::FactorPair { f1, f2 } => format!("{f1}, {f2}"),
      LearnerInput::AreaModel { f1, f2, area, final_binomials } => format!(
        "Factors: {f1}, {f2} | Box: {},{} | Factored: {final_binomials}",
        area.tl, area.tr
      ),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rejection {
  /// What the step wanted, in the learner's language.
  pub expected: String,
  /// What the learner sent.
  pub submitted: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
  Accept { update: ProblemUpdate, next: Step },
  Reject(Rejection),
}

impl Verdict {
  pub fn is_accept(&self) -> bool {
    matches!(self, Verdict::Accept { .. })
  }
}

pub fn validate(step: Step, problem: &ProblemState, input: &LearnerInput, lang: Language) -> Verdict {
  let checked = match step {
    Step::EnterExpression => enter_expression(input, lang),
    Step::FactorGcfTotal => factor_gcf(problem, input, lang),
    Step::IdentifyAbc => identify_abc(problem, input, lang),
    Step::MultiplyAc => multiply_ac(problem, input, lang),
    Step::FindFactors => match problem.method {
      Method::Grouping => find_factors(problem, input, lang),
      Method::AreaModel => area_model(problem, input, lang),
    },
    Step::WorkMethod => work_method(input, lang),
    Step::FinalBinomials => final_binomials(problem, input, lang),
    Step::SetToZero => set_to_zero(problem, input, lang),
    Step::SolveLinear => solve_linear(problem, input, lang),
    Step::EnterZeros => enter_zeros(problem, input, lang),
    Step::ChooseLanguage | Step::ChooseMode | Step::ChooseMethod | Step::Complete => Err(lang.pick(
      "Nothing to check on this screen".to_string(),
      "No hay nada que validar en esta pantalla".to_string(),
    )),
  };

  match checked {
    Ok(update) => {
      let next = transition(step, &problem.merged(&update));
      Verdict::Accept { update, next }
    }
    Err(expected) => Verdict::Reject(Rejection { expected, submitted: input.summary() }),
  }
}

/// Next step after an accepted `step`, given the state with its update merged.
pub fn transition(step: Step, problem: &ProblemState) -> Step {
  match step {
    Step::ChooseLanguage => Step::ChooseMode,
    Step::ChooseMode => Step::ChooseMethod,
    Step::ChooseMethod => Step::EnterExpression,
    Step::EnterExpression if problem.has_gcf() => Step::FactorGcfTotal,
    Step::EnterExpression => Step::IdentifyAbc,
    Step::FactorGcfTotal => Step::IdentifyAbc,
    Step::IdentifyAbc => Step::MultiplyAc,
    Step::MultiplyAc => Step::FindFactors,
    // The area bundle already produced the final binomials.
    Step::FindFactors => match problem.method {
      Method::Grouping => Step::WorkMethod,
      Method::AreaModel => Step::SetToZero,
    },
    Step::WorkMethod => Step::FinalBinomials,
    Step::FinalBinomials => match problem.mode {
      Mode::Factoring => Step::Complete,
      Mode::Solving => Step::SetToZero,
    },
    Step::SetToZero => Step::SolveLinear,
    Step::SolveLinear => Step::EnterZeros,
    Step::EnterZeros | Step::Complete => Step::Complete,
  }
}

/// `gcf(<a>x^2<±b>x<±c>)` over the reduced coefficients, or the bare
/// polynomial when there is no common factor.
pub fn gcf_template(total_gcf: i64, a: i64, b: i64, c: i64) -> String {
  let lead = match a {
    1 => String::new(),
    -1 => "-".to_string(),
    n => n.to_string(),
  };
  let sign = |n: i64| if n >= 0 { "+" } else { "" };
  let inner = format!("{lead}x^2{}{b}x{}{c}", sign(b), sign(c));
  if total_gcf > 1 {
    format!("{total_gcf}({inner})")
  } else {
    inner
  }
}

type Checked = Result<ProblemUpdate, String>;

fn text_of(input: &LearnerInput) -> Option<&str> {
  match input {
    LearnerInput::Text { text } => Some(text),
    _ => None,
  }
}

fn enter_expression(input: &LearnerInput, lang: Language) -> Checked {
  let expected = || lang.pick("Enter expression in standard form", "Ingrese la expresión en forma estándar").to_string();
  let text = text_of(input).ok_or_else(expected)?;
  let eq = parse(text).map_err(|_| expected())?;
  Ok(ProblemUpdate {
    total_gcf: Some(gcf(eq.a, eq.b, eq.c)),
    coefficients: Some(Coefficients { a: eq.a, b: eq.b, c: eq.c }),
    equation: Some(eq),
    ..Default::default()
  })
}

fn factor_gcf(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let g = problem.total_gcf.max(1);
  let expected = || lang.pick(format!("Factor out the GCF of {g}"), format!("Factorice el MCD de {g}"));
  let text = text_of(input).ok_or_else(expected)?;

  let (ra, rb, rc) = (problem.a / g, problem.b / g, problem.c / g);
  let matches_template = structurally_equal(text, &gcf_template(g, ra, rb, rc));
  let untouched = g == 1 && structurally_equal(text, problem.raw());
  if !(matches_template || untouched) {
    return Err(expected());
  }
  Ok(ProblemUpdate {
    reduced_raw: Some(text.to_string()),
    coefficients: Some(Coefficients { a: ra, b: rb, c: rc }),
    ..Default::default()
  })
}

fn identify_abc(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let expected = || {
    lang
      .pick("Identify a, b, c from simplified expression", "Identifique a, b, c de la expresión simplificada")
      .to_string()
  };
  let LearnerInput::Coefficients { a, b, c } = input else {
    return Err(expected());
  };
  if numerically_equal(a, problem.a) && numerically_equal(b, problem.b) && numerically_equal(c, problem.c) {
    Ok(ProblemUpdate::default())
  } else {
    Err(expected())
  }
}

fn multiply_ac(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let expected = || lang.pick("Multiply a by c", "Multiplique a por c").to_string();
  let text = text_of(input).ok_or_else(expected)?;
  if numerically_equal(text, problem.ac) {
    Ok(ProblemUpdate::default())
  } else {
    Err(expected())
  }
}

/// Integer pair with `f1*f2 == ac` and `f1+f2 == b`, compared exactly.
fn factor_pair(problem: &ProblemState, f1: &str, f2: &str) -> Option<FactorPair> {
  let f1: i64 = f1.trim().parse().ok()?;
  let f2: i64 = f2.trim().parse().ok()?;
  let fits = f1.checked_mul(f2) == Some(problem.ac) && f1.checked_add(f2) == Some(problem.b);
  fits.then_some(FactorPair { factor1: f1, factor2: f2 })
}

fn find_factors(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let (ac, b) = (problem.ac, problem.b);
  let expected = || {
    lang.pick(
      format!("Find factors of {ac} that sum to {b}"),
      format!("Encuentre factores de {ac} que sumen {b}"),
    )
  };
  let LearnerInput::FactorPair { f1, f2 } = input else {
    return Err(expected());
  };
  let pair = factor_pair(problem, f1, f2).ok_or_else(expected)?;
  Ok(ProblemUpdate { factors: Some(pair), ..Default::default() })
}

/// Two adjoining parenthesized factors, led by the GCF when there is one.
fn binomial_form_ok(text: &str, total_gcf: i64) -> bool {
  text.contains(")(") && (total_gcf <= 1 || text.trim().starts_with(&total_gcf.to_string()))
}

fn area_model(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let expected = || {
    lang
      .pick(
        "Identify factors, fill the box, calculate GCFs, and write the final factored form (including the initial GCF).",
        "Identifique factores, llene la caja, calcule los MCD y escriba la forma factorizada final (incluyendo el MCD inicial).",
      )
      .to_string()
  };
  let LearnerInput::AreaModel { f1, f2, area, final_binomials } = input else {
    return Err(expected());
  };
  let pair = factor_pair(problem, f1, f2).ok_or_else(expected)?;

  let x1 = format!("{}x", pair.factor1);
  let x2 = format!("{}x", pair.factor2);
  let corners = structurally_equal(&area.tl, &format!("{}x^2", problem.a))
    && structurally_equal(&area.br, &problem.c.to_string());
  let sides = (structurally_equal(&area.tr, &x1) && structurally_equal(&area.bl, &x2))
    || (structurally_equal(&area.tr, &x2) && structurally_equal(&area.bl, &x1));

  if corners && sides && area.labels_filled() && binomial_form_ok(final_binomials, problem.total_gcf) {
    Ok(ProblemUpdate {
      factors: Some(pair),
      area_box: Some(area.clone()),
      final_binomials: Some(final_binomials.clone()),
      ..Default::default()
    })
  } else {
    Err(expected())
  }
}

fn work_method(input: &LearnerInput, lang: Language) -> Checked {
  let expected = || {
    lang
      .pick(
        "Rewrite splitting the middle term and show grouping",
        "Reescriba dividiendo el término medio y muestre la agrupación",
      )
      .to_string()
  };
  let text = text_of(input).ok_or_else(expected)?;
  let start = text.find('(').ok_or_else(expected)?;
  Ok(ProblemUpdate {
    rewritten: Some(text.to_string()),
    grouped: Some(text[start..].trim().to_string()),
    ..Default::default()
  })
}

fn final_binomials(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let g = problem.total_gcf;
  let expected = || {
    if g > 1 {
      lang.pick(
        format!("Write factors including the starting GCF of {g}"),
        format!("Escriba los factores incluyendo el MCD inicial de {g}"),
      )
    } else {
      lang.pick("Write final binomial factors", "Escriba los factores binomiales finales").to_string()
    }
  };
  let text = text_of(input).ok_or_else(expected)?;
  if !binomial_form_ok(text, g) {
    return Err(expected());
  }
  Ok(ProblemUpdate { final_binomials: Some(text.to_string()), ..Default::default() })
}

fn set_to_zero(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let g = problem.total_gcf;
  let expected = || {
    if g > 1 {
      lang.pick(
        format!("Set all parts to zero, including the GCF: {g}=0"),
        format!("Establezca todas las partes en cero, incluido el MCD: {g}=0"),
      )
    } else {
      lang.pick("Set each binomial factor to zero", "Establezca cada factor binomial en cero").to_string()
    }
  };
  let text = text_of(input).ok_or_else(expected)?;
  // One equation per binomial, plus one for a numeric GCF factor.
  let needed = if g > 1 { 3 } else { 2 };
  if !(text.contains("=0") && text.matches('=').count() >= needed) {
    return Err(expected());
  }
  Ok(ProblemUpdate { zero_equations: Some(text.to_string()), ..Default::default() })
}

fn solve_linear(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let g = problem.total_gcf;
  let expected = || {
    if g > 1 {
      lang.pick(
        format!("Include the GCF solution check: {g}=0 is false."),
        format!("Incluya la verificación de la solución del MCD: {g}=0 es falso (false)."),
      )
    } else {
      lang
        .pick("Solve each linear equation for x", "Resuelva cada ecuación lineal para x")
        .to_string()
    }
  };
  let text = text_of(input).ok_or_else(expected)?;
  let ok = if g > 1 {
    text.to_lowercase().contains("false")
  } else {
    !text.trim().is_empty()
  };
  if !ok {
    return Err(expected());
  }
  Ok(ProblemUpdate { solved_steps: Some(text.to_string()), ..Default::default() })
}

fn enter_zeros(problem: &ProblemState, input: &LearnerInput, lang: Language) -> Checked {
  let expected = || {
    lang
      .pick(
        "Find the real x values only (ignore false ones)",
        "Encuentre solo los valores reales de x (ignore los falsos)",
      )
      .to_string()
  };
  let text = text_of(input).ok_or_else(expected)?;

  // Roots of the original, unreduced equation.
  let g = problem.total_gcf.max(1);
  let actual = solve(problem.a * g, problem.b * g, problem.c * g);

  // A blank answer means "no real roots".
  let mut given: Vec<f64> = if text.trim().is_empty() {
    Vec::new()
  } else {
    text.split(',').map(parse_numeric).collect::<Option<Vec<_>>>().ok_or_else(expected)?
  };
  given.sort_by(f64::total_cmp);

  let same = given.len() == actual.len() && given.iter().zip(&actual).all(|(x, y)| numerically_equal(*x, *y));
  if !same {
    return Err(expected());
  }
  Ok(ProblemUpdate::default())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entered(text: &str, mode: Mode, method: Method) -> ProblemState {
    let mut p = ProblemState::new(mode, method);
    match validate(Step::EnterExpression, &p, &LearnerInput::text(text), Language::En) {
      Verdict::Accept { update, .. } => p.merge(update),
      Verdict::Reject(r) => panic!("expression rejected: {r:?}"),
    }
    p
  }

  fn accept(step: Step, p: &mut ProblemState, input: LearnerInput) -> Step {
    match validate(step, p, &input, Language::En) {
      Verdict::Accept { update, next } => {
        p.merge(update);
        next
      }
      Verdict::Reject(r) => panic!("{step:?} rejected {input:?}: {r:?}"),
    }
  }

  fn rejects(step: Step, p: &ProblemState, input: LearnerInput) -> Rejection {
    match validate(step, p, &input, Language::En) {
      Verdict::Reject(r) => r,
      v => panic!("{step:?} accepted {input:?}: {v:?}"),
    }
  }

  fn pair(f1: &str, f2: &str) -> LearnerInput {
    LearnerInput::FactorPair { f1: f1.into(), f2: f2.into() }
  }

  fn coefficients(a: &str, b: &str, c: &str) -> LearnerInput {
    LearnerInput::Coefficients { a: a.into(), b: b.into(), c: c.into() }
  }

  #[test]
  fn entry_records_coefficients_and_gcf() {
    let p = entered("2x^2+10x+12=0", Mode::Solving, Method::Grouping);
    assert_eq!((p.a, p.b, p.c, p.ac, p.total_gcf), (2, 10, 12, 24, 2));
    assert_eq!(p.raw(), "2x^2+10x+12");
  }

  #[test]
  fn entry_branches_on_gcf() {
    let p = ProblemState::default();
    let next = |text: &str| match validate(Step::EnterExpression, &p, &LearnerInput::text(text), Language::En) {
      Verdict::Accept { next, .. } => next,
      Verdict::Reject(r) => panic!("{r:?}"),
    };
    assert_eq!(next("x^2+5x+6"), Step::IdentifyAbc);
    assert_eq!(next("2x^2+10x+12"), Step::FactorGcfTotal);
  }

  #[test]
  fn entry_rejects_non_standard_form() {
    let r = rejects(Step::EnterExpression, &ProblemState::default(), LearnerInput::text("bad input"));
    assert_eq!(r.expected, "Enter expression in standard form");
    assert_eq!(r.submitted, "bad input");
  }

  #[test]
  fn gcf_step_expects_factored_template() {
    let mut p = entered("2x^2+10x+12", Mode::Factoring, Method::Grouping);
    rejects(Step::FactorGcfTotal, &p, LearnerInput::text("2x^2+10x+12"));
    rejects(Step::FactorGcfTotal, &p, LearnerInput::text("2(x^2+6+5x)"));
    let next = accept(Step::FactorGcfTotal, &mut p, LearnerInput::text("2( x^2 + 5x + 6 )"));
    assert_eq!(next, Step::IdentifyAbc);
    assert_eq!((p.a, p.b, p.c, p.ac), (1, 5, 6, 6));
    assert_eq!(p.reduced_raw.as_deref(), Some("2( x^2 + 5x + 6 )"));
  }

  #[test]
  fn gcf_template_signs_and_units() {
    assert_eq!(gcf_template(2, 1, 5, 6), "2(x^2+5x+6)");
    assert_eq!(gcf_template(3, -1, 1, -2), "3(-x^2+1x-2)");
    assert_eq!(gcf_template(1, 2, -3, 0), "2x^2-3x+0");
  }

  #[test]
  fn gcf_step_accepts_negative_lead_with_unit_middle() {
    let mut p = entered("-3x^2+3x-6", Mode::Factoring, Method::Grouping);
    accept(Step::FactorGcfTotal, &mut p, LearnerInput::text("3(-x^2+x-2)"));
    assert_eq!((p.a, p.b, p.c), (-1, 1, -2));
  }

  #[test]
  fn gcf_step_accepts_spaced_equation_form() {
    let mut p = entered("2x^2+10x+12", Mode::Factoring, Method::Grouping);
    assert_eq!(accept(Step::FactorGcfTotal, &mut p, LearnerInput::text("2(x^2+5x+6) = 0")), Step::IdentifyAbc);
  }

  #[test]
  fn gcf_step_without_common_factor_accepts_original() {
    let mut p = entered("x^2+5x+6", Mode::Factoring, Method::Grouping);
    accept(Step::FactorGcfTotal, &mut p, LearnerInput::text("x^2+5x+6=0"));
    assert_eq!((p.a, p.b, p.c), (1, 5, 6));
  }

  #[test]
  fn coefficients_compare_numerically() {
    let mut p = entered("x^2-5x+6", Mode::Factoring, Method::Grouping);
    rejects(Step::IdentifyAbc, &p, coefficients("1", "5", "6"));
    rejects(Step::IdentifyAbc, &p, coefficients("1", "-5", "six"));
    rejects(Step::IdentifyAbc, &p, LearnerInput::text("1,-5,6"));
    assert_eq!(accept(Step::IdentifyAbc, &mut p, coefficients("2/2", "-5.0", " 6 ")), Step::MultiplyAc);
  }

  #[test]
  fn ac_product() {
    let mut p = entered("x^2+5x+6", Mode::Factoring, Method::Grouping);
    rejects(Step::MultiplyAc, &p, LearnerInput::text("5"));
    assert_eq!(accept(Step::MultiplyAc, &mut p, LearnerInput::text("6")), Step::FindFactors);
  }

  #[test]
  fn factor_pair_needs_product_and_sum() {
    let mut p = entered("x^2+5x+6", Mode::Factoring, Method::Grouping);
    let before = p.clone();
    let r = rejects(Step::FindFactors, &p, pair("1", "6"));
    assert_eq!(r.expected, "Find factors of 6 that sum to 5");
    rejects(Step::FindFactors, &p, pair("2.0", "3"));
    assert_eq!(p, before);
    assert_eq!(accept(Step::FindFactors, &mut p, pair("3", "2")), Step::WorkMethod);
    assert_eq!(p.factors, Some(FactorPair { factor1: 3, factor2: 2 }));
  }

  #[test]
  fn work_method_only_needs_a_parenthesis() {
    let mut p = entered("x^2+5x+6", Mode::Factoring, Method::Grouping);
    rejects(Step::WorkMethod, &p, LearnerInput::text("x^2+2x+3x+6"));
    let next = accept(Step::WorkMethod, &mut p, LearnerInput::text("x^2+2x+3x+6 = (x^2+2x)+(3x+6)"));
    assert_eq!(next, Step::FinalBinomials);
    assert_eq!(p.grouped.as_deref(), Some("(x^2+2x)+(3x+6)"));
  }

  #[test]
  fn final_binomials_respect_gcf_prefix() {
    let p = entered("2x^2+10x+12", Mode::Factoring, Method::Grouping);
    rejects(Step::FinalBinomials, &p, LearnerInput::text("(x+2)(x+3)"));
    rejects(Step::FinalBinomials, &p, LearnerInput::text("2(x+2)+(x+3)"));
    let mut p2 = p.clone();
    assert_eq!(accept(Step::FinalBinomials, &mut p2, LearnerInput::text(" 2(x+2)(x+3)")), Step::Complete);
  }

  #[test]
  fn final_binomials_lead_to_solving_in_solving_mode() {
    let mut p = entered("x^2+5x+6", Mode::Solving, Method::Grouping);
    assert_eq!(accept(Step::FinalBinomials, &mut p, LearnerInput::text("(x+2)(x+3)")), Step::SetToZero);
  }

  #[test]
  fn zero_equations_count_equals_signs() {
    let p = entered("2x^2+10x+12", Mode::Solving, Method::Grouping);
    rejects(Step::SetToZero, &p, LearnerInput::text("x+2=0, x+3=0"));
    rejects(Step::SetToZero, &p, LearnerInput::text("2 = 0, x+2 = 0, x+3 = 0"));
    let mut p2 = p.clone();
    assert_eq!(accept(Step::SetToZero, &mut p2, LearnerInput::text("2=0, x+2=0, x+3=0")), Step::SolveLinear);

    let mut q = entered("x^2+5x+6", Mode::Solving, Method::Grouping);
    accept(Step::SetToZero, &mut q, LearnerInput::text("x+2=0, x+3=0"));
  }

  #[test]
  fn solve_linear_requires_false_with_gcf() {
    let p = entered("2x^2+10x+12", Mode::Solving, Method::Grouping);
    rejects(Step::SolveLinear, &p, LearnerInput::text("x=-2, x=-3"));
    let mut p2 = p.clone();
    assert_eq!(accept(Step::SolveLinear, &mut p2, LearnerInput::text("2=0 FALSE, x=-2, x=-3")), Step::EnterZeros);

    let q = entered("x^2+5x+6", Mode::Solving, Method::Grouping);
    rejects(Step::SolveLinear, &q, LearnerInput::text("   "));
    let mut q2 = q.clone();
    accept(Step::SolveLinear, &mut q2, LearnerInput::text("x=-2"));
  }

  #[test]
  fn roots_must_match_exactly_in_count() {
    let mut p = entered("x^2+5x+6", Mode::Solving, Method::Grouping);
    rejects(Step::EnterZeros, &p, LearnerInput::text("-2"));
    rejects(Step::EnterZeros, &p, LearnerInput::text("-3,-2,-2"));
    rejects(Step::EnterZeros, &p, LearnerInput::text("-3,x"));
    rejects(Step::EnterZeros, &p, LearnerInput::text(""));
    assert_eq!(accept(Step::EnterZeros, &mut p, LearnerInput::text(" -2 , -3 ")), Step::Complete);
  }

  #[test]
  fn fractional_roots_accept_fractions_and_decimals() {
    let p = entered("2x^2+x-1", Mode::Solving, Method::Grouping);
    let mut p1 = p.clone();
    accept(Step::EnterZeros, &mut p1, LearnerInput::text("1/2, -1"));
    let mut p2 = p.clone();
    accept(Step::EnterZeros, &mut p2, LearnerInput::text("-1,0.5"));
  }

  #[test]
  fn blank_roots_match_no_real_roots() {
    let mut p = entered("x^2+0x+1", Mode::Solving, Method::Grouping);
    accept(Step::EnterZeros, &mut p, LearnerInput::text(" "));
  }

  fn area_input(f1: &str, f2: &str, cells: [&str; 4], final_text: &str) -> LearnerInput {
    LearnerInput::AreaModel {
      f1: f1.into(),
      f2: f2.into(),
      area: AreaBox {
        tl: cells[0].into(),
        tr: cells[1].into(),
        bl: cells[2].into(),
        br: cells[3].into(),
        row1_gcf: "x".into(),
        row2_gcf: "3".into(),
        col1_gcf: "x".into(),
        col2_gcf: "2".into(),
      },
      final_binomials: final_text.into(),
    }
  }

  #[test]
  fn area_model_bundle_skips_to_zero_in_solving_mode() {
    let mut p = entered("x^2+5x+6", Mode::Solving, Method::AreaModel);
    let input = area_input("2", "3", ["x^2", "3x", "2x", "6"], "(x+2)(x+3)");
    assert_eq!(accept(Step::FindFactors, &mut p, input), Step::SetToZero);
    assert_eq!(p.final_binomials.as_deref(), Some("(x+2)(x+3)"));
    assert!(p.area_box.is_some());
  }

  #[test]
  fn area_model_bundle_goes_to_zero_in_factoring_mode_too() {
    let mut p = entered("x^2+5x+6", Mode::Factoring, Method::AreaModel);
    let input = area_input("2", "3", ["1x^2", "2x", "3x", "6"], "(x+2)(x+3)");
    assert_eq!(accept(Step::FindFactors, &mut p, input), Step::SetToZero);
  }

  #[test]
  fn area_model_checks_every_part() {
    let p = entered("x^2+5x+6", Mode::Solving, Method::AreaModel);
    rejects(Step::FindFactors, &p, area_input("1", "6", ["x^2", "x", "6x", "6"], "(x+1)(x+6)"));
    rejects(Step::FindFactors, &p, area_input("2", "3", ["x^2", "3x", "2x", "5"], "(x+2)(x+3)"));
    rejects(Step::FindFactors, &p, area_input("2", "3", ["x^2", "3x", "3x", "6"], "(x+2)(x+3)"));
    rejects(Step::FindFactors, &p, area_input("2", "3", ["x^2", "3x", "2x", "6"], "(x+2)*(x+3)"));
    rejects(Step::FindFactors, &p, pair("2", "3"));

    let mut blank_label = area_input("2", "3", ["x^2", "3x", "2x", "6"], "(x+2)(x+3)");
    if let LearnerInput::AreaModel { area, .. } = &mut blank_label {
      area.col2_gcf = " ".into();
    }
    let r = rejects(Step::FindFactors, &p, blank_label);
    assert_eq!(r.submitted, "Factors: 2, 3 | Box: x^2,3x | Factored: (x+2)(x+3)");
  }

  #[test]
  fn area_model_after_gcf_needs_gcf_in_final_form() {
    let mut p = entered("2x^2+10x+12", Mode::Solving, Method::AreaModel);
    accept(Step::FactorGcfTotal, &mut p, LearnerInput::text("2(x^2+5x+6)"));
    rejects(Step::FindFactors, &p, area_input("2", "3", ["x^2", "3x", "2x", "6"], "(x+2)(x+3)"));
    accept(Step::FindFactors, &mut p, area_input("2", "3", ["x^2", "3x", "2x", "6"], "2(x+2)(x+3)"));
  }

  #[test]
  fn spanish_descriptions() {
    let p = entered("x^2+5x+6", Mode::Factoring, Method::Grouping);
    match validate(Step::MultiplyAc, &p, &LearnerInput::text("7"), Language::Es) {
      Verdict::Reject(r) => assert_eq!(r.expected, "Multiplique a por c"),
      v => panic!("{v:?}"),
    }
  }

  #[test]
  fn prologue_steps_never_accept() {
    let p = ProblemState::default();
    for step in [Step::ChooseLanguage, Step::ChooseMode, Step::ChooseMethod, Step::Complete] {
      assert!(!validate(step, &p, &LearnerInput::text("x"), Language::En).is_accept());
    }
  }
}
