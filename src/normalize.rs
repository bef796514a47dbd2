//! Textual canonicalization of learner algebra for structural comparison.
//!
//! This is not a simplifier: terms are never reordered or combined, and no
//! arithmetic is evaluated. Expected strings compared through here must
//! already be written in the order the learner is expected to produce.

/// Strip a single trailing `=0` (equation → bare expression).
pub fn strip_equation(text: &str) -> &str {
  text.strip_suffix("=0").unwrap_or(text)
}

/// Canonical form used for structural equality.
///
/// Rules are applied repeatedly until nothing changes, so the result is a
/// fixpoint: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
  let mut current: String = text
    .chars()
    .filter(|c| !c.is_whitespace())
    .flat_map(char::to_lowercase)
    .collect();
  loop {
    let next = normalize_once(&current);
    if next == current {
      return current;
    }
    current = next;
  }
}

// Every rule only ever deletes characters, so the loop above terminates.
fn normalize_once(s: &str) -> String {
  let s = strip_equation(s);
  let s = s.strip_prefix('+').unwrap_or(s);
  let s = s.replace("+-", "-").replace("-+", "-");
  drop_unit_coefficients(&s)
}

/// `1x` → `x` at the start of the text or right after a sign.
fn drop_unit_coefficients(s: &str) -> String {
  let chars: Vec<char> = s.chars().collect();
  let mut out = String::with_capacity(s.len());
  for (i, &ch) in chars.iter().enumerate() {
    let at_term_start = i == 0 || matches!(chars[i - 1], '+' | '-');
    if ch == '1' && at_term_start && chars.get(i + 1) == Some(&'x') {
      continue;
    }
    out.push(ch);
  }
  out
}

/// Two texts are structurally equivalent iff their normalized forms match.
pub fn structurally_equal(x: &str, y: &str) -> bool {
  normalize(x) == normalize(y)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn leading_plus_is_dropped() {
    assert_eq!(normalize("+x^2+2x+3"), normalize("x^2+2x+3"));
  }

  #[test]
  fn unit_coefficients_vanish() {
    assert_eq!(normalize("x^2-1x+3"), normalize("x^2-x+3"));
    assert_eq!(normalize("1x^2+1x+1"), "x^2+x+1");
    assert_eq!(normalize("x^2+11x+1"), "x^2+11x+1");
  }

  #[test]
  fn sign_runs_collapse() {
    assert_eq!(normalize("x^2+-5x-+6"), "x^2-5x-6");
    assert_eq!(normalize("2(x^2+-1x+6)"), "2(x^2-x+6)");
  }

  #[test]
  fn whitespace_case_and_trailing_zero() {
    assert_eq!(normalize(" 2X^2 + 10x + 12 = 0 "), "2x^2+10x+12");
    assert!(structurally_equal("2(x^2+5x+6)", "2( x^2 + 5x + 6 )"));
    assert!(!structurally_equal("2(x^2+5x+6)", "2(x^2+6+5x)"));
  }

  // Spaces go before `=0` is looked for, so a spaced `= 0` is stripped too,
  // and repeated `=0` suffixes all go.
  #[test]
  fn spaced_equation_suffix_is_stripped() {
    assert_eq!(normalize("2(x^2+5x+6) = 0"), "2(x^2+5x+6)");
    assert_eq!(normalize("x^2 =0 = 0"), "x^2");
    assert!(structurally_equal("2(x^2+5x+6) = 0", "2(x^2+5x+6)"));
  }

  #[test]
  fn normalization_is_idempotent() {
    let samples = [
      "",
      "+",
      "++x",
      "+-+x",
      "-+-x",
      "=0=0",
      "x = 0 = 0",
      "+1x^2 + -1x - +1",
      "1+1x",
      "2(x^2+5x+6)=0",
      "(x+2)(x+3)",
      "-1X^2",
      "+-1x",
    ];
    for s in samples {
      let once = normalize(s);
      assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
    }
  }
}
