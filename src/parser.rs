//! Standard-form quadratic parser.
//!
//! Accepts exactly `[sign][digits]x^2[sign][digits]x[sign][digits]` with an
//! optional trailing `=0`, after whitespace removal and lowercasing. Anything
//! else is reported as "not in standard form"; nothing is silently coerced.

use thiserror::Error;

use crate::domain::CanonicalEquation;
use crate::normalize::strip_equation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("expression is not in standard form ax^2+bx+c: {0:?}")]
  NotStandardForm(String),
  #[error("coefficient {0:?} is out of range")]
  CoefficientOutOfRange(String),
  #[error("leading coefficient must not be zero")]
  ZeroLeadingCoefficient,
}

pub fn parse(text: &str) -> Result<CanonicalEquation, ParseError> {
  let compact: String = text
    .chars()
    .filter(|c| !c.is_whitespace())
    .flat_map(char::to_lowercase)
    .collect();
  let body = strip_equation(&compact);
  let not_standard = || ParseError::NotStandardForm(text.trim().to_string());

  let (lead, rest) = body.split_once('x').ok_or_else(not_standard)?;
  let rest = rest.strip_prefix("^2").ok_or_else(not_standard)?;
  let (middle, constant) = rest.split_once('x').ok_or_else(not_standard)?;

  if !is_signed_digits(lead) || !is_signed_digits(middle) || !is_signed_digits(constant) {
    return Err(not_standard());
  }

  let a = variable_coefficient(lead)?;
  let b = variable_coefficient(middle)?;
  let c = match constant {
    "" => 0,
    "+" | "-" => return Err(not_standard()),
    digits => integer(digits)?,
  };
  if a == 0 {
    return Err(ParseError::ZeroLeadingCoefficient);
  }

  Ok(CanonicalEquation { a, b, c, raw: body.to_string() })
}

/// `[+-]?\d*`
fn is_signed_digits(s: &str) -> bool {
  let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
  digits.chars().all(|c| c.is_ascii_digit())
}

/// Coefficient written in front of `x^2` or `x`: bare or `+` means 1, `-` means -1.
fn variable_coefficient(s: &str) -> Result<i64, ParseError> {
  match s {
    "" | "+" => Ok(1),
    "-" => Ok(-1),
    digits => integer(digits),
  }
}

// Coefficients stay within 32 bits so products such as a*c are exact in i64.
fn integer(s: &str) -> Result<i64, ParseError> {
  s.parse::<i32>()
    .map(i64::from)
    .map_err(|_| ParseError::CoefficientOutOfRange(s.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn abc(text: &str) -> (i64, i64, i64) {
    let eq = parse(text).unwrap();
    (eq.a, eq.b, eq.c)
  }

  #[test]
  fn parses_standard_form() {
    assert_eq!(abc("2x^2+10x+12"), (2, 10, 12));
    assert_eq!(abc("x^2-5x+6"), (1, -5, 6));
    assert_eq!(abc("-x^2+x-1"), (-1, 1, -1));
    assert_eq!(abc("+3x^2-x"), (3, -1, 0));
  }

  #[test]
  fn trailing_zero_and_spacing_are_ignored() {
    assert_eq!(abc("2x^2+10x+12=0"), abc("2x^2+10x+12"));
    assert_eq!(abc(" 2X^2 + 10x + 12 = 0"), (2, 10, 12));
    assert_eq!(parse("X^2 - 5x + 6 = 0").unwrap().raw, "x^2-5x+6");
  }

  #[test]
  fn rejects_other_shapes() {
    for bad in [
      "bad input",
      "",
      "5x+6+x^2",
      "x**2+5x+6",
      "5x+6",
      "x^2+6",
      "x^2+2.5x+1",
      "x^2+5x+",
      "x^2+5x+6=1",
      "x^3+5x+6",
      "x^2+5x+6x",
    ] {
      assert!(
        matches!(parse(bad), Err(ParseError::NotStandardForm(_))),
        "{bad:?} should not parse"
      );
    }
  }

  #[test]
  fn rejects_zero_leading_coefficient() {
    assert_eq!(parse("0x^2+5x+6"), Err(ParseError::ZeroLeadingCoefficient));
  }

  #[test]
  fn rejects_huge_coefficients() {
    assert!(matches!(
      parse("99999999999x^2+x+1"),
      Err(ParseError::CoefficientOutOfRange(_))
    ));
  }
}
