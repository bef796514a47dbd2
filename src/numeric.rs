//! Numeric equivalence helpers: tolerant number parsing (fractions included),
//! GCD/GCF of coefficients, and tolerance-based comparison.
//!
//! Nothing here returns an error. A malformed number simply makes a
//! comparison come out "not equal", so a bad sub-field degrades to a normal
//! rejected step.

/// Default tolerance for comparing learner numbers with expected values.
pub const TOLERANCE: f64 = 1e-4;

/// Parse an integer, a decimal, or a simple `num/den` fraction.
///
/// Returns `None` for anything else, including results that are not finite
/// (e.g. `1/0`).
pub fn parse_numeric(text: &str) -> Option<f64> {
  let s = text.trim();
  let value = match s.split_once('/') {
    Some((num, den)) => parse_plain(num)? / parse_plain(den)?,
    None => parse_plain(s)?,
  };
  value.is_finite().then_some(value)
}

// Only digits, one optional sign and a decimal point; keeps `f64::from_str`
// from accepting words like "inf" or exponents.
fn parse_plain(text: &str) -> Option<f64> {
  let s = text.trim();
  let body = s.strip_prefix(['+', '-']).unwrap_or(s);
  if body.is_empty() || !body.chars().any(|c| c.is_ascii_digit()) {
    return None;
  }
  if !body.chars().all(|c| c.is_ascii_digit() || c == '.') {
    return None;
  }
  s.parse::<f64>().ok()
}

/// Iterative Euclid on absolute values. `gcd(x, 0) == |x|`.
pub fn gcd(x: i64, y: i64) -> u64 {
  let (mut u, mut v) = (x.unsigned_abs(), y.unsigned_abs());
  while v != 0 {
    let t = v;
    v = u % v;
    u = t;
  }
  u
}

/// Greatest common factor of three coefficients, `gcd(|a|, gcd(|b|, |c|))`.
pub fn gcf(a: i64, b: i64, c: i64) -> i64 {
  let g = gcd(b, c);
  let g = gcd(a, i64::try_from(g).unwrap_or(i64::MAX));
  i64::try_from(g).unwrap_or(i64::MAX)
}

/// Anything that can stand on either side of a numeric comparison:
/// plain numbers or learner text.
pub trait Numeric {
  fn to_numeric(&self) -> Option<f64>;
}

impl Numeric for f64 {
  fn to_numeric(&self) -> Option<f64> {
    Some(*self)
  }
}

impl Numeric for i64 {
  fn to_numeric(&self) -> Option<f64> {
    Some(*self as f64)
  }
}

impl Numeric for str {
  fn to_numeric(&self) -> Option<f64> {
    parse_numeric(self)
  }
}

impl Numeric for String {
  fn to_numeric(&self) -> Option<f64> {
    parse_numeric(self)
  }
}

impl<T: Numeric + ?Sized> Numeric for &T {
  fn to_numeric(&self) -> Option<f64> {
    (**self).to_numeric()
  }
}

/// `|x - y| < TOLERANCE`, parsing text first. Unparsable input is never equal.
pub fn numerically_equal<X, Y>(x: X, y: Y) -> bool
where
  X: Numeric,
  Y: Numeric,
{
  numerically_equal_within(x, y, TOLERANCE)
}

pub fn numerically_equal_within<X, Y>(x: X, y: Y, tolerance: f64) -> bool
where
  X: Numeric,
  Y: Numeric,
{
  match (x.to_numeric(), y.to_numeric()) {
    (Some(a), Some(b)) => (a - b).abs() < tolerance,
    _ => false,
  }
}
