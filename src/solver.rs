//! Real roots of `ax^2 + bx + c` via the discriminant.

/// Roots closer than this are reported once (the repeated-root case).
const DUPLICATE_EPSILON: f64 = 1e-9;

/// Real roots sorted ascending: empty when the discriminant is negative, one
/// element for a repeated root, two otherwise.
///
/// `a` must be non-zero; parsed equations guarantee it.
pub fn solve(a: i64, b: i64, c: i64) -> Vec<f64> {
  debug_assert_ne!(a, 0, "solve() called with a == 0");
  if a == 0 {
    return Vec::new();
  }
  let (a, b, c) = (a as f64, b as f64, c as f64);
  let discriminant = b * b - 4.0 * a * c;
  if discriminant < 0.0 {
    return Vec::new();
  }
  let root = discriminant.sqrt();
  let mut roots = vec![(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)];
  roots.sort_by(f64::total_cmp);
  roots.dedup_by(|x, y| (*x - *y).abs() < DUPLICATE_EPSILON);
  roots
}
