//! Built-in practice expressions so the tutor is useful without any config.
//!
//! Every entry factors over the integers; the mix covers positive and
//! negative middle terms, a repeated root, and common factors of 2 and 3.

pub fn seed_practice_problems() -> Vec<String> {
  [
    "x^2+5x+6",
    "x^2-5x+6",
    "x^2+x-12",
    "x^2-2x-15",
    "x^2+6x+9",
    "2x^2+7x+3",
    "3x^2-10x+8",
    "2x^2+10x+12",
    "3x^2+3x-18",
    "4x^2-4x-24",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

/// Last resort when every configured and seeded entry was rejected.
pub fn hard_fallback_problem() -> String {
  "x^2+5x+6".into()
}
