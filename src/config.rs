//! Loading tutor configuration (hint prompts, hint limits, practice bank) from TOML.
//!
//! See `TutorConfig`, `Prompts` and `HintSettings` for expected schema.
//!
//! ```toml
//! practice = ["x^2+7x+12", "3x^2+9x+6"]
//!
//! [prompts]
//! hint_system = "..."
//! hint_user_template = "Equation: {equation} ..."
//!
//! [hints]
//! timeout_secs = 8
//!
//! [sessions]
//! idle_ttl_secs = 1800
//! max_sessions = 5000
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Language;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TutorConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub hints: HintSettings,
  #[serde(default)]
  pub sessions: SessionSettings,
  /// Extra practice expressions in standard form.
  #[serde(default)]
  pub practice: Vec<String>,
}

/// Prompts sent to the hint model. Placeholders: `{equation}`, `{step}`,
/// `{expected}`, `{submitted}`, `{language}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub hint_system: String,
  pub hint_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      hint_system: "You are a patient algebra tutor for secondary school students. Never give the answer directly.".into(),
      hint_user_template: "The student is working on a quadratic equation: {equation}.\nThey are currently on the step: \"{step}\".\nThe goal of this step is to: {expected}.\nThe student entered: \"{submitted}\", which is incorrect.\nProvide a helpful, encouraging hint. Do not give the answer directly. Keep it under 2 sentences. Reply in {language}.".into(),
    }
  }
}

/// Limits and static fallbacks for the hint service.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HintSettings {
  /// Upper bound for one hint request, on top of the HTTP client timeout.
  pub timeout_secs: u64,
  /// Used when the service fails or is not configured.
  pub fallback_en: String,
  pub fallback_es: String,
  /// Used when the service answers with nothing.
  pub empty_en: String,
  pub empty_es: String,
}

impl Default for HintSettings {
  fn default() -> Self {
    Self {
      timeout_secs: 10,
      fallback_en: "Check your math and try again!".into(),
      fallback_es: "¡Revisa tus cálculos e inténtalo de nuevo!".into(),
      empty_en: "Try checking your calculations again!".into(),
      empty_es: "¡Intenta revisar tus cálculos otra vez!".into(),
    }
  }
}

impl HintSettings {
  pub fn fallback(&self, lang: Language) -> &str {
    lang.pick(&self.fallback_en, &self.fallback_es)
  }

  pub fn empty(&self, lang: Language) -> &str {
    lang.pick(&self.empty_en, &self.empty_es)
  }
}

/// Bounds on the in-memory session store.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
  /// Sessions untouched for this long are dropped.
  pub idle_ttl_secs: u64,
  /// Hard cap; the least recently touched session goes first.
  pub max_sessions: usize,
  /// How often the background sweep runs.
  pub sweep_interval_secs: u64,
}

impl Default for SessionSettings {
  fn default() -> Self {
    Self { idle_ttl_secs: 3600, max_sessions: 10_000, sweep_interval_secs: 60 }
  }
}

impl SessionSettings {
  pub fn idle_ttl(&self) -> Duration {
    Duration::from_secs(self.idle_ttl_secs)
  }
}

/// Attempt to load `TutorConfig` from TUTOR_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_tutor_config_from_env() -> Option<TutorConfig> {
  let path = std::env::var("TUTOR_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<TutorConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quadramaster", %path, practice = cfg.practice.len(), "Loaded tutor config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quadramaster", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quadramaster", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
