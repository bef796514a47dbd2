//! Application state: in-memory session store, hint prompts/limits, OpenAI client,
//! and the practice-problem bank.
//!
//! Sessions are only mutated under the store's write lock, one operation at a
//! time. Hint tasks re-take the lock just to apply their result.
//!
//! The store is bounded: sessions idle past `idle_ttl_secs` are swept, and
//! creating a session beyond `max_sessions` evicts the least recently touched.

use std::{collections::HashMap, sync::Arc, time::{Duration, Instant}};

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::config::{load_tutor_config_from_env, HintSettings, Prompts, SessionSettings, TutorConfig};
use crate::openai::OpenAI;
use crate::parser::parse;
use crate::seeds::{hard_fallback_problem, seed_practice_problems};
use crate::session::{Session, SessionError};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    pub practice: Vec<String>,
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
    pub hints: HintSettings,
    pub session_limits: SessionSettings,
}

impl AppState {
    /// Build state from env: load config and init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_tutor_config_from_env().unwrap_or_default();

        // Build optional OpenAI client (if API key present).
        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "quadramaster", base_url = %oa.base_url, hint_model = %oa.hint_model, "OpenAI hints enabled.");
        } else {
            info!(target: "quadramaster", "OpenAI disabled (no OPENAI_API_KEY). Using static hints.");
        }

        Self::with_config(cfg, openai)
    }

    /// Build state from an explicit config; no environment access.
    pub fn with_config(cfg: TutorConfig, openai: Option<OpenAI>) -> Self {
        let mut practice = Vec::new();
        // Config bank first, then built-in seeds; skip anything the parser refuses.
        for text in cfg.practice.into_iter().chain(seed_practice_problems()) {
            match parse(&text) {
                Ok(_) if !practice.contains(&text) => practice.push(text),
                Ok(_) => {}
                Err(e) => {
                    error!(target: "quadramaster", %text, error = %e, "Skipping practice item: not in standard form.");
                }
            }
        }
        info!(target: "quadramaster", practice = practice.len(), "Practice bank ready");

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            practice,
            openai,
            prompts: cfg.prompts,
            hints: cfg.hints,
            session_limits: cfg.sessions,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn create_session(&self) -> Session {
        let session = Session::new();
        let mut sessions = self.sessions.write().await;
        let idle = evict_idle(&mut sessions, Instant::now(), self.session_limits.idle_ttl());
        let capped = evict_to_cap(&mut sessions, self.session_limits.max_sessions.saturating_sub(1));
        if idle + capped > 0 {
            debug!(target: "quadramaster", idle, capped, "Evicted sessions on create");
        }
        sessions.insert(session.id, session.clone());
        info!(target: "tutor", session = %session.id, live = sessions.len(), "Session created");
        session
    }

    /// Drop sessions idle at `now` for longer than the configured TTL.
    pub async fn prune_idle_sessions_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let removed = evict_idle(&mut sessions, now, self.session_limits.idle_ttl());
        if removed > 0 {
            info!(target: "quadramaster", removed, live = sessions.len(), "Swept idle sessions");
        }
        removed
    }

    /// Periodic idle sweep for the lifetime of the process.
    pub fn spawn_session_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let state = Arc::clone(self);
        let every = Duration::from_secs(self.session_limits.sweep_interval_secs.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                state.prune_idle_sessions_at(Instant::now()).await;
            }
        })
    }

    pub async fn get_session(&self, id: Uuid) -> Result<Session, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))
    }

    /// Run `f` on the session under the write lock; counts as activity.
    pub async fn update_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        session.touch();
        Ok(f(session))
    }

    /// A random practice expression in standard form.
    pub fn sample_practice(&self) -> String {
        self.practice
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(hard_fallback_problem)
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, Session>, now: Instant, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| now.saturating_duration_since(s.last_touched) < ttl);
    before - sessions.len()
}

/// Remove least recently touched sessions until at most `cap` remain.
fn evict_to_cap(sessions: &mut HashMap<Uuid, Session>, cap: usize) -> usize {
    let mut removed = 0;
    while sessions.len() > cap {
        let Some(oldest) = sessions.values().min_by_key(|s| s.last_touched).map(|s| s.id) else {
            break;
        };
        sessions.remove(&oldest);
        removed += 1;
    }
    removed
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
