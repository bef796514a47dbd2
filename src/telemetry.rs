//! Tracing setup.
//!
//! - LOG_LEVEL sets the filter, either a bare level ("debug") or full directives
//!   such as "info,tutor=debug,quadramaster=debug,tower_http=info".
//! - LOG_FORMAT picks "pretty" (default) or "json".
//!
//! Targets stay visible in the output: "quadramaster" for transport and
//! startup, "tutor" for learner-facing events (verdicts, hints).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,quadramaster=debug,tutor=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // The json and pretty builders are different types, so init in each arm.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
