use std::path::PathBuf;

/// Runtime configuration, resolved from `FEINPREIS_*` environment variables.
///
/// Every field has a default; an explicitly set but unparseable value is an
/// error rather than a silent fallback.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WebDriver endpoint the browser crate connects to.
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,
    pub log_level: String,

    pub targets_path: PathBuf,
    pub report_path: PathBuf,
    /// Label stamped into the report's `source` field.
    pub report_source: String,

    /// Upper bound for a single page navigation attempt.
    pub navigation_timeout_secs: u64,
    /// Upper bound for the explicit-selector strategy's element wait.
    pub selector_timeout_ms: u64,

    /// Politeness delay between targets.
    pub pacing_base_ms: u64,
    /// Random jitter added on top of the base delay, sampled per target.
    pub pacing_jitter_ms: u64,
}
