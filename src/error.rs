use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `mnex`.
///
/// Only static configuration can fail hard. Content rejection is a normal
/// outcome carried by `ComplianceCheck`, never an error here.
#[derive(Debug, Error)]
pub enum MnexError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Audit log ───────────────────────────────────────────────────────
    #[error("audit: {0}")]
    Audit(#[from] AuditError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to parse {format} document: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Audit errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, MnexError>;
