use crate::error::AuditError;
use crate::security::compliance::{RuleAction, SafetyViolation, Severity};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One line of the compliance audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub action: RuleAction,
    pub rule: String,
    pub severity: Severity,
    pub text: String,
    pub position: usize,
}

impl AuditEntry {
    pub fn from_violation(violation: &SafetyViolation) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: violation.action,
            rule: violation.rule.clone(),
            severity: violation.severity,
            text: violation.matched_text.clone(),
            position: violation.position,
        }
    }
}

/// Durable destination for audit entries. Implementations must be append-only.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;

    /// Human-readable name of this sink
    fn name(&self) -> &str;
}

/// Discards every entry; the checker's in-memory log still keeps them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _entry: &AuditEntry) -> Result<(), AuditError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(entry.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Appends one JSON object per line to a file.
#[derive(Debug)]
pub struct JsonlAuditSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // Single write per entry: a crash can leave at most one partial line.
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

/// Write `entries` to `path` as JSONL, replacing any existing file.
pub fn write_audit_log(path: &Path, entries: &[AuditEntry]) -> Result<usize, AuditError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut content = String::new();
    for entry in entries {
        content.push_str(&serde_json::to_string(entry)?);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(entries.len())
}

/// Read a JSONL audit log, skipping lines that do not parse (for example a
/// partial trailing line left by a crash).
pub fn read_audit_log(path: &Path) -> Result<Vec<AuditEntry>, AuditError> {
    let raw = fs::read_to_string(path)?;
    let mut entries = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AuditEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                tracing::warn!(line = index + 1, %error, "skipping malformed audit line");
            }
        }
    }
    Ok(entries)
}
