use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Append every compliance violation to `log_file`
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// JSONL file; relative paths resolve against the workspace directory
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("audit").join("compliance.jsonl")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            log_file: default_log_file(),
        }
    }
}
