use super::super::{AuditConfig, GeneratorConfig, ProjectConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from the config location, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Persona corpus (TOML or JSON). The built-in corpus is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_path: Option<PathBuf>,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}
