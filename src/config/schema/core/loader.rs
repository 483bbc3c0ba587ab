use super::Config;
use crate::error::ConfigError;
use crate::persona::PersonaCorpus;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let mnex_dir = home.join(".mnex");
        let config_path = mnex_dir.join("config.toml");

        if !mnex_dir.exists() {
            fs::create_dir_all(&mnex_dir).context("Failed to create .mnex directory")?;
            fs::create_dir_all(mnex_dir.join("workspace"))
                .context("Failed to create workspace directory")?;
        }

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                workspace_dir: mnex_dir.join("workspace"),
                ..Self::default()
            };
            config.save()?;
            tracing::info!(path = %config_path.display(), "wrote default config");
            Ok(config)
        }
    }

    /// Load an explicit config file. The workspace directory sits next to it.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        config.workspace_dir = path
            .parent()
            .map_or_else(|| PathBuf::from("workspace"), |dir| dir.join("workspace"));
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn audit_log_path(&self) -> PathBuf {
        if self.audit.log_file.is_absolute() {
            self.audit.log_file.clone()
        } else {
            self.workspace_dir.join(&self.audit.log_file)
        }
    }

    /// The configured persona corpus, or the built-in one. Relative corpus
    /// paths resolve against the directory holding config.toml.
    pub fn load_corpus(&self) -> Result<PersonaCorpus, ConfigError> {
        let Some(corpus_path) = &self.corpus_path else {
            return PersonaCorpus::builtin();
        };

        let resolved = if corpus_path.is_absolute() {
            corpus_path.clone()
        } else {
            self.config_path
                .parent()
                .map_or_else(|| corpus_path.clone(), |dir| dir.join(corpus_path))
        };
        tracing::debug!(path = %resolved.display(), "loading persona corpus");
        PersonaCorpus::load(&resolved)
    }
}
