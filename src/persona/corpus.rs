use crate::error::ConfigError;
use crate::persona::template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Persona every post falls back to when weighted selection yields nothing.
pub const DEFAULT_PERSONA: &str = "oracle";

/// Template used when no template is associated with the selected personas.
pub const FALLBACK_TEMPLATE: &str = "vision";

const BUILTIN_CORPUS_TOML: &str = include_str!("../../assets/default_corpus.toml");

/// Five independent [0,1] weights describing how a persona sounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneVector {
    pub cryptic: f64,
    pub warmth: f64,
    pub humor: f64,
    pub technical: f64,
    pub brevity: f64,
}

impl ToneVector {
    fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("cryptic", self.cryptic),
            ("warmth", self.warmth),
            ("humor", self.humor),
            ("technical", self.technical),
            ("brevity", self.brevity),
        ]
    }
}

/// A named voice. Immutable once the corpus is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaLayer {
    pub description: String,
    /// Short textual signature tag, e.g. `◈`.
    pub signature: String,
    pub tone_vector: ToneVector,
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Relative selection weight; the corpus does not need weights to sum to 1.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub pattern: String,
    pub personas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRulesConfig {
    pub required_disclaimer: String,
    #[serde(default)]
    pub forbidden_phrases: Vec<String>,
    #[serde(default)]
    pub approved_responses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRules {
    pub max_length: usize,
    pub rate_limit_minutes: u64,
    pub max_personas_per_post: usize,
    /// Must contain `{prefix}` and `{code}`.
    pub signature_format: String,
}

/// Persona definitions, templates and rule parameters for one generator.
///
/// Loaded once and never mutated afterwards. Maps are ordered so that
/// weighted selection walks personas in a stable order for a given seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaCorpus {
    pub vision_metaphors: Vec<String>,
    pub personas: BTreeMap<String, PersonaLayer>,
    pub templates: BTreeMap<String, TemplateSpec>,
    pub safety_rules: SafetyRulesConfig,
    pub posting_rules: PostingRules,
}

impl PersonaCorpus {
    /// The corpus shipped with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_CORPUS_TOML)
    }

    /// Load a corpus document, picking the format from the file extension
    /// (`.json` is JSON, anything else is TOML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ConfigError::Load(format!("failed reading corpus {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let corpus: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })?;
        corpus.validate()?;
        Ok(corpus)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let corpus: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        corpus.validate()?;
        Ok(corpus)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.personas.is_empty() {
            return Err(invalid("corpus defines no personas"));
        }
        if !self.personas.contains_key(DEFAULT_PERSONA) {
            return Err(invalid(format!(
                "default persona `{DEFAULT_PERSONA}` is missing"
            )));
        }

        let mut total_weight = 0.0;
        for (name, layer) in &self.personas {
            if !layer.weight.is_finite() || layer.weight < 0.0 {
                return Err(invalid(format!(
                    "persona `{name}` has invalid weight {}",
                    layer.weight
                )));
            }
            total_weight += layer.weight;

            for (axis, value) in layer.tone_vector.components() {
                if !(0.0..=1.0).contains(&value) {
                    return Err(invalid(format!(
                        "persona `{name}` tone `{axis}` must be within [0,1], got {value}"
                    )));
                }
            }
        }
        if total_weight <= 0.0 {
            return Err(invalid("persona weights must have a positive total"));
        }

        if self.vision_metaphors.is_empty() {
            return Err(invalid("vision_metaphors must not be empty"));
        }
        if let Some(metaphor) = self
            .vision_metaphors
            .iter()
            .find(|m| !template::placeholders_in(m).is_empty())
        {
            return Err(invalid(format!(
                "vision metaphor contains a placeholder: {metaphor:?}"
            )));
        }

        if !self.templates.contains_key(FALLBACK_TEMPLATE) {
            return Err(invalid(format!(
                "fallback template `{FALLBACK_TEMPLATE}` is missing"
            )));
        }
        for (name, spec) in &self.templates {
            if let Some(unknown) = spec
                .personas
                .iter()
                .find(|p| !self.personas.contains_key(p.as_str()))
            {
                return Err(invalid(format!(
                    "template `{name}` references unknown persona `{unknown}`"
                )));
            }
            let unknown = template::unknown_placeholders(&spec.pattern);
            if !unknown.is_empty() {
                return Err(invalid(format!(
                    "template `{name}` uses unknown placeholders: {}",
                    unknown.join(", ")
                )));
            }
        }

        if self.safety_rules.required_disclaimer.trim().is_empty() {
            return Err(invalid("required_disclaimer must not be empty"));
        }
        if self.posting_rules.max_personas_per_post == 0 {
            return Err(invalid("max_personas_per_post must be at least 1"));
        }
        let format = &self.posting_rules.signature_format;
        if !format.contains("{prefix}") || !format.contains("{code}") {
            return Err(invalid(
                "signature_format must contain `{prefix}` and `{code}`",
            ));
        }

        Ok(())
    }

    pub fn persona(&self, name: &str) -> Option<&PersonaLayer> {
        self.personas.get(name)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}
