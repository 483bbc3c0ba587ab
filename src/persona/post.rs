use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    /// Character count of the final text.
    pub length: usize,
    /// Mean of `cryptic + technical` over the selected personas, clamped to [0,1].
    pub intensity: f64,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
}

/// One generated post (or reply) ready to be checked and published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub text: String,
    /// Selection order; never empty.
    pub personas_used: Vec<String>,
    pub template: String,
    pub seed: u64,
    pub metadata: PostMetadata,
    /// Result of the local forbidden-phrase scan only. Callers must still run
    /// the full compliance check before publishing.
    pub safety_checked: bool,
}

impl GeneratedPost {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata.tags.iter().any(|t| t == tag)
    }
}
