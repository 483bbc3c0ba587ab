use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Mix OS randomness into unseeded posts. Turn off for reproducible
    /// harness runs; explicit seeds are reproducible either way.
    #[serde(default = "default_entropy")]
    pub entropy: bool,
}

fn default_entropy() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entropy: default_entropy(),
        }
    }
}
