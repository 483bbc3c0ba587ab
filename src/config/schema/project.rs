use serde::{Deserialize, Serialize};

/// Project facts substituted into templates when the post context carries
/// no presale data of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_website")]
    pub website: String,
    #[serde(default = "default_telegram")]
    pub telegram: String,
    #[serde(default = "default_twitter")]
    pub twitter: String,
    /// Tokens per unit of payment, as displayed.
    #[serde(default = "default_rate")]
    pub default_rate: String,
    #[serde(default = "default_wallet")]
    pub default_wallet: String,
    #[serde(default = "default_supply")]
    pub supply: String,
    #[serde(default = "default_self_locked")]
    pub self_locked: String,
    #[serde(default = "default_presale_allocation")]
    pub presale_allocation: String,
}

fn default_website() -> String {
    "https://mnex.example".into()
}
fn default_telegram() -> String {
    "https://t.me/mnexoracle".into()
}
fn default_twitter() -> String {
    "https://x.com/mnexoracle".into()
}
fn default_rate() -> String {
    "TBA".into()
}
fn default_wallet() -> String {
    "TBD".into()
}
fn default_supply() -> String {
    "1,000,000,000".into()
}
fn default_self_locked() -> String {
    "20%".into()
}
fn default_presale_allocation() -> String {
    "40%".into()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            website: default_website(),
            telegram: default_telegram(),
            twitter: default_twitter(),
            default_rate: default_rate(),
            default_wallet: default_wallet(),
            supply: default_supply(),
            self_locked: default_self_locked(),
            presale_allocation: default_presale_allocation(),
        }
    }
}
