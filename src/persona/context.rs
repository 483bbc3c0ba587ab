use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// What triggered a post. Known events drive template overrides; anything
/// else (autonomous cycles, project updates) is carried as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    PresalePre,
    PresaleStart,
    TxVerification,
    Community,
    Vision,
    DataFragment,
    Custom(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PresalePre => "presale_pre",
            Self::PresaleStart => "presale_start",
            Self::TxVerification => "tx_verification",
            Self::Community => "community",
            Self::Vision => "vision",
            Self::DataFragment => "data_fragment",
            Self::Custom(raw) => raw,
        }
    }

    /// Any event whose name contains `presale`, including custom ones.
    pub fn is_presale(&self) -> bool {
        self.as_str().contains("presale")
    }
}

impl From<&str> for EventType {
    fn from(raw: &str) -> Self {
        match raw {
            "presale_pre" => Self::PresalePre,
            "presale_start" => Self::PresaleStart,
            "tx_verification" => Self::TxVerification,
            "community" => Self::Community,
            "vision" => Self::Vision,
            "data_fragment" => Self::DataFragment,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<EventType> for String {
    fn from(event: EventType) -> Self {
        event.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presale parameters carried by presale events. Numeric values such as
/// `rate` are accepted as JSON numbers or strings and kept as text, since
/// they are only ever rendered into posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresaleData {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub rate: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub wallet: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub website: Option<String>,
}

impl PresaleData {
    /// Present fields as `(label, value)` pairs, in a stable order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("start time", self.start_time.as_deref()),
            ("rate", self.rate.as_deref()),
            ("wallet", self.wallet.as_deref()),
            ("website", self.website.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Caller-supplied input for one generated post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostContext {
    #[serde(default)]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub presale_data: Option<PresaleData>,
    #[serde(default)]
    pub user_interaction: Option<String>,
    /// Forces presale compliance handling regardless of `event_type`.
    #[serde(default)]
    pub presale_mode: bool,
    /// Explicit seed; when set, generation is reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PostContext {
    pub fn for_event(event_type: impl Into<EventType>) -> Self {
        Self {
            event_type: Some(event_type.into()),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_tx_hash(mut self, tx_hash: impl Into<String>) -> Self {
        self.tx_hash = Some(tx_hash.into());
        self
    }

    pub fn with_presale_data(mut self, presale_data: PresaleData) -> Self {
        self.presale_data = Some(presale_data);
        self
    }

    pub fn is_presale(&self) -> bool {
        self.presale_mode || self.event_type.as_ref().is_some_and(EventType::is_presale)
    }
}
