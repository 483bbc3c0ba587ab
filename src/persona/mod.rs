pub mod context;
pub mod corpus;
pub mod entropy;
pub mod fragments;
pub mod generator;
pub mod pacing;
pub mod post;
pub mod template;
pub mod voice;

pub use context::{EventType, PostContext, PresaleData};
pub use corpus::{
    PersonaCorpus, PersonaLayer, PostingRules, SafetyRulesConfig, TemplateSpec, ToneVector,
};
pub use entropy::{EntropySource, NoEntropy, OsEntropy, SeedCounter};
pub use generator::PostGenerator;
pub use pacing::PostPacer;
pub use post::{GeneratedPost, PostMetadata};
pub use voice::Voice;
