pub mod schema;

pub use schema::{AuditConfig, Config, GeneratorConfig, ProjectConfig};
