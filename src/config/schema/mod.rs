mod audit;
mod core;
mod generator;
mod project;

pub use audit::AuditConfig;
pub use core::Config;
pub use generator::GeneratorConfig;
pub use project::ProjectConfig;
