pub mod audit;
pub mod compliance;

pub use audit::{AuditEntry, AuditSink, JsonlAuditSink, MemoryAuditSink, NoopAuditSink};
pub use compliance::{CheckContext, ComplianceCheck, ComplianceChecker};
