use super::Config;
use crate::error::Result;
use crate::persona::{NoEntropy, PersonaCorpus, PostGenerator};
use crate::security::ComplianceChecker;
use crate::security::audit::{
    AuditEntry, AuditSink, JsonlAuditSink, NoopAuditSink, read_audit_log,
};
use std::sync::Arc;

impl Config {
    /// Generator for `corpus` with this config's project links and entropy setting.
    pub fn build_generator(&self, corpus: PersonaCorpus) -> Result<PostGenerator> {
        let generator = PostGenerator::new(corpus, self.project.clone())?;
        Ok(if self.generator.entropy {
            generator
        } else {
            generator.with_entropy(Box::new(NoEntropy))
        })
    }

    /// Checker using the corpus disclaimer and responses. Violations go to the
    /// JSONL audit log when auditing is enabled.
    pub fn build_checker(&self, corpus: &PersonaCorpus) -> ComplianceChecker {
        let sink: Arc<dyn AuditSink> = if self.audit.enabled {
            Arc::new(JsonlAuditSink::new(self.audit_log_path()))
        } else {
            Arc::new(NoopAuditSink)
        };

        ComplianceChecker::new()
            .with_disclaimer(corpus.safety_rules.required_disclaimer.clone())
            .with_approved_responses(corpus.safety_rules.approved_responses.clone())
            .with_sink(sink)
    }

    /// Entries persisted to the configured audit log.
    pub fn audit_entries(&self) -> Result<Vec<AuditEntry>> {
        Ok(read_audit_log(&self.audit_log_path())?)
    }
}
