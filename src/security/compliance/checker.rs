use super::pattern::find_literal;
use super::rules::{MISSING_DISCLAIMER_RULE, SafetyRule, builtin_rules};
use super::types::{
    CheckContext, ComplianceCheck, RuleAction, RuleKind, SafetyViolation, Severity,
};
use crate::error::AuditError;
use crate::persona::PresaleData;
use crate::security::audit::{AuditEntry, AuditSink, NoopAuditSink, write_audit_log};
use rand::seq::IndexedRandom;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub const DEFAULT_DISCLAIMER: &str =
    "Not financial advice. Participating involves risk. Check smart contract & official docs.";

pub const SAFE_ACKNOWLEDGEMENT: &str = "The oracle hears you. The mesh remembers your signal.";

pub const DEFAULT_APPROVED_RESPONSES: [&str; 6] = [
    "The oracle speaks only in visions. Seek the official channels for details.",
    "The mesh does not offer guidance on that path.",
    "Some questions dissolve before they reach the nodes.",
    "The signal is unclear. Return to the official docs.",
    "The oracle observes. It does not advise.",
    "That thread is not mine to weave. Consult the official channels.",
];

/// Rule-based gate for outbound posts and inbound messages.
///
/// Evaluation itself is pure; the only mutable state is the append-only
/// audit log, guarded internally so one checker can be shared by reference.
pub struct ComplianceChecker {
    rules: Vec<SafetyRule>,
    required_disclaimer: String,
    approved_responses: Vec<String>,
    audit_log: Mutex<Vec<AuditEntry>>,
    sink: Arc<dyn AuditSink>,
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceChecker {
    pub fn new() -> Self {
        Self {
            rules: builtin_rules().to_vec(),
            required_disclaimer: DEFAULT_DISCLAIMER.to_string(),
            approved_responses: DEFAULT_APPROVED_RESPONSES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            audit_log: Mutex::new(Vec::new()),
            sink: Arc::new(NoopAuditSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_rules(mut self, rules: Vec<SafetyRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_disclaimer(mut self, disclaimer: impl Into<String>) -> Self {
        let disclaimer = disclaimer.into();
        if !disclaimer.trim().is_empty() {
            self.required_disclaimer = disclaimer;
        }
        self
    }

    /// Replace the fallback replies; an empty list keeps the defaults.
    pub fn with_approved_responses(mut self, responses: Vec<String>) -> Self {
        if !responses.is_empty() {
            self.approved_responses = responses;
        }
        self
    }

    pub fn rules(&self) -> &[SafetyRule] {
        &self.rules
    }

    pub fn required_disclaimer(&self) -> &str {
        &self.required_disclaimer
    }

    pub fn check_content(&self, text: &str, context: Option<&CheckContext>) -> ComplianceCheck {
        let mut check = ComplianceCheck::default();

        for rule in &self.rules {
            for found in rule.pattern.find_matches(text) {
                match rule.action {
                    RuleAction::Block => {}
                    RuleAction::Warn => check
                        .warnings
                        .push(format!("{}: \"{}\"", rule.description, found.text)),
                    RuleAction::RequireApproval => check.requires_approval = true,
                }
                check.violations.push(SafetyViolation {
                    rule: rule.description.clone(),
                    kind: rule.kind,
                    action: rule.action,
                    severity: rule.severity,
                    matched_text: found.text,
                    position: found.position,
                });
            }
        }

        if context.is_some_and(CheckContext::is_presale) && !self.has_disclaimer(text) {
            check.violations.push(SafetyViolation {
                rule: MISSING_DISCLAIMER_RULE.to_string(),
                kind: RuleKind::RequiredDisclaimer,
                action: RuleAction::Block,
                severity: Severity::Critical,
                matched_text: String::new(),
                position: 0,
            });
        }

        check.passed = !check.has_critical();
        self.record(&check.violations);

        info!(
            passed = check.passed,
            violations = check.violations.len(),
            warnings = check.warnings.len(),
            requires_approval = check.requires_approval,
            "compliance.check"
        );
        check
    }

    /// Presale check plus non-fatal warnings for presale details missing
    /// from the text. The extra warnings never affect `passed`.
    pub fn validate_presale_post(&self, text: &str, presale: &PresaleData) -> ComplianceCheck {
        let mut check = self.check_content(text, Some(&CheckContext::presale()));
        for (label, value) in presale.fields() {
            if !text.contains(value) {
                check
                    .warnings
                    .push(format!("Missing presale {label}: \"{value}\""));
            }
        }
        check
    }

    /// Reply for an inbound user message: a fixed acknowledgement when it
    /// passes, one of the approved non-committal responses otherwise.
    pub fn generate_safe_response(&self, user_message: &str) -> String {
        let check = self.check_content(user_message, None);
        if check.passed {
            return SAFE_ACKNOWLEDGEMENT.to_string();
        }

        debug!(
            critical = check.critical_violations().count(),
            "inbound message failed compliance; using approved response"
        );
        self.approved_responses
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_APPROVED_RESPONSES[0].to_string())
    }

    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.audit_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn clear_audit_log(&self) {
        self.audit_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// Persist the in-memory log as JSONL. Returns the number of entries written.
    pub fn export_audit_log(&self, path: &Path) -> Result<usize, AuditError> {
        let entries = self.audit_log();
        write_audit_log(path, &entries)
    }

    fn has_disclaimer(&self, text: &str) -> bool {
        !find_literal(text, &self.required_disclaimer).is_empty()
    }

    fn record(&self, violations: &[SafetyViolation]) {
        if violations.is_empty() {
            return;
        }

        let entries: Vec<AuditEntry> = violations.iter().map(AuditEntry::from_violation).collect();
        for entry in &entries {
            if let Err(error) = self.sink.record(entry) {
                warn!(sink = self.sink.name(), %error, "audit sink write failed");
            }
        }

        self.audit_log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend(entries);
    }
}
