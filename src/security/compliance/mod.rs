mod checker;
pub mod pattern;
mod rules;
mod types;

pub use checker::{
    ComplianceChecker, DEFAULT_APPROVED_RESPONSES, DEFAULT_DISCLAIMER, SAFE_ACKNOWLEDGEMENT,
};
pub use pattern::{PatternMatch, RulePattern, first_forbidden_phrase};
pub use rules::{MISSING_DISCLAIMER_RULE, SafetyRule, builtin_rules};
pub use types::{
    CheckContext, ComplianceCheck, RuleAction, RuleKind, SafetyViolation, Severity,
};
