use crate::persona::PostContext;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// What a rule match does to the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleAction {
    /// Recorded as a violation; only gates `passed` when the severity is critical.
    Block,
    /// Recorded as a violation and surfaced as a warning string.
    Warn,
    /// Recorded as a violation and flags the content for manual approval.
    RequireApproval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleKind {
    ForbiddenPhrase,
    RequiredDisclaimer,
    RateLimit,
    ContentFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyViolation {
    /// Description of the rule that matched.
    pub rule: String,
    pub kind: RuleKind,
    pub action: RuleAction,
    pub severity: Severity,
    pub matched_text: String,
    /// Character offset of the match in the checked text.
    pub position: usize,
}

/// Verdict for one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// `true` iff no violation is critical.
    pub passed: bool,
    pub violations: Vec<SafetyViolation>,
    pub warnings: Vec<String>,
    pub requires_approval: bool,
}

impl Default for ComplianceCheck {
    fn default() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
            warnings: Vec::new(),
            requires_approval: false,
        }
    }
}

impl ComplianceCheck {
    pub fn critical_violations(&self) -> impl Iterator<Item = &SafetyViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Critical)
    }

    pub fn has_critical(&self) -> bool {
        self.critical_violations().next().is_some()
    }

    pub fn violations_for<'a>(
        &'a self,
        rule: &'a str,
    ) -> impl Iterator<Item = &'a SafetyViolation> + 'a {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}

/// Optional context for a compliance check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckContext {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub presale_mode: bool,
}

impl CheckContext {
    pub fn presale() -> Self {
        Self {
            event_type: None,
            presale_mode: true,
        }
    }

    pub fn for_event(event_type: impl Into<String>) -> Self {
        Self {
            event_type: Some(event_type.into()),
            presale_mode: false,
        }
    }

    /// Presale-flagged content must carry the required disclaimer.
    pub fn is_presale(&self) -> bool {
        self.presale_mode
            || self
                .event_type
                .as_deref()
                .is_some_and(|event| event.contains("presale"))
    }
}

impl From<&PostContext> for CheckContext {
    fn from(context: &PostContext) -> Self {
        Self {
            event_type: context.event_type.as_ref().map(|e| e.as_str().to_string()),
            presale_mode: context.presale_mode,
        }
    }
}
