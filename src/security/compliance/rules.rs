use super::pattern::RulePattern;
use super::types::{RuleAction, RuleKind, Severity};
use std::sync::LazyLock;

pub const MISSING_DISCLAIMER_RULE: &str = "Missing required disclaimer";

#[derive(Debug, Clone)]
pub struct SafetyRule {
    pub kind: RuleKind,
    pub pattern: RulePattern,
    pub action: RuleAction,
    pub severity: Severity,
    pub description: String,
}

impl SafetyRule {
    pub fn new(
        kind: RuleKind,
        pattern: RulePattern,
        action: RuleAction,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            pattern,
            action,
            severity,
            description: description.into(),
        }
    }
}

/// Source form of the built-in regex rules.
struct RegexRuleSpec {
    kind: RuleKind,
    pattern: &'static str,
    action: RuleAction,
    severity: Severity,
    description: &'static str,
}

const REGEX_RULES: [RegexRuleSpec; 5] = [
    RegexRuleSpec {
        kind: RuleKind::ForbiddenPhrase,
        pattern: r"(?i)\b(?:buy|sell)\s+now\b|\bpump(?:s|ed|ing)?\b|\bdump(?:s|ed|ing)?\b|\bguaranteed\s+(?:returns?|profits?|gains?)\b|\b(?:market|price)\s+manipulation\b",
        action: RuleAction::Block,
        severity: Severity::Critical,
        description: "Market manipulation or trading call",
    },
    RegexRuleSpec {
        kind: RuleKind::ForbiddenPhrase,
        pattern: r"(?i)\b(?:investment|financial|trading)\s+advice\b|\bwhen\s+to\s+(?:buy|sell)\b|\byou\s+should\s+(?:buy|sell|invest)\b",
        action: RuleAction::Block,
        severity: Severity::High,
        description: "Investment or trading advice",
    },
    RegexRuleSpec {
        kind: RuleKind::ContentFilter,
        pattern: r"(?i)\bmoon(?:ing)?\b|\blambos?\b|\bhodl(?:ing)?\b|\bdiamond\s+hands\b",
        action: RuleAction::Warn,
        severity: Severity::Medium,
        description: "Speculative meme-trading slang",
    },
    RegexRuleSpec {
        kind: RuleKind::ContentFilter,
        pattern: r"(?i)\bpre-?sale\b|\btoken\s+sale\b|\bico\b|\bido\b",
        action: RuleAction::RequireApproval,
        severity: Severity::High,
        description: "Presale or token sale mention",
    },
    RegexRuleSpec {
        kind: RuleKind::ForbiddenPhrase,
        pattern: r"(?i)\bprivate\s+keys?\b|\bseed\s+phrases?\b|\bwallet\s+passwords?\b|\bmnemonic\b|\brecovery\s+phrases?\b",
        action: RuleAction::Block,
        severity: Severity::Critical,
        description: "Wallet secret mention",
    },
];

static BUILTIN_RULES: LazyLock<Vec<SafetyRule>> = LazyLock::new(compile_builtin_rules);

fn compile_builtin_rules() -> Vec<SafetyRule> {
    let mut rules: Vec<SafetyRule> = REGEX_RULES
        .iter()
        .filter_map(|spec| match RulePattern::regex(spec.pattern) {
            Ok(pattern) => Some(SafetyRule::new(
                spec.kind,
                pattern,
                spec.action,
                spec.severity,
                spec.description,
            )),
            Err(error) => {
                tracing::error!(rule = spec.description, %error, "built-in rule failed to compile");
                None
            }
        })
        .collect();

    rules.extend([
        SafetyRule::new(
            RuleKind::ContentFilter,
            RulePattern::MinChars(500),
            RuleAction::Warn,
            Severity::Low,
            "Content is too long",
        ),
        SafetyRule::new(
            RuleKind::ContentFilter,
            RulePattern::MaxChars(10),
            RuleAction::Warn,
            Severity::Low,
            "Content is too short",
        ),
        SafetyRule::new(
            RuleKind::ContentFilter,
            RulePattern::RepeatedChar(5),
            RuleAction::Warn,
            Severity::Medium,
            "Excessive character repetition",
        ),
        SafetyRule::new(
            RuleKind::ContentFilter,
            RulePattern::UrlCount(3),
            RuleAction::Warn,
            Severity::Medium,
            "Too many links",
        ),
    ]);

    rules
}

/// The fixed, ordered rule table. Order only affects reporting order.
pub fn builtin_rules() -> &'static [SafetyRule] {
    &BUILTIN_RULES
}
