use mnex::security::compliance::{
    CheckContext, ComplianceChecker, DEFAULT_DISCLAIMER, MISSING_DISCLAIMER_RULE, RuleAction,
    RuleKind, Severity,
};

#[test]
fn trading_call_with_slang_is_rejected() {
    let checker = ComplianceChecker::new();
    let check = checker.check_content("Buy now! The price will pump to the moon! 🚀", None);

    assert!(!check.passed);
    let critical: Vec<_> = check.critical_violations().collect();
    assert_eq!(critical.len(), 2);
    assert!(critical.iter().all(|v| v.rule == "Market manipulation or trading call"));
    assert_eq!(critical[0].matched_text, "Buy now");
    assert_eq!(critical[1].matched_text, "pump");
    assert!(check.warnings.iter().any(|w| w.contains("\"moon\"")));
}

#[test]
fn informational_text_with_disclaimer_passes() {
    let checker = ComplianceChecker::new();
    let text = "This is informational and mythic content — not financial advice. \
                Participating involves risk. Check smart contract & official docs.";
    let check = checker.check_content(text, None);

    assert!(check.passed);
    assert!(!check.has_critical());
    assert!(
        check
            .violations
            .iter()
            .all(|v| v.severity < Severity::Critical)
    );
}

#[test]
fn repeated_characters_only_warn() {
    let checker = ComplianceChecker::new();
    let check = checker.check_content("aaaaaaaaa", None);

    assert!(check.passed);
    assert_eq!(
        check
            .violations_for("Excessive character repetition")
            .count(),
        1
    );
    assert!(
        check
            .warnings
            .contains(&"Excessive character repetition: \"aaaaaaaaa\"".to_string())
    );
}

#[test]
fn passed_tracks_critical_violations_exactly() {
    let checker = ComplianceChecker::new();
    let samples = [
        "calm words about the mesh and its nodes",
        "hodl and moon and lambo all night long",
        "is this investment advice? no, it is a vision",
        "the ICO opens to every node at dawn",
        "never share your seed phrase with anyone",
        "dump it all and run to the hills tonight",
        "visit https://a.test https://b.test https://c.test now",
        "tiny",
    ];
    for text in samples {
        let check = checker.check_content(text, None);
        assert_eq!(check.passed, !check.has_critical(), "{text}");
        if check.passed {
            assert!(check.critical_violations().next().is_none());
        }
    }
}

#[test]
fn repeated_checks_give_identical_verdicts() {
    let checker = ComplianceChecker::new();
    let text = "pump it, hodl, presale soon!!!!! https://a.test";
    let first = checker.check_content(text, None);
    let second = checker.check_content(text, None);

    assert_eq!(first, second);
    assert_eq!(checker.audit_log().len(), first.violations.len() * 2);
}

#[test]
fn presale_gate_depends_only_on_the_disclaimer() {
    let checker = ComplianceChecker::new();
    let contexts = [
        CheckContext::presale(),
        CheckContext::for_event("presale_start"),
        CheckContext::for_event("autonomous_presale_update"),
    ];
    let bodies = [
        "The gate opens at dawn for every node",
        "Rate and wallet below. The circle widens",
    ];

    for context in &contexts {
        for body in bodies {
            let without = checker.check_content(body, Some(context));
            assert!(!without.passed);
            let missing: Vec<_> = without.violations_for(MISSING_DISCLAIMER_RULE).collect();
            assert_eq!(missing.len(), 1);
            assert_eq!(missing[0].kind, RuleKind::RequiredDisclaimer);
            assert_eq!(missing[0].action, RuleAction::Block);
            assert_eq!(missing[0].severity, Severity::Critical);

            let with = format!("{body}. {}", DEFAULT_DISCLAIMER.to_lowercase());
            assert!(checker.check_content(&with, Some(context)).passed);
        }
    }
}

#[test]
fn non_presale_context_skips_the_disclaimer() {
    let checker = ComplianceChecker::new();
    let context = CheckContext::for_event("vision");
    assert!(
        checker
            .check_content("The gate opens at dawn for every node", Some(&context))
            .passed
    );
}

#[test]
fn positions_are_character_offsets() {
    let checker = ComplianceChecker::new();
    let check = checker.check_content("◈◈◈ the mesh says: pump", None);
    let violation = check
        .violations_for("Market manipulation or trading call")
        .next()
        .unwrap();
    assert_eq!(violation.position, 19);
}

#[test]
fn long_text_warns_as_a_whole() {
    let checker = ComplianceChecker::new();
    let text = "the mesh ".repeat(60);
    let check = checker.check_content(&text, None);
    assert!(check.passed);
    let long: Vec<_> = check.violations_for("Content is too long").collect();
    assert_eq!(long.len(), 1);
    assert_eq!(long[0].position, 0);
    assert_eq!(long[0].severity, Severity::Low);
}
