use std::sync::Arc;

use mnex::config::ProjectConfig;
use mnex::persona::{PersonaCorpus, PostContext, PostGenerator, PresaleData};
use mnex::security::audit::MemoryAuditSink;
use mnex::security::compliance::{
    CheckContext, ComplianceChecker, MISSING_DISCLAIMER_RULE, Severity,
};

fn presale_data() -> PresaleData {
    PresaleData {
        start_time: Some("2024-01-20T12:00:00Z".into()),
        rate: Some("1000000".into()),
        wallet: Some("TBD".into()),
        website: Some("https://example.com".into()),
    }
}

fn pipeline() -> (PostGenerator, ComplianceChecker) {
    let corpus = PersonaCorpus::builtin().unwrap();
    let checker = ComplianceChecker::new()
        .with_disclaimer(corpus.safety_rules.required_disclaimer.clone())
        .with_approved_responses(corpus.safety_rules.approved_responses.clone());
    let generator = PostGenerator::new(corpus, ProjectConfig::default()).unwrap();
    (generator, checker)
}

#[test]
fn presale_announcement_never_misses_the_disclaimer() {
    let (generator, checker) = pipeline();
    let context = PostContext::for_event("presale_start").with_presale_data(presale_data());

    for _ in 0..25 {
        let post = generator.generate_post(&context);
        assert_eq!(post.template, "announcement");

        let check = checker.validate_presale_post(&post.text, &presale_data());
        assert_eq!(check.violations_for(MISSING_DISCLAIMER_RULE).count(), 0);
        assert!(check.passed, "{:?}", check.violations);
        assert!(
            check
                .violations
                .iter()
                .all(|v| v.severity < Severity::Critical)
        );
        // The announcement names the sale, so a human still signs off.
        assert!(check.requires_approval);
    }
}

#[test]
fn countdown_posts_pass_the_presale_gate() {
    let (generator, checker) = pipeline();
    for seed in 0..25 {
        let context = PostContext::for_event("presale_pre").with_seed(seed);
        let post = generator.generate_post(&context);
        let check = checker.check_content(&post.text, Some(&CheckContext::from(&context)));
        assert!(check.passed, "{}", post.text);
    }
}

#[test]
fn ordinary_posts_pass_and_leave_an_empty_audit_trail() {
    let sink = Arc::new(MemoryAuditSink::new());
    let (generator, checker) = pipeline();
    let checker = checker.with_sink(sink.clone());

    for event in ["community", "data_fragment", "tx_verification"] {
        for seed in 0..20 {
            let context = PostContext::for_event(event).with_seed(seed);
            let post = generator.generate_post(&context);
            assert!(post.safety_checked);

            let check = checker.check_content(&post.text, Some(&CheckContext::from(&context)));
            assert!(check.passed, "{}", post.text);
            assert!(check.violations.is_empty(), "{:?}", check.violations);
        }
    }
    assert!(sink.entries().is_empty());
}

#[test]
fn presale_mode_without_disclaimer_template_is_caught() {
    let (generator, checker) = pipeline();
    let mut context = PostContext::for_event("data_fragment").with_seed(1);
    context.presale_mode = true;

    let post = generator.generate_post(&context);
    let check = checker.check_content(&post.text, Some(&CheckContext::from(&context)));
    assert!(!check.passed);
    assert_eq!(check.violations_for(MISSING_DISCLAIMER_RULE).count(), 1);
}

#[test]
fn placeholder_shaped_presale_fields_are_reported_present() {
    let (generator, checker) = pipeline();
    let presale = PresaleData {
        start_time: Some("{wallet}".into()),
        rate: Some("{website}".into()),
        wallet: Some("0xfeed".into()),
        website: Some("https://example.com".into()),
    };
    let context = PostContext::for_event("presale_start")
        .with_seed(1)
        .with_presale_data(presale.clone());

    let post = generator.generate_post(&context);
    let check = checker.validate_presale_post(&post.text, &presale);
    assert!(
        check.warnings.iter().all(|w| !w.starts_with("Missing presale")),
        "{:?}\n{}",
        check.warnings,
        post.text
    );
}
