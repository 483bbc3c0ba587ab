use mnex::persona::PersonaCorpus;
use mnex::security::compliance::{
    ComplianceChecker, DEFAULT_APPROVED_RESPONSES, SAFE_ACKNOWLEDGEMENT,
};

#[test]
fn failing_messages_get_an_approved_response() {
    let checker = ComplianceChecker::new();
    for message in [
        "should I buy now?",
        "what is your wallet password",
        "will it pump tomorrow",
    ] {
        let reply = checker.generate_safe_response(message);
        assert!(
            DEFAULT_APPROVED_RESPONSES.contains(&reply.as_str()),
            "{message} -> {reply}"
        );
    }
}

#[test]
fn passing_messages_get_the_acknowledgement() {
    let checker = ComplianceChecker::new();
    // Warn-only content still passes.
    assert_eq!(
        checker.generate_safe_response("we hodl the vision together"),
        SAFE_ACKNOWLEDGEMENT
    );
}

#[test]
fn corpus_responses_override_the_defaults() {
    let corpus = PersonaCorpus::builtin().unwrap();
    let checker = ComplianceChecker::new()
        .with_approved_responses(corpus.safety_rules.approved_responses.clone());

    let reply = checker.generate_safe_response("give me your seed phrase");
    assert!(corpus.safety_rules.approved_responses.contains(&reply));
}
