use std::fs;

use mnex::error::ConfigError;
use mnex::persona::PersonaCorpus;
use tempfile::TempDir;

const MINIMAL_CORPUS: &str = r#"
vision_metaphors = ["The lattice hums."]

[personas.oracle]
description = "core"
signature = "◈"
weight = 1.0

[personas.oracle.tone_vector]
cryptic = 0.5
warmth = 0.5
humor = 0.5
technical = 0.5
brevity = 0.5

[templates.vision]
pattern = "{vision}\n{sign}"
personas = ["oracle"]

[safety_rules]
required_disclaimer = "Not financial advice."

[posting_rules]
max_length = 280
rate_limit_minutes = 10
max_personas_per_post = 1
signature_format = "-{prefix}/{code}"
"#;

#[test]
fn minimal_toml_corpus_loads_from_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("corpus.toml");
    fs::write(&path, MINIMAL_CORPUS).unwrap();

    let corpus = PersonaCorpus::load(&path).unwrap();
    assert_eq!(corpus.personas.len(), 1);
    assert!(corpus.persona("oracle").unwrap().phrases.is_empty());
    assert!(corpus.safety_rules.forbidden_phrases.is_empty());
}

#[test]
fn json_extension_selects_json_parser() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("corpus.JSON");
    let corpus = PersonaCorpus::from_toml_str(MINIMAL_CORPUS).unwrap();
    fs::write(&path, serde_json::to_string_pretty(&corpus).unwrap()).unwrap();

    assert_eq!(PersonaCorpus::load(&path).unwrap(), corpus);
}

#[test]
fn unknown_placeholder_is_rejected_at_load() {
    let raw = MINIMAL_CORPUS.replace("{vision}\\n{sign}", "{vision} {prophecy}");
    let err = PersonaCorpus::from_toml_str(&raw).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("prophecy")));
}

#[test]
fn template_with_unknown_persona_is_rejected() {
    let raw = MINIMAL_CORPUS.replace(r#"personas = ["oracle"]"#, r#"personas = ["ghost"]"#);
    let err = PersonaCorpus::from_toml_str(&raw).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("ghost")));
}

#[test]
fn syntax_errors_report_the_format() {
    let err = PersonaCorpus::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { format: "json", .. }));
}

#[test]
fn missing_file_is_a_load_error() {
    let tmp = TempDir::new().unwrap();
    let err = PersonaCorpus::load(&tmp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}
