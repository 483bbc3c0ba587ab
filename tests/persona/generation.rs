use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use mnex::config::ProjectConfig;
use mnex::persona::template::{KNOWN_PLACEHOLDERS, placeholders_in};
use mnex::persona::{
    EventType, NoEntropy, PersonaCorpus, PostContext, PostGenerator, PresaleData, SeedCounter,
};

fn generator() -> PostGenerator {
    PostGenerator::new(PersonaCorpus::builtin().unwrap(), ProjectConfig::default()).unwrap()
}

#[test]
fn context_deserializes_from_caller_json() {
    let context: PostContext = serde_json::from_str(
        r#"{
            "event_type": "presale_start",
            "presale_data": {
                "start_time": "2024-01-20T12:00:00Z",
                "rate": 1000000,
                "wallet": "TBD",
                "website": "https://example.com"
            },
            "seed": 99
        }"#,
    )
    .unwrap();

    assert_eq!(context.event_type, Some(EventType::PresaleStart));
    assert_eq!(
        context.presale_data.as_ref().and_then(|p| p.rate.as_deref()),
        Some("1000000")
    );
    assert!(context.is_presale());

    let post = generator().generate_post(&context);
    assert_eq!(post.seed, 99);
    assert!(post.text.contains("1000000"));
}

#[test]
fn every_post_resolves_every_known_placeholder() {
    let generator = generator();
    for seed in 0..300 {
        let post = generator.generate_post(&PostContext::default().with_seed(seed));
        for token in placeholders_in(&post.text) {
            assert!(
                !KNOWN_PLACEHOLDERS.contains(&token),
                "{{{token}}} survived in {}",
                post.template
            );
        }
    }
}

#[test]
fn ten_unseeded_vision_posts_differ() {
    let generator = generator();
    let context = PostContext::for_event("vision");
    let texts: HashSet<String> = (0..10)
        .map(|_| generator.generate_post(&context).text)
        .collect();
    assert!(texts.len() >= 9, "only {} unique texts", texts.len());
}

#[test]
fn entropy_free_generators_replay_the_same_sequence() {
    let at = Utc.with_ymd_and_hms(2026, 5, 4, 3, 2, 1).unwrap();
    let context = PostContext::for_event("riddle_hour").with_timestamp(at);
    let build = || {
        generator()
            .with_entropy(Box::new(NoEntropy))
            .with_seed_counter(SeedCounter::starting_at(500))
    };

    let first: Vec<String> = {
        let g = build();
        (0..5).map(|_| g.generate_post(&context).text).collect()
    };
    let second: Vec<String> = {
        let g = build();
        (0..5).map(|_| g.generate_post(&context).text).collect()
    };
    assert_eq!(first, second);
}

#[test]
fn project_defaults_fill_missing_presale_fields() {
    let project = ProjectConfig {
        default_wallet: "0xFEED".into(),
        default_rate: "42".into(),
        ..ProjectConfig::default()
    };
    let generator = PostGenerator::new(PersonaCorpus::builtin().unwrap(), project).unwrap();
    let context = PostContext::for_event("presale_start")
        .with_seed(8)
        .with_presale_data(PresaleData {
            start_time: Some("2030-01-01T00:00:00Z".into()),
            ..PresaleData::default()
        });

    let post = generator.generate_post(&context);
    assert_eq!(post.template, "announcement");
    assert!(post.text.contains("0xFEED"));
    assert!(post.text.contains("Rate: 42"));
    assert!(post.text.contains("2030-01-01T00:00:00Z"));
}

#[test]
fn custom_corpus_with_single_persona_always_uses_it() {
    let mut corpus = PersonaCorpus::builtin().unwrap();
    corpus.personas.retain(|name, _| name == "oracle");
    for spec in corpus.templates.values_mut() {
        spec.personas = vec!["oracle".to_string()];
    }
    corpus.posting_rules.max_personas_per_post = 4;

    let generator = PostGenerator::new(corpus, ProjectConfig::default()).unwrap();
    for seed in 0..30 {
        let post = generator.generate_post(&PostContext::default().with_seed(seed));
        assert_eq!(post.personas_used, vec!["oracle".to_string()]);
        assert!(!post.text.contains('?'), "oracle voice is declarative");
    }
}

#[test]
fn replies_never_use_post_templates() {
    let generator = generator();
    let templates: HashSet<String> = (0..20)
        .map(|seed| {
            generator
                .generate_reply("the nodes are loud today", &PostContext::default().with_seed(seed))
                .template
        })
        .collect();
    assert_eq!(templates, HashSet::from(["reply".to_string()]));
}
