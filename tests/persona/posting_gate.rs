use std::thread;
use std::time::Duration;

use mnex::config::ProjectConfig;
use mnex::persona::{PersonaCorpus, PostGenerator, PostPacer};

#[test]
fn generators_do_not_share_the_posting_gate() {
    let corpus = PersonaCorpus::builtin().unwrap();
    let first = PostGenerator::new(corpus.clone(), ProjectConfig::default()).unwrap();
    let second = PostGenerator::new(corpus, ProjectConfig::default()).unwrap();

    first.mark_post_sent();
    assert!(!first.can_post());
    assert!(second.can_post());
}

#[test]
fn pacer_reopens_after_the_interval() {
    let pacer = PostPacer::new(Duration::from_millis(20));
    pacer.mark_sent();
    assert!(!pacer.can_post());

    thread::sleep(Duration::from_millis(40));
    assert!(pacer.can_post());
    assert_eq!(pacer.time_until_next_post(), Duration::ZERO);
}

#[test]
fn mark_sent_is_visible_across_threads() {
    let pacer = std::sync::Arc::new(PostPacer::from_minutes(5));
    let worker = {
        let pacer = pacer.clone();
        thread::spawn(move || pacer.mark_sent())
    };
    worker.join().unwrap();
    assert!(!pacer.can_post());
}
