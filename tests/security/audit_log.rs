use std::fs;
use std::sync::Arc;

use mnex::security::audit::{JsonlAuditSink, MemoryAuditSink, read_audit_log};
use mnex::security::compliance::{ComplianceChecker, RuleAction, Severity};
use tempfile::TempDir;

#[test]
fn checker_appends_every_violation_to_the_jsonl_sink() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("audit").join("compliance.jsonl");
    let checker = ComplianceChecker::new().with_sink(Arc::new(JsonlAuditSink::new(&path)));

    let check = checker.check_content("Buy now, hodl, and read the presale docs", None);
    let entries = read_audit_log(&path).unwrap();

    assert_eq!(entries.len(), check.violations.len());
    assert_eq!(entries[0].action, RuleAction::Block);
    assert_eq!(entries[0].severity, Severity::Critical);
    assert_eq!(entries[0].text, "Buy now");
    assert!(
        entries
            .iter()
            .any(|e| e.action == RuleAction::RequireApproval)
    );
}

#[test]
fn log_stays_append_only_across_checkers() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("compliance.jsonl");

    for _ in 0..2 {
        let checker = ComplianceChecker::new().with_sink(Arc::new(JsonlAuditSink::new(&path)));
        checker.check_content("time to pump", None);
    }

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw.lines().count(), 2);
    for line in raw.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["rule"], "Market manipulation or trading call");
        assert_eq!(value["severity"], "critical");
    }
}

#[test]
fn clean_text_writes_nothing() {
    let sink = Arc::new(MemoryAuditSink::new());
    let checker = ComplianceChecker::new().with_sink(sink.clone());
    checker.check_content("The mesh dreams in quiet colors.", None);
    assert!(sink.entries().is_empty());
    assert!(checker.audit_log().is_empty());
}

#[test]
fn export_writes_the_in_memory_log() {
    let tmp = TempDir::new().unwrap();
    let checker = ComplianceChecker::new();
    checker.check_content("sell now", None);
    checker.check_content("share the private key", None);

    let export = tmp.path().join("export.jsonl");
    let written = checker.export_audit_log(&export).unwrap();
    assert_eq!(written, checker.audit_log().len());
    assert_eq!(read_audit_log(&export).unwrap(), checker.audit_log());

    checker.clear_audit_log();
    assert!(checker.audit_log().is_empty());
    assert_eq!(read_audit_log(&export).unwrap().len(), written);
}

#[test]
fn unwritable_sink_never_fails_the_check() {
    let tmp = TempDir::new().unwrap();
    // A directory where the log file should be makes every append fail.
    let path = tmp.path().join("occupied");
    fs::create_dir_all(&path).unwrap();

    let checker = ComplianceChecker::new().with_sink(Arc::new(JsonlAuditSink::new(&path)));
    let check = checker.check_content("guaranteed profit for all", None);
    assert!(!check.passed);
    assert_eq!(checker.audit_log().len(), check.violations.len());
}
