// Integration tests for logger setup and the process-wide handle

use logkit::config::LogConfig;
use logkit::state::{self, current_config};
use logkit::{build_default, get_logger, setup, ErrorCode, LogLevel};
use std::sync::Arc;
use tempfile::tempdir;

use crate::read_records;

fn file_config(path: &std::path::Path, debug: bool) -> LogConfig {
    LogConfig {
        outputs: vec![path.to_str().unwrap().to_string()],
        debug,
        ..LogConfig::default()
    }
}

#[test]
fn test_setup_emits_exactly_one_startup_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("server.log");

    setup(&file_config(&path, false)).unwrap();

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "info");
    assert_eq!(records[0]["msg"], "logger initialized");
}

#[test]
fn test_setup_publishes_handle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("published.log");
    let config = file_config(&path, true);

    let logger = setup(&config).unwrap();

    // Other tests may replace the handle concurrently, so only check that
    // some logger is visible and that ours is the one we were given.
    assert!(get_logger().is_some());
    assert!(state::current_state().is_some());
    assert_eq!(logger.settings().level, LogLevel::Debug);
    assert!(current_config().is_some());
}

#[test]
fn test_setup_twice_gives_independent_handles() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("twice.log");
    let config = LogConfig {
        outputs: vec![
            "stderr".to_string(),
            path.to_str().unwrap().to_string(),
            "stderr".to_string(),
        ],
        ..LogConfig::default()
    };

    let first = setup(&config).unwrap();
    let second = setup(&config).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.settings(), second.settings());

    let expected = {
        let mut outputs = vec![path.to_str().unwrap().to_string(), "stderr".to_string()];
        outputs.sort();
        outputs
    };
    assert_eq!(first.settings().outputs, expected);
    assert_eq!(second.settings().error_outputs, expected);
    assert_eq!(second.settings().level, LogLevel::Info);

    // One startup record per setup, both appended to the same file
    let records = read_records(&path);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["msg"] == "logger initialized"));
}

#[test]
fn test_setup_fails_when_any_output_cannot_be_opened() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.log");
    let bad = dir.path().join("missing").join("bad.log");
    let config = LogConfig {
        outputs: vec![
            good.to_str().unwrap().to_string(),
            bad.to_str().unwrap().to_string(),
        ],
        ..LogConfig::default()
    };

    let err = setup(&config).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::SinkOpenFailed);
    assert!(err.suggestion().is_some());
    assert_ne!(current_config(), Some(config));

    // No startup record when setup fails
    let written = std::fs::read_to_string(&good).unwrap_or_default();
    assert!(written.is_empty());
}

#[test]
fn test_build_default_uses_stdout_at_info() {
    let logger = build_default();
    assert_eq!(logger.settings().outputs, vec!["stdout"]);
    assert_eq!(logger.settings().error_outputs, vec!["stdout"]);
    assert_eq!(logger.settings().level, LogLevel::Info);
}

#[test]
fn test_records_from_handle_reach_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("handle.log");

    let logger = setup(&file_config(&path, false)).unwrap();
    logger.in_scope(|| {
        tracing::info!(request_id = 42, "handled request");
        tracing::error!("request failed");
    });

    let records = read_records(&path);
    assert_eq!(records.len(), 3);
    assert_eq!(records[1]["msg"], "handled request");
    assert_eq!(records[1]["request_id"], 42);
    assert_eq!(records[2]["level"], "error");
}
