// Integration tests for burst suppression through a built logger

use logkit::config::LogConfig;
use logkit::sampling::SamplingConfig;
use logkit::Logger;
use tempfile::tempdir;

use crate::read_records;

fn logger_to(path: &std::path::Path, sampling: Option<SamplingConfig>) -> Logger {
    Logger::build(&LogConfig {
        outputs: vec![path.to_str().unwrap().to_string()],
        sampling,
        ..LogConfig::default()
    })
    .unwrap()
}

#[test]
fn test_repeated_records_are_sampled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sampled.log");
    let logger = logger_to(
        &path,
        Some(SamplingConfig {
            tick_ms: 60_000,
            ..SamplingConfig::default()
        }),
    );

    logger.in_scope(|| {
        for i in 0..250 {
            tracing::info!(attempt = i, "retrying connection");
        }
    });

    let records = read_records(&path);
    // 100 unconditionally, then the 200th
    assert_eq!(records.len(), 101);
    assert_eq!(records[100]["attempt"], 199);
}

#[test]
fn test_distinct_messages_are_not_sampled_together() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("distinct.log");
    let logger = logger_to(
        &path,
        Some(SamplingConfig {
            initial: 1,
            thereafter: 0,
            tick_ms: 60_000,
        }),
    );

    logger.in_scope(|| {
        for _ in 0..10 {
            tracing::info!("first message");
            tracing::warn!("second message");
        }
    });

    assert_eq!(read_records(&path).len(), 2);
}

#[test]
fn test_sampling_can_be_disabled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unsampled.log");
    let logger = logger_to(&path, None);

    logger.in_scope(|| {
        for _ in 0..300 {
            tracing::info!("same thing again");
        }
    });

    assert_eq!(read_records(&path).len(), 300);
}
