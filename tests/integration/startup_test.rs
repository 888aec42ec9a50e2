// Integration tests for the startup sequence

use logkit::config::Settings;
use logkit::{startup, transport};
use tempfile::tempdir;

#[test]
fn test_debug_flag_configures_logger_and_transport() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("startup.log");

    let mut settings = Settings::default();
    settings.log.outputs = vec![path.to_str().unwrap().to_string()];
    settings.log.debug = true;

    let logger = startup::init(&settings).unwrap();
    assert!(transport::tracing_enabled());
    assert_eq!(logger.settings().level, logkit::LogLevel::Debug);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("logger initialized"));
    assert!(contents.contains("transport configured"));

    settings.log.debug = false;
    let logger = startup::init(&settings).unwrap();
    assert!(!transport::tracing_enabled());
    assert_eq!(logger.settings().level, logkit::LogLevel::Info);
}
