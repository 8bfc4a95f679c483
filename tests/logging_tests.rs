//! Tests for logging initialization. These run in their own process, so
//! installing the global subscriber here cannot collide with other suites.

use std::fs;
use torus_rs::{init_logging, LogFormat, LoggingConfig};

#[test]
fn file_logging_honors_configured_format() {
    let dir = tempfile::tempdir().unwrap();
    init_logging(LoggingConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        log_dir: Some(dir.path().to_path_buf()),
    });
    assert!(torus_rs::logging::is_initialized());

    tracing::info!(check = "json-file-format", "structured event");

    let log_file = fs::read_dir(dir.path())
        .unwrap()
        .next()
        .expect("a log file should have been created")
        .unwrap()
        .path();
    let contents = fs::read_to_string(log_file).unwrap();
    let line = contents.lines().next().expect("one event was written");
    assert!(
        line.starts_with('{'),
        "expected JSON-formatted output, got: {line}"
    );
    assert!(line.contains("json-file-format"));
}
