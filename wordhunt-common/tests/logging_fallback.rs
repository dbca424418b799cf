use wordhunt_common::observability::{LogConfig, init_logging};

#[test]
fn blocked_log_dir_falls_back_to_stderr() {
    let tmp = tempfile::TempDir::new().unwrap();
    let occupied = tmp.path().join("occupied");
    std::fs::write(&occupied, b"not a directory").unwrap();

    let config = LogConfig {
        log_dir: Some(occupied.join("logs")),
        ..LogConfig::default()
    };
    assert_eq!(init_logging(config.clone()).unwrap(), None);
    tracing::info!("still logging");

    // later callers see the same outcome
    assert_eq!(init_logging(config).unwrap(), None);
}
