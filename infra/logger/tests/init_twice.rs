use contest_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn console_only_logger_has_no_guard() {
    // Either this test or the next one installs the subscriber first.
    match Logger::builder().name("integration-console-only").level(LevelFilter::INFO).init() {
        Ok(logger) => assert!(logger.guard().is_none()),
        Err(err) => assert!(matches!(err, LoggerError::Subscriber { .. })),
    }
}

#[test]
#[serial]
fn init_twice_returns_subscriber_error() {
    let first = Logger::builder().name("integration-init-twice").init();

    let err = Logger::builder()
        .name("integration-init-twice-second")
        .init()
        .expect_err("second init should fail");

    assert!(
        matches!(err, LoggerError::Subscriber { .. }),
        "expected subscriber error for second init"
    );
    drop(first);
}
