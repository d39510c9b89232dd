use fixtura_logger::{LevelFilter, Logger};

#[test]
fn init_console_only_returns_named_handle() {
    let logger = Logger::builder()
        .name("integration-console-only")
        .console(true)
        .level(LevelFilter::INFO)
        .test_writer(true)
        .init()
        .expect("logger should initialize");

    assert_eq!(logger.name(), "integration-console-only");
    tracing::info!("console logger is live");
}
