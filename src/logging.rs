use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global logger once; later calls are ignored.
///
/// Filter precedence: `filter`, then `RUST_LOG`, then `info`.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        // The test harness may have installed a logger already.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[test]
fn init_is_idempotent() {
    init_logging(Some("eng=debug"));
    assert_eq!(log::LevelFilter::Debug, log::max_level());

    init_logging(Some("off"));
    assert_eq!(log::LevelFilter::Debug, log::max_level());
}
