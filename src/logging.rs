use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes `env_logger` once; later calls are ignored.
///
/// `filter` uses the `RUST_LOG` syntax and takes precedence over the
/// environment. Without either, info and above is shown.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match (filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => {
                builder.parse_filters(filter);
            }
            (None, Ok(filter)) => {
                builder.parse_filters(&filter);
            }
            (None, Err(_)) => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.format_timestamp_millis();
        builder.init();

        log::debug!("logging initialized");
    });
}
