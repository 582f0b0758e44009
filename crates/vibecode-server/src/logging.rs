use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `debug`.
///
/// `log` records from the library crates are forwarded into the subscriber.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };

    let result = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("Logging already initialised: {e}");
    }
}
