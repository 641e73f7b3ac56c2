use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn,gembridge=info,gembridge_application=info,gembridge_interaction=info,gembridge_infrastructure=info";

/// Installs the global subscriber, writing to stderr so log lines stay out of
/// the chat transcript.
///
/// `RUST_LOG` wins over `level`; `level` wins over the built-in default.
pub fn init(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| match level {
            Some(level) => EnvFilter::try_new(level),
            None => EnvFilter::try_new(DEFAULT_DIRECTIVES),
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
