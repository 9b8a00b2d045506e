use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "caption_thumbs=info";

/// Logs go to stderr; stdout carries command output.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("logging not initialised: {error}");
    }
}
