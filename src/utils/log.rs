use env_logger::Builder;
use log::LevelFilter;

/// Initializes logging for this process.
///
/// The default level is info, overridable with the standard RUST_LOG
/// environment variable.
pub fn bootstrap_logging() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init()
}
