//! Diagnostic logging setup

use tracing_subscriber::filter::LevelFilter;

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for listings; `--verbose` raises the level to debug.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::ERROR
    };

    // A second init (e.g. in tests) is not an error worth reporting
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
