//! Diagnostic logging for the `envcheck` binary.
//!
//! Operator-facing messages go to stdout with `println!`; `tracing` events
//! go to stderr and are hidden below `warn` unless asked for.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Maps `-q`/`-v` counts to an `EnvFilter` directive.
///
/// # Examples
///
/// ```rust
/// use envcheck::logging::filter_directive;
///
/// assert_eq!(filter_directive(0, 0), "warn");
/// assert_eq!(filter_directive(0, 2), "debug");
/// assert_eq!(filter_directive(1, 0), "error");
/// ```
pub fn filter_directive(quiet: u8, verbose: u8) -> &'static str {
    if quiet > 0 {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global stderr subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init(quiet: u8, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(quiet, verbose)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
