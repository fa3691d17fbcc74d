//! Log output for the command line.
//!
//! Filter precedence: `SOLGEN_LOG`, then `RUST_LOG`, then the level picked by
//! the `-v` count. Logs go to stderr so previews on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive for solgen.
pub const LOG_ENV: &str = "SOLGEN_LOG";

/// Default level for a given number of `-v` flags.
pub fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level(verbosity)))
}

pub fn init(verbosity: u8) {
    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(7), "debug");
    }
}
