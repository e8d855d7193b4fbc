//! Diagnostic logging to stderr.
//!
//! Rendered documents go to stdout (or `--output`), so logs never mix with them.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level requested on the command line, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Defer to `RUST_LOG`, falling back to `info`.
    Default,
    Level(Level),
}

impl Verbosity {
    /// `-q` wins over `-v`; each `-v` lowers the threshold by one level.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Level(Level::ERROR),
            (false, 0) => Self::Default,
            (false, 1) => Self::Level(Level::DEBUG),
            (false, _) => Self::Level(Level::TRACE),
        }
    }
}

pub fn init(verbosity: Verbosity) {
    let filter = match verbosity {
        Verbosity::Level(level) => EnvFilter::new(level.as_str()),
        Verbosity::Default => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Default);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Level(Level::DEBUG));
        assert_eq!(Verbosity::from_flags(3, false), Verbosity::Level(Level::TRACE));
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Level(Level::ERROR));
    }
}
