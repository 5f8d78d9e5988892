use tracing_subscriber::EnvFilter;

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    #[value(alias = "fatal")]
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Installs the stderr logger. `RUST_LOG` takes precedence over `level` when set.
pub fn init(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_aliases() {
        assert_eq!(LogLevel::from_str("warning", true).unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("fatal", true).unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("DEBUG", true).unwrap(), LogLevel::Debug);
    }

    #[test]
    fn test_filters_parse() {
        for level in LogLevel::value_variants() {
            assert!(EnvFilter::try_new(level.as_filter()).is_ok());
        }
    }
}
