use std::fmt;
use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;

/// Verbosity of the messages printed on stderr while linting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(level)
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            value => Err(anyhow::anyhow!("Can't parse log level from '{value}'.")),
        }
    }
}

/// Install the global subscriber. Logs go to stderr so that structured
/// output on stdout (JSON, GitHub annotations) stays parseable.
pub fn init_logging(log_level: LogLevel) {
    let result = tracing_subscriber::fmt()
        .with_max_level(log_level.level_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if result.is_err() {
        // A subscriber is already installed, e.g. when `run()` is called
        // several times in the same process.
        tracing::debug!("Logging was already initialized");
    }
}
