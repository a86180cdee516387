use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start the global logger.
///
/// `RUST_LOG` takes precedence over `level`. Output goes to stderr so it never
/// interleaves with the board printed on stdout.
pub fn init(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?
        .format(flexi_logger::colored_default_format)
        .log_to_stderr()
        .start()
}
