use flexi_logger::{
    detailed_format, Age, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};
use rust_decimal::Decimal;

// Keep the returned handle alive for as long as the process logs.
pub fn init_logging(logdir: &str, logspec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(logspec)?
        .log_to_file(FileSpec::default().directory(logdir))
        .format(detailed_format)
        .duplicate_to_stdout(Duplicate::Info)
        .create_symlink("current.log")
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .start()
}

// Render an optional decimal, "-" when absent.
pub fn opt_decimal(d: Option<Decimal>) -> String {
    match d {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}
