use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming};
use std::path::PathBuf;

/// Start the process logger.
///
/// Everything at `base_level` and above is written to rotating files under
/// `directory` and duplicated to stdout; warnings and errors also go to
/// stderr. The returned handle must be kept alive for the lifetime of the
/// process.
pub fn setup_logging(
    base_level: &str,
    directory: impl Into<PathBuf>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(base_level)?
        .log_to_file(FileSpec::default().directory(directory).basename("quantum-scope"))
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::All)
        .format_for_stdout(flexi_logger::colored_default_format)
        .format_for_stderr(flexi_logger::colored_default_format)
        .rotate(
            Criterion::Size(1024 * 1024), // 1MB
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()
}
