use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::errors::ConfigError;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {M} - {m}{n}";

/// Configures `log4rs` to log to `log_path` and, if `log_to_stdout`, additionally to stdout, at
/// `log_level`. Returns the log4rs handle; dropping it does not disable logging.
///
/// # Arguments
///
/// * 'log_path' - path to the log file
/// * 'log_level' - minimum level to log
/// * 'log_to_stdout' - whether to additionally log to stdout
pub fn setup_logger(
    log_path: &str,
    log_level: LevelFilter,
    log_to_stdout: bool,
) -> Result<log4rs::Handle, ConfigError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(log_path)?;

    let mut builder = Config::builder().appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder.build(root.build(log_level))?;
    let handle = log4rs::init_config(config)?;

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;

    static INIT: Once = Once::new();

    #[test]
    fn setup_logger_succeeds_against_a_writable_path() {
        let path = std::env::temp_dir().join("powerhub_scheduler_test.log");
        INIT.call_once(|| {
            let result = setup_logger(path.to_str().unwrap(), LevelFilter::Info, false);
            assert!(result.is_ok());
        });
    }
}
