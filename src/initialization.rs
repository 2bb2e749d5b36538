use log::info;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General, CONFIG_FILE};
use crate::errors::LoggingError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Loads configuration and sets up logging
///
pub fn init() -> anyhow::Result<Config> {
    let config = load_config(CONFIG_FILE)?;
    setup_logger(&config.general)?;

    info!("windresource version: {}", env!("CARGO_PKG_VERSION"));

    Ok(config)
}

/// Sets up log4rs with a console appender and, if a log path is given, a file appender
///
/// # Arguments
///
/// * 'general' - logging parameters
fn setup_logger(general: &General) -> Result<(), LoggingError> {
    let target = if general.log_to_stdout { Target::Stdout } else { Target::Stderr };
    let console = ConsoleAppender::builder()
        .target(target)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut builder = LogConfig::builder()
        .appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if !general.log_path.is_empty() {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&general.log_path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = builder.build(root.build(general.log_level))?;
    log4rs::init_config(config)?;

    Ok(())
}
