//! log4rs setup.
//!
//! `serve` logs through `log4rs.yml`. The one-shot commands only print
//! warnings to stderr and never touch the log file.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

const FALLBACK_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Initialise log4rs from `path`, or log to stderr at `info` when the file
/// cannot be loaded.
pub fn init_logging(path: &str) -> Result<(), Box<dyn Error>> {
    match log4rs::init_file(path, Default::default()) {
        Ok(()) => Ok(()),
        Err(e) => {
            log4rs::init_config(console_config(LevelFilter::Info)?)?;
            log::warn!("Could not load log config {path} ({e}), logging to stderr");
            Ok(())
        }
    }
}

/// Log to stderr only, at `level` and above.
pub fn init_console_logging(level: LevelFilter) -> Result<(), Box<dyn Error>> {
    log4rs::init_config(console_config(level)?)?;
    Ok(())
}

fn console_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}
