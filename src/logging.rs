use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONFIG_FILE: &str = "log4rs.yml";

/// Loads `log4rs.yml` from the working directory when present, otherwise
/// logs `info` and above to stderr. A file that fails to load falls back to
/// the stderr logger with a warning and never stops the build.
pub fn init() -> anyhow::Result<()> {
    let (config, load_error) = resolve_config(Path::new(CONFIG_FILE))?;
    log4rs::init_config(config).context("failed to install logger")?;

    if let Some(e) = load_error {
        log::warn!("ignoring {CONFIG_FILE}, using default logging: {:?}", e);
    }
    Ok(())
}

fn resolve_config(path: &Path) -> anyhow::Result<(Config, Option<anyhow::Error>)> {
    if !path.is_file() {
        return Ok((default_config()?, None));
    }

    match log4rs::config::load_config_file(path, Default::default())
        .with_context(|| format!("failed to load logging config file {:?}", path))
    {
        Ok(config) => Ok((config, None)),
        Err(e) => Ok((default_config()?, Some(e))),
    }
}

fn default_config() -> anyhow::Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();

    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))
        .context("invalid default logging config")
}
