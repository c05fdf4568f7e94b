use anyhow::Context;
use contest_kernel::config::load_config;
use contest_kernel::domain::config::ServiceConfig;
use contest_kernel::settings::{ProcessEnv, SettingsLoader, resolve_mode};
use contest_logger::{LevelFilter, Logger, parse_level};
use contest_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ServiceConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let mode = resolve_mode(&ProcessEnv);
    let level = match cfg.logging.level.as_deref() {
        Some(raw) => parse_level(raw)?,
        None if mode.is_debug() => LevelFilter::DEBUG,
        None => LevelFilter::INFO,
    };

    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(cfg.logging.json);
    if let Some(directory) = &cfg.logging.directory {
        logger = logger.directory(directory);
    }
    let _log = logger.init()?;

    let settings = SettingsLoader::new().load().context("Critical: Settings are invalid")?;

    Server::builder().config(cfg).settings(settings).build()?.run().await
}
