//! Hello World plugin - reference plugin process.
//!
//! Speaks the stdio protocol on stdin/stdout; diagnostics go to stderr and
//! to `~/.ssot/gitspace/logs/hello-world/`.
//!
//! `GITSPACE_PLUGIN_LOG_LEVEL` (`error`, `warn`, `info`, `debug`) sets the
//! log level; the default is `debug`.

use std::process::ExitCode;
use std::sync::Arc;

use gitspace_plugin_sdk::hello_world::HelloWorld;
use gitspace_plugin_sdk::logger::{render_log_summary, LoggerBuilder};
use gitspace_plugin_sdk::ServerBuilder;
use tracing_subscriber::filter::LevelFilter;

const COMPONENT: &str = "hello-world";
const LEVEL_ENV: &str = "GITSPACE_PLUGIN_LOG_LEVEL";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::INFO)
        .init();

    let level = match std::env::var(LEVEL_ENV) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring invalid {}={:?}", LEVEL_ENV, value);
            LevelFilter::DEBUG
        }),
        Err(_) => LevelFilter::DEBUG,
    };

    let logger = match LoggerBuilder::component(COMPONENT).level(level).build() {
        Ok(logger) => Arc::new(logger),
        Err(e) => {
            tracing::error!("failed to initialise logger: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logger.info("Hello World plugin starting", &[]);

    let result = ServerBuilder::new(HelloWorld::default())
        .logger(logger.clone())
        .serve_stdio();

    eprint!("{}", render_log_summary(&[logger.as_ref()]));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error("Plugin stopped", &[("error", &e)]);
            ExitCode::FAILURE
        }
    }
}
