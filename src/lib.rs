//! # gitspace-plugin-sdk
//!
//! Plugin-side SDK for the gitspace stdio plugin protocol.
//!
//! A host launches the plugin as a child process and exchanges typed,
//! length-delimited protobuf messages with it over stdin/stdout.
//!
//! ## Architecture
//!
//! - **Wire protocol** ([`protocol`]): `tag | u32 LE length | payload` envelopes
//! - **Catalog** ([`message`]): protobuf messages and the tag registry
//! - **Dispatch loop** ([`server`]): read → decode → handle → encode → write
//! - **Logger** ([`logger`]): dual-sink, rate-limited, one file per run
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gitspace_plugin_sdk::hello_world::HelloWorld;
//! use gitspace_plugin_sdk::logger::RateLimitedLogger;
//! use gitspace_plugin_sdk::ServerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logger = Arc::new(RateLimitedLogger::new("hello-world")?);
//!
//!     ServerBuilder::new(HelloWorld::default())
//!         .logger(logger)
//!         .serve_stdio()?;
//!
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod handler;
pub mod hello_world;
pub mod logger;
pub mod message;
pub mod paths;
pub mod protocol;
pub mod server;

pub use error::{LoggerError, PluginError, Result};
pub use handler::PluginHandler;
pub use logger::RateLimitedLogger;
pub use server::{HandlerErrorPolicy, PluginServer, ServerBuilder, ServerConfig};
