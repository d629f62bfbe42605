//! Server builder and dispatch loop.
//!
//! The [`ServerBuilder`] provides a fluent API for configuring the loop.
//! The [`PluginServer`] then runs, one message at a time:
//! 1. Read one envelope from the input stream
//! 2. Decode it through the [`MessageRegistry`]
//! 3. Route the request to the matching [`PluginHandler`] operation
//! 4. Encode the response and write it back, flushing immediately
//!
//! The loop stops on clean end-of-stream between messages (`Ok(())`) or
//! when the input stream itself fails (`Err`). Malformed messages, unknown
//! tags, handler failures and write failures are logged and skipped.
//!
//! # Example
//!
//! ```no_run
//! use gitspace_plugin_sdk::hello_world::HelloWorld;
//! use gitspace_plugin_sdk::ServerBuilder;
//!
//! fn main() -> gitspace_plugin_sdk::Result<()> {
//!     ServerBuilder::new(HelloWorld::default()).serve_stdio()
//! }
//! ```

use std::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;

use tracing::Level;

use crate::error::{PluginError, Result};
use crate::handler::PluginHandler;
use crate::logger::{emit, Field, RateLimitedLogger};
use crate::message::{CommandResponse, MessageRegistry, Request, Response};
use crate::protocol::{Frame, FrameReader, FrameWriter, TagWidth, DEFAULT_MAX_PAYLOAD_SIZE};

/// What to do when a handler operation returns `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerErrorPolicy {
    /// Answer command requests with a structured failure so every command
    /// gets exactly one reply. Requests whose response has no failure shape
    /// (plugin info, menu) are still dropped.
    #[default]
    Reply,
    /// Log the error and send nothing.
    Drop,
}

/// Configuration for the dispatch loop.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Width of the type tag on both streams.
    pub tag_width: TagWidth,
    /// Largest payload accepted or produced.
    pub max_payload_size: u32,
    /// Handling of handler failures.
    pub handler_error_policy: HandlerErrorPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tag_width: TagWidth::default(),
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            handler_error_policy: HandlerErrorPolicy::default(),
        }
    }
}

/// Builder for configuring and creating a [`PluginServer`].
pub struct ServerBuilder<H> {
    handler: H,
    registry: MessageRegistry,
    config: ServerConfig,
    logger: Option<Arc<RateLimitedLogger>>,
}

impl<H: PluginHandler> ServerBuilder<H> {
    /// Create a builder around the plugin's handler.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            registry: MessageRegistry::standard(),
            config: ServerConfig::default(),
            logger: None,
        }
    }

    /// Replace the message registry.
    ///
    /// Default: [`MessageRegistry::standard`]
    pub fn registry(mut self, registry: MessageRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the tag width.
    ///
    /// Default: [`TagWidth::U8`]
    pub fn tag_width(mut self, width: TagWidth) -> Self {
        self.config.tag_width = width;
        self
    }

    /// Set the maximum payload size.
    ///
    /// Default: 64 MiB
    pub fn max_payload_size(mut self, limit: u32) -> Self {
        self.config.max_payload_size = limit;
        self
    }

    /// Set the handler error policy.
    ///
    /// Default: [`HandlerErrorPolicy::Reply`]
    pub fn handler_error_policy(mut self, policy: HandlerErrorPolicy) -> Self {
        self.config.handler_error_policy = policy;
        self
    }

    /// Route the loop's diagnostics through a rate-limited logger.
    ///
    /// Without one, diagnostics go to the global `tracing` subscriber.
    pub fn logger(mut self, logger: Arc<RateLimitedLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Bind the loop to an input and an output stream.
    pub fn build<R: Read, W: Write>(self, input: R, output: W) -> PluginServer<H, R, W> {
        let config = self.config;
        PluginServer {
            handler: self.handler,
            registry: self.registry,
            reader: FrameReader::with_options(input, config.tag_width, config.max_payload_size),
            writer: FrameWriter::with_options(output, config.tag_width, config.max_payload_size),
            policy: config.handler_error_policy,
            logger: self.logger,
        }
    }

    /// Run the loop on the process's stdin and stdout.
    pub fn serve_stdio(self) -> Result<()> {
        self.build(io::stdin().lock(), io::stdout()).run()
    }
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More input may follow.
    Continue,
    /// The input stream ended cleanly.
    Finished,
}

/// A dispatch loop bound to one handler and one pair of streams.
pub struct PluginServer<H, R, W: Write> {
    handler: H,
    registry: MessageRegistry,
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    policy: HandlerErrorPolicy,
    logger: Option<Arc<RateLimitedLogger>>,
}

impl<H: PluginHandler, R: Read, W: Write> PluginServer<H, R, W> {
    /// Run until end-of-stream or a fatal input error.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == Step::Continue {}
        Ok(())
    }

    /// Read, handle and answer a single message.
    pub fn step(&mut self) -> Result<Step> {
        self.report(Level::DEBUG, "Waiting for message", &[]);

        let frame = match self.reader.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                self.report(Level::INFO, "Received EOF, exiting", &[]);
                return Ok(Step::Finished);
            }
            Err(e) if e.is_fatal() => {
                self.report(Level::ERROR, "Input stream failed", &[("error", &e)]);
                return Err(e);
            }
            Err(e) => {
                self.report(Level::ERROR, "Error reading message", &[("error", &e)]);
                return Ok(Step::Continue);
            }
        };

        let request = match self.decode(&frame) {
            Ok(request) => request,
            Err(e) => {
                self.report(
                    Level::ERROR,
                    "Error decoding message",
                    &[("type", &frame.tag), ("error", &e)],
                );
                return Ok(Step::Continue);
            }
        };
        self.report(
            Level::DEBUG,
            "Received message",
            &[("type", &frame.tag), ("content", &DebugFmt(&request))],
        );

        let Some(response) = self.dispatch(request) else {
            return Ok(Step::Continue);
        };

        // A response type missing from the registry is a programming error.
        let (tag, payload) = self.registry.encode_response(&response)?;
        self.report(
            Level::DEBUG,
            "Sending response",
            &[("type", &tag), ("content", &DebugFmt(&response))],
        );
        match self.writer.write_frame(tag, &payload) {
            Ok(()) => self.report(Level::DEBUG, "Response sent", &[]),
            Err(e) => self.report(Level::ERROR, "Error writing response", &[("error", &e)]),
        }
        Ok(Step::Continue)
    }

    fn decode(&self, frame: &Frame) -> Result<Request> {
        self.registry.decode_request(frame.tag, frame.payload())
    }

    /// Route a request to its handler operation.
    ///
    /// Returns `None` when nothing should be written back.
    fn dispatch(&self, request: Request) -> Option<Response> {
        let outcome = match &request {
            Request::PluginInfo(req) => self.handler.describe(req).map(Response::PluginInfo),
            Request::Command(req) => self.handler.execute(req).map(Response::Command),
            Request::Menu(req) => self.handler.list_commands(req).map(Response::Menu),
        };

        match outcome {
            Ok(response) => Some(response),
            Err(e) => {
                let tag = request.message_type().tag();
                self.report(
                    Level::ERROR,
                    "Error handling message",
                    &[("type", &tag), ("error", &e)],
                );
                match (self.policy, request) {
                    (HandlerErrorPolicy::Reply, Request::Command(_)) => {
                        Some(Response::Command(CommandResponse::failure(e.to_string())))
                    }
                    _ => None,
                }
            }
        }
    }

    fn report(&self, level: Level, message: &str, fields: &[Field<'_>]) {
        match &self.logger {
            Some(logger) => logger.log(level, message, fields),
            None => emit(level, message, fields),
        }
    }

    /// Consume the server, returning the output stream.
    pub fn into_output(self) -> W {
        self.writer.into_inner()
    }
}

/// Display adapter printing a value's `Debug` form.
struct DebugFmt<'a, T: fmt::Debug>(&'a T);

impl<T: fmt::Debug> fmt::Display for DebugFmt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hello_world::HelloWorld;

    #[test]
    fn test_builder_defaults() {
        let builder = ServerBuilder::new(HelloWorld::default());
        assert_eq!(builder.config.tag_width, TagWidth::U8);
        assert_eq!(builder.config.max_payload_size, DEFAULT_MAX_PAYLOAD_SIZE);
        assert_eq!(
            builder.config.handler_error_policy,
            HandlerErrorPolicy::Reply
        );
        assert!(builder.logger.is_none());
    }

    #[test]
    fn test_builder_configuration() {
        let builder = ServerBuilder::new(HelloWorld::default())
            .tag_width(TagWidth::U32)
            .max_payload_size(1024)
            .handler_error_policy(HandlerErrorPolicy::Drop);

        assert_eq!(builder.config.tag_width, TagWidth::U32);
        assert_eq!(builder.config.max_payload_size, 1024);
        assert_eq!(builder.config.handler_error_policy, HandlerErrorPolicy::Drop);
    }

    #[test]
    fn test_step_on_empty_input_finishes() {
        let mut server = ServerBuilder::new(HelloWorld::default()).build(io::empty(), Vec::new());
        assert_eq!(server.step().unwrap(), Step::Finished);
        assert!(server.into_output().is_empty());
    }
}
