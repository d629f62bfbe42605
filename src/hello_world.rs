//! Reference handler: the "Hello World" plugin.
//!
//! Commands:
//! - `greet` - needs `name`; `"Hello, <name>!"`
//! - `customize` - needs `greeting` and `name`; `"<greeting>, <name>!"`
//!
//! Missing input and unknown commands come back as structured failures, never
//! as handler errors.

use tracing::info;

use crate::codec::MenuEncoding;
use crate::error::Result;
use crate::handler::{MenuOption, ParameterInfo, PluginHandler};
use crate::message::{
    CommandRequest, CommandResponse, MenuRequest, MenuResponse, PluginInfo, PluginInfoRequest,
};

/// Plugin name reported by `describe`.
pub const PLUGIN_NAME: &str = "Hello World Plugin";

/// Plugin version reported by `describe`.
pub const PLUGIN_VERSION: &str = "1.0.0";

/// Failure message for an unrecognized command.
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// Failure message for `greet` without a name and no default.
pub const MISSING_NAME: &str = "Missing name parameter";

/// Failure message for `customize` without both parameters.
pub const MISSING_GREETING_OR_NAME: &str = "Missing greeting or name parameter";

/// Configuration for [`HelloWorld`].
#[derive(Debug, Clone, Default)]
pub struct HelloWorldConfig {
    /// Name used by `greet` when the request has none.
    ///
    /// `None` makes a missing name a structured failure.
    pub default_name: Option<String>,
    /// Encoding of the menu blob.
    pub menu_encoding: MenuEncoding,
}

/// The "Hello World" plugin.
#[derive(Debug, Clone, Default)]
pub struct HelloWorld {
    config: HelloWorldConfig,
}

impl HelloWorld {
    /// Create a handler with the given configuration.
    pub fn new(config: HelloWorldConfig) -> Self {
        Self { config }
    }

    /// The commands this plugin offers, in menu order.
    pub fn menu_options() -> Vec<MenuOption> {
        vec![
            MenuOption::new("Simple Greeting", "greet")
                .parameter(ParameterInfo::required("name", "Name of the person to greet")),
            MenuOption::new("Custom Greeting", "customize")
                .parameter(ParameterInfo::required("greeting", "Greeting to use"))
                .parameter(ParameterInfo::required("name", "Name of the person to greet")),
        ]
    }

    fn greet(&self, request: &CommandRequest) -> CommandResponse {
        let name = request
            .parameter("name")
            .or(self.config.default_name.as_deref());
        match name {
            Some(name) => CommandResponse::success(format!("Hello, {name}!")),
            None => CommandResponse::failure(MISSING_NAME),
        }
    }

    fn customize(&self, request: &CommandRequest) -> CommandResponse {
        match (request.parameter("greeting"), request.parameter("name")) {
            (Some(greeting), Some(name)) => {
                CommandResponse::success(format!("{greeting}, {name}!"))
            }
            _ => CommandResponse::failure(MISSING_GREETING_OR_NAME),
        }
    }
}

impl PluginHandler for HelloWorld {
    fn describe(&self, _request: &PluginInfoRequest) -> Result<PluginInfo> {
        info!("GetPluginInfo called");
        Ok(PluginInfo::new(PLUGIN_NAME, PLUGIN_VERSION))
    }

    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        info!(command = %request.command, "ExecuteCommand called");
        Ok(match request.command.as_str() {
            "greet" => self.greet(request),
            "customize" => self.customize(request),
            _ => CommandResponse::failure(UNKNOWN_COMMAND),
        })
    }

    fn list_commands(&self, _request: &MenuRequest) -> Result<MenuResponse> {
        let response = MenuResponse::from_options(&Self::menu_options(), self.config.menu_encoding)?;
        info!(size = response.menu_data.len(), "Menu encoded");
        Ok(response)
    }
}
