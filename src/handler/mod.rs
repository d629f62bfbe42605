//! Handler module - the capability set a plugin implements.
//!
//! Provides:
//! - [`PluginHandler`] - describe-self, execute-command and list-commands
//! - [`MenuOption`]/[`ParameterInfo`] - the menu model behind list-commands
//!
//! # Example
//!
//! ```
//! use gitspace_plugin_sdk::handler::PluginHandler;
//! use gitspace_plugin_sdk::message::{
//!     CommandRequest, CommandResponse, MenuRequest, MenuResponse, PluginInfo, PluginInfoRequest,
//! };
//! use gitspace_plugin_sdk::Result;
//!
//! struct Echo;
//!
//! impl PluginHandler for Echo {
//!     fn describe(&self, _: &PluginInfoRequest) -> Result<PluginInfo> {
//!         Ok(PluginInfo::new("echo", "0.1.0"))
//!     }
//!
//!     fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
//!         Ok(CommandResponse::success(request.command.clone()))
//!     }
//!
//!     fn list_commands(&self, _: &MenuRequest) -> Result<MenuResponse> {
//!         Ok(MenuResponse::default())
//!     }
//! }
//! ```

mod menu;

use std::sync::Arc;

pub use menu::{MenuOption, ParameterInfo};

use crate::error::Result;
use crate::message::{
    CommandRequest, CommandResponse, MenuRequest, MenuResponse, PluginInfo, PluginInfoRequest,
};

/// Plugin logic bound to one running plugin process.
///
/// The dispatch loop never inspects handler state. Bad business input should
/// come back as `Ok(CommandResponse::failure(..))`; `Err` is reserved for the
/// handler itself failing.
pub trait PluginHandler {
    /// Return the plugin's identity record.
    fn describe(&self, request: &PluginInfoRequest) -> Result<PluginInfo>;

    /// Run a named command with string parameters.
    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse>;

    /// List the selectable commands as an opaque menu blob.
    fn list_commands(&self, request: &MenuRequest) -> Result<MenuResponse>;
}

impl<H: PluginHandler + ?Sized> PluginHandler for &H {
    fn describe(&self, request: &PluginInfoRequest) -> Result<PluginInfo> {
        (**self).describe(request)
    }

    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        (**self).execute(request)
    }

    fn list_commands(&self, request: &MenuRequest) -> Result<MenuResponse> {
        (**self).list_commands(request)
    }
}

impl<H: PluginHandler + ?Sized> PluginHandler for Box<H> {
    fn describe(&self, request: &PluginInfoRequest) -> Result<PluginInfo> {
        (**self).describe(request)
    }

    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        (**self).execute(request)
    }

    fn list_commands(&self, request: &MenuRequest) -> Result<MenuResponse> {
        (**self).list_commands(request)
    }
}

impl<H: PluginHandler + ?Sized> PluginHandler for Arc<H> {
    fn describe(&self, request: &PluginInfoRequest) -> Result<PluginInfo> {
        (**self).describe(request)
    }

    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        (**self).execute(request)
    }

    fn list_commands(&self, request: &MenuRequest) -> Result<MenuResponse> {
        (**self).list_commands(request)
    }
}
