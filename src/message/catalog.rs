//! Message catalog for the `gitspace.plugin` protobuf package.
//!
//! Field numbers match the host's schema and must never be renumbered.

use std::collections::HashMap;

/// Request for the plugin's identity. Carries no fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PluginInfoRequest {}

/// Plugin identity record.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PluginInfo {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub version: String,
}

/// Request to run a named command.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommandRequest {
    #[prost(string, tag = "1")]
    pub command: String,
    #[prost(map = "string, string", tag = "2")]
    pub parameters: HashMap<String, String>,
}

/// Outcome of a command.
///
/// `success == false` is an application-level failure, not a protocol error.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommandResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub result: String,
    #[prost(string, tag = "3")]
    pub error_message: String,
}

/// Request for the list of selectable commands. Carries no fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MenuRequest {}

/// Flat menu entry as declared in the schema.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MenuItem {
    #[prost(string, tag = "1")]
    pub label: String,
    #[prost(string, tag = "2")]
    pub command: String,
}

/// Menu reply; `menu_data` is an opaque structured-data blob.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MenuResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub menu_data: Vec<u8>,
}

impl PluginInfo {
    /// Create an identity record.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl CommandRequest {
    /// Create a command request from a name and `(key, value)` pairs.
    pub fn new<I, K, V>(command: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            command: command.into(),
            parameters: parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

impl CommandResponse {
    /// Successful result.
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: result.into(),
            error_message: String::new(),
        }
    }

    /// Structured failure carrying an explanatory message.
    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: String::new(),
            error_message: error_message.into(),
        }
    }
}
