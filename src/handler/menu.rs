//! Menu model carried inside `MenuResponse::menu_data`.
//!
//! The option list is encoded with a [`MenuEncoding`]; empty parameter and
//! sub-menu lists are left out of the blob.

use serde::{Deserialize, Serialize};

use crate::codec::MenuEncoding;
use crate::error::Result;
use crate::message::MenuResponse;

/// A selectable command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Display label.
    pub label: String,
    /// Invocation name passed back in `CommandRequest::command`.
    pub command: String,
    /// Ordered parameter list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterInfo>,
    /// Nested options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_menu: Vec<MenuOption>,
}

/// A named command parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl MenuOption {
    /// Create an option without parameters.
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
            parameters: Vec::new(),
            sub_menu: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn parameter(mut self, parameter: ParameterInfo) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a nested option.
    pub fn sub_option(mut self, option: MenuOption) -> Self {
        self.sub_menu.push(option);
        self
    }
}

impl ParameterInfo {
    /// Required parameter.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }

    /// Optional parameter.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }
}

impl MenuResponse {
    /// Encode an ordered option list into a menu response.
    pub fn from_options(options: &[MenuOption], encoding: MenuEncoding) -> Result<Self> {
        Ok(Self {
            menu_data: encoding.encode(&options)?,
        })
    }

    /// Decode the option list carried by this response.
    pub fn options(&self, encoding: MenuEncoding) -> Result<Vec<MenuOption>> {
        encoding.decode(&self.menu_data)
    }
}
