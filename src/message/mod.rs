//! Message module - the typed catalog and the tag registry.
//!
//! Provides:
//! - protobuf message structs exchanged with the host
//! - [`MessageType`] wire tags
//! - [`Request`]/[`Response`] sum types routed by the dispatch loop
//! - [`MessageRegistry`] mapping tags to schemas

mod catalog;
mod registry;

use prost::Message;

pub use catalog::{
    CommandRequest, CommandResponse, MenuItem, MenuRequest, MenuResponse, PluginInfo,
    PluginInfoRequest,
};
pub use registry::{MessageRegistry, RequestDecoder};

/// Message kinds in the catalog, with their standard wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// `PluginInfoRequest` / `PluginInfo`.
    PluginInfo,
    /// `CommandRequest` / `CommandResponse`.
    Command,
    /// `MenuRequest` / `MenuResponse`.
    Menu,
}

impl MessageType {
    /// Every message type, in tag order.
    pub const ALL: [MessageType; 3] = [Self::PluginInfo, Self::Command, Self::Menu];

    /// Standard wire tag. Stable for the lifetime of the protocol.
    #[inline]
    pub fn tag(self) -> u32 {
        match self {
            Self::PluginInfo => 1,
            Self::Command => 2,
            Self::Menu => 3,
        }
    }

    /// Message type for a standard wire tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

/// A decoded request (host → plugin).
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    PluginInfo(PluginInfoRequest),
    Command(CommandRequest),
    Menu(MenuRequest),
}

impl Request {
    /// Message type of this request.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::PluginInfo(_) => MessageType::PluginInfo,
            Self::Command(_) => MessageType::Command,
            Self::Menu(_) => MessageType::Menu,
        }
    }

    /// Encode the request payload (without envelope).
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Self::PluginInfo(m) => m.encode_to_vec(),
            Self::Command(m) => m.encode_to_vec(),
            Self::Menu(m) => m.encode_to_vec(),
        }
    }
}

/// A response produced by a handler (plugin → host).
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    PluginInfo(PluginInfo),
    Command(CommandResponse),
    Menu(MenuResponse),
}

impl Response {
    /// Message type of this response.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::PluginInfo(_) => MessageType::PluginInfo,
            Self::Command(_) => MessageType::Command,
            Self::Menu(_) => MessageType::Menu,
        }
    }

    /// Encode the response payload (without envelope).
    pub fn encode_payload(&self) -> Vec<u8> {
        match self {
            Self::PluginInfo(m) => m.encode_to_vec(),
            Self::Command(m) => m.encode_to_vec(),
            Self::Menu(m) => m.encode_to_vec(),
        }
    }
}
