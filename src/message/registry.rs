//! Message type registry.
//!
//! An explicit, immutable-after-startup table mapping wire tags to request
//! decoders (read side) and response kinds to wire tags (write side). The
//! dispatch loop receives the registry by value, so tests can run it against
//! a partial or renumbered table.
//!
//! # Example
//!
//! ```
//! use gitspace_plugin_sdk::message::{MessageRegistry, MessageType, Request};
//!
//! let registry = MessageRegistry::standard();
//! let request = registry.decode_request(1, &[]).unwrap();
//! assert!(matches!(request, Request::PluginInfo(_)));
//! assert_eq!(registry.tag_for(MessageType::Menu).unwrap(), 3);
//! ```

use std::collections::HashMap;

use prost::Message;

use super::{CommandRequest, MenuRequest, MessageType, PluginInfoRequest, Request, Response};
use crate::error::{PluginError, Result};

/// Decoder turning a payload into a typed request.
pub type RequestDecoder = fn(&[u8]) -> Result<Request>;

/// Registered entry for one wire tag.
#[derive(Clone, Copy)]
struct Entry {
    message_type: MessageType,
    decode: RequestDecoder,
}

/// Registry mapping wire tags to message schemas.
#[derive(Clone, Default)]
pub struct MessageRegistry {
    /// Entries by wire tag (for decoding).
    by_tag: HashMap<u32, Entry>,
    /// Wire tag by message type (for encoding).
    tag_by_type: HashMap<MessageType, u32>,
}

impl MessageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard catalog: 1 = PluginInfo, 2 = Command, 3 = Menu.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for message_type in MessageType::ALL {
            registry.by_tag.insert(
                message_type.tag(),
                Entry {
                    message_type,
                    decode: decoder_for(message_type),
                },
            );
            registry
                .tag_by_type
                .insert(message_type, message_type.tag());
        }
        registry
    }

    /// Register a message type under a wire tag.
    ///
    /// Existing tags are never renumbered: registering a tag or a message
    /// type twice fails with [`PluginError::DuplicateMessageType`].
    pub fn register(&mut self, tag: u32, message_type: MessageType) -> Result<()> {
        if self.by_tag.contains_key(&tag) || self.tag_by_type.contains_key(&message_type) {
            return Err(PluginError::DuplicateMessageType(tag));
        }
        self.by_tag.insert(
            tag,
            Entry {
                message_type,
                decode: decoder_for(message_type),
            },
        );
        self.tag_by_type.insert(message_type, tag);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, tag: u32, message_type: MessageType) -> Result<Self> {
        self.register(tag, message_type)?;
        Ok(self)
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: u32) -> bool {
        self.by_tag.contains_key(&tag)
    }

    /// Message type registered under a tag.
    pub fn message_type(&self, tag: u32) -> Option<MessageType> {
        self.by_tag.get(&tag).map(|e| e.message_type)
    }

    /// Wire tag for a message type.
    pub fn tag_for(&self, message_type: MessageType) -> Result<u32> {
        self.tag_by_type
            .get(&message_type)
            .copied()
            .ok_or(PluginError::UnknownMessageType(message_type.tag()))
    }

    /// Decode a request payload using the schema selected by `tag`.
    pub fn decode_request(&self, tag: u32, payload: &[u8]) -> Result<Request> {
        let entry = self
            .by_tag
            .get(&tag)
            .ok_or(PluginError::UnknownMessageType(tag))?;
        (entry.decode)(payload)
    }

    /// Encode a response, returning its wire tag and payload bytes.
    ///
    /// The tag comes from reverse lookup on the response's concrete schema.
    pub fn encode_response(&self, response: &Response) -> Result<(u32, Vec<u8>)> {
        let tag = self.tag_for(response.message_type())?;
        Ok((tag, response.encode_payload()))
    }
}

fn decoder_for(message_type: MessageType) -> RequestDecoder {
    match message_type {
        MessageType::PluginInfo => decode_plugin_info,
        MessageType::Command => decode_command,
        MessageType::Menu => decode_menu,
    }
}

fn decode_plugin_info(payload: &[u8]) -> Result<Request> {
    Ok(Request::PluginInfo(PluginInfoRequest::decode(payload)?))
}

fn decode_command(payload: &[u8]) -> Result<Request> {
    Ok(Request::Command(CommandRequest::decode(payload)?))
}

fn decode_menu(payload: &[u8]) -> Result<Request> {
    Ok(Request::Menu(MenuRequest::decode(payload)?))
}
