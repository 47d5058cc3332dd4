//! The encode/decode entry points.
//!
//! A [`Codec`] pairs a [`Registry`] with a [`Configuration`] for the duration
//! of one call. It is handed to every [`ConfigValue`](crate::ConfigValue)
//! so that nested sealed fields are encoded with the same settings.

use crate::config::Configuration;
use crate::decoder;
use crate::encoder;
use crate::error::Result;
use crate::registry::Registry;
use crate::schema::Sealed;
use crate::types::TreeValue;
use std::sync::Arc;

/// Per-call codec context.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    registry: &'a Registry,
    config: &'a Configuration,
}

impl<'a> Codec<'a> {
    pub fn new(registry: &'a Registry, config: &'a Configuration) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// Encode a sealed instance into a tree in the configured shape.
    pub fn encode<T: Sealed>(&self, value: &T) -> Result<TreeValue> {
        encoder::encode_sealed(self, value)
    }

    /// Decode a tree into a sealed instance.
    pub fn decode<T: Sealed>(&self, value: &TreeValue) -> Result<T> {
        decoder::decode_sealed::<T>(self, value).map(decoder::Decoded::into_owned)
    }

    /// Decode a tree into a shared instance. Unit variants come back as the
    /// registry's cached singleton, so repeated decodes are `Arc::ptr_eq`.
    pub fn decode_shared<T: Sealed>(&self, value: &TreeValue) -> Result<Arc<T>> {
        decoder::decode_sealed::<T>(self, value).map(decoder::Decoded::into_shared)
    }
}

/// Encode `value` into a configuration tree.
pub fn encode_to_config<T: Sealed>(
    registry: &Registry,
    config: &Configuration,
    value: &T,
) -> Result<TreeValue> {
    Codec::new(registry, config).encode(value)
}

/// Decode a configuration tree into a `T`.
///
/// # Errors
///
/// Fails with the first problem found: a missing or unknown discriminator, a
/// malformed `[label, body]` array, a missing field, or a type mismatch.
/// No partial result is returned.
pub fn decode_from_config<T: Sealed>(
    registry: &Registry,
    config: &Configuration,
    value: &TreeValue,
) -> Result<T> {
    Codec::new(registry, config).decode(value)
}

/// Like [`decode_from_config`], but returns a shared instance that preserves
/// the identity of unit variants.
pub fn decode_shared<T: Sealed>(
    registry: &Registry,
    config: &Configuration,
    value: &TreeValue,
) -> Result<Arc<T>> {
    Codec::new(registry, config).decode_shared(value)
}

/// Encode `value` and print the tree as compact JSON.
///
/// JSON objects cannot repeat keys, so a field whose wire name equals the
/// discriminator key keeps only the field's value.
pub fn encode_json<T: Sealed>(
    registry: &Registry,
    config: &Configuration,
    value: &T,
) -> Result<String> {
    let tree = encode_to_config(registry, config, value)?;
    let json: serde_json::Value = tree.into();
    Ok(serde_json::to_string(&json)?)
}

/// Parse JSON text and decode it into a `T`.
pub fn decode_json<T: Sealed>(
    registry: &Registry,
    config: &Configuration,
    json: &str,
) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    decode_from_config(registry, config, &TreeValue::from(value))
}
