//! Discriminator resolution: which variant does a tree describe?
//!
//! - **Object mode**: the input is an object; the label sits under the
//!   configured discriminator key and the same object is the body.
//! - **Array mode**: the input is `[label, body]`, exactly two elements, with
//!   an object body (an empty one for unit variants).

use crate::config::Configuration;
use crate::error::{CodecError, Result};
use crate::registry::SealedEntry;
use crate::schema::Sealed;
use crate::types::{Scalar, TreeValue};
use tracing::trace;

/// Outcome of resolution: the chosen variant and where to read its fields.
#[derive(Debug)]
pub(crate) struct Resolution<'v> {
    pub index: usize,
    pub body: &'v TreeValue,
    /// Position of the discriminator entry inside `body` (object mode only).
    /// Field reads skip it.
    pub discriminator: Option<usize>,
}

pub(crate) fn resolve<'v, T: Sealed>(
    entry: &SealedEntry<T>,
    config: &Configuration,
    value: &'v TreeValue,
) -> Result<Resolution<'v>> {
    let (label, body, discriminator) = if config.use_array_polymorphism() {
        let (label, body) = split_array(value)?;
        (label, body, None)
    } else {
        let (label, position) = find_discriminator(value, config.class_discriminator())?;
        (label, value, Some(position))
    };

    trace!(
        sealed = T::NAME,
        array_mode = config.use_array_polymorphism(),
        label = %label,
        "resolving discriminator"
    );

    let index = entry
        .index_of_label(&label)
        .ok_or(CodecError::UnknownDiscriminator(label))?;

    Ok(Resolution {
        index,
        body,
        discriminator,
    })
}

/// Object mode: read the label at `key`, returning it with the entry's position.
fn find_discriminator(value: &TreeValue, key: &str) -> Result<(String, usize)> {
    let entries = value
        .entries()
        .ok_or_else(|| CodecError::mismatch("object", value.kind_name()))?;
    let (position, node) = entries
        .iter()
        .enumerate()
        .find(|(_, (k, _))| k == key)
        .map(|(i, (_, v))| (i, v))
        .ok_or_else(|| CodecError::MissingDiscriminator {
            key: key.to_string(),
        })?;
    Ok((read_label(node)?, position))
}

/// Array mode: split `[label, body]`.
fn split_array(value: &TreeValue) -> Result<(String, &TreeValue)> {
    let items = value
        .as_array()
        .ok_or_else(|| CodecError::mismatch("array", value.kind_name()))?;
    let [label, body] = items else {
        return Err(CodecError::MalformedArrayShape { got: items.len() });
    };
    if body.entries().is_none() {
        return Err(CodecError::mismatch("object body", body.kind_name()));
    }
    Ok((read_label(label)?, body))
}

fn read_label(node: &TreeValue) -> Result<String> {
    match node {
        TreeValue::Scalar(Scalar::Null) => Err(CodecError::mismatch("scalar label", "null")),
        TreeValue::Scalar(s) => Ok(s.as_text()),
        other => Err(CodecError::mismatch("scalar label", other.kind_name())),
    }
}
