//! Polymorphic decoder: tree → sealed instance.
//!
//! Decoding resolves the variant from the discriminator first and then
//! hands the body to [`Sealed::read_variant`] through a [`FieldReader`]. Unit
//! variants skip the reader entirely and return the registry's singleton.
//!
//! # Discriminator collisions
//!
//! In object mode the discriminator entry shares the body with the fields. A
//! field whose wire key equals the discriminator key is looked up past the
//! discriminator entry first (the encoder writes it there as a second entry);
//! if no second entry exists, the discriminator entry itself is read again as
//! the field's value.

use crate::codec::Codec;
use crate::error::{CodecError, Result};
use crate::resolver;
use crate::schema::{ConfigValue, Sealed, VariantDescriptor};
use crate::types::TreeValue;
use std::sync::Arc;

/// Read access to the fields of one variant's body.
pub struct FieldReader<'a> {
    codec: &'a Codec<'a>,
    variant: &'a VariantDescriptor,
    entries: &'a [(String, TreeValue)],
    discriminator: Option<usize>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(
        codec: &'a Codec<'a>,
        variant: &'a VariantDescriptor,
        body: &'a TreeValue,
        discriminator: Option<usize>,
    ) -> Self {
        Self {
            codec,
            variant,
            entries: body.entries().unwrap_or_default(),
            discriminator,
        }
    }

    /// Decode the declared field `name`.
    ///
    /// # Errors
    ///
    /// `UndeclaredField` if the variant has no such field, `MissingField` if
    /// the key is absent and `V` has no absent value, or any error from
    /// decoding the value itself, wrapped with the field's key as its path.
    pub fn read<V: ConfigValue>(&self, name: &str) -> Result<V> {
        let index = self
            .variant
            .field_index(name)
            .ok_or_else(|| CodecError::UndeclaredField {
                variant: self.variant.name().to_string(),
                field: name.to_string(),
            })?;
        let key = self.variant.fields()[index].wire_key(self.codec.config());
        match self.lookup(&key) {
            Some(node) => V::from_tree(self.codec, node).map_err(|e| e.at(&key)),
            None => V::absent().ok_or_else(|| CodecError::MissingField(key.into_owned())),
        }
    }

    fn lookup(&self, key: &str) -> Option<&'a TreeValue> {
        let found = self
            .entries
            .iter()
            .enumerate()
            .find(|(i, (k, _))| Some(*i) != self.discriminator && k == key)
            .map(|(_, (_, v))| v);
        found.or_else(|| {
            let (k, v) = self.entries.get(self.discriminator?)?;
            (k == key).then_some(v)
        })
    }
}

/// A decoded value that is either freshly built or a shared singleton.
pub(crate) enum Decoded<T> {
    Owned(T),
    Shared(Arc<T>),
}

impl<T: Clone> Decoded<T> {
    pub(crate) fn into_owned(self) -> T {
        match self {
            Decoded::Owned(value) => value,
            Decoded::Shared(shared) => T::clone(&shared),
        }
    }

    pub(crate) fn into_shared(self) -> Arc<T> {
        match self {
            Decoded::Owned(value) => Arc::new(value),
            Decoded::Shared(shared) => shared,
        }
    }
}

pub(crate) fn decode_sealed<T: Sealed>(
    codec: &Codec<'_>,
    value: &TreeValue,
) -> Result<Decoded<T>> {
    let entry = codec.registry().resolve::<T>()?;
    let resolution = resolver::resolve::<T>(&entry, codec.config(), value)?;

    if let Some(singleton) = entry.singleton_at(resolution.index) {
        return Ok(Decoded::Shared(Arc::clone(singleton)));
    }

    let variant = entry.variant_at(resolution.index);
    let reader = FieldReader::new(codec, variant, resolution.body, resolution.discriminator);
    T::read_variant(variant, &reader).map(Decoded::Owned)
}
