//! Polymorphic encoder: sealed instance → tree.
//!
//! The encoder looks up the instance's wire label, collects its fields through
//! a [`FieldWriter`], and combines the two in the configured shape:
//!
//! - **Object mode**: `{<discriminator>: label, field1: .., field2: ..}` with the
//!   discriminator first and fields in declaration order. A field whose wire
//!   key equals the discriminator key is placed right after the discriminator
//!   entry, under the same key.
//! - **Array mode**: `[label, {field1: .., field2: ..}]`, with `{}` for unit variants.
//!
//! Output is deterministic: equal inputs give structurally equal trees.

use crate::codec::Codec;
use crate::error::{CodecError, Result};
use crate::schema::{ConfigValue, Sealed, VariantDescriptor};
use crate::types::TreeValue;

/// Collects the encoded fields of one variant.
pub struct FieldWriter<'a> {
    codec: &'a Codec<'a>,
    variant: &'a VariantDescriptor,
    slots: Vec<Option<TreeValue>>,
}

impl<'a> FieldWriter<'a> {
    fn new(codec: &'a Codec<'a>, variant: &'a VariantDescriptor) -> Self {
        Self {
            codec,
            variant,
            slots: vec![None; variant.fields().len()],
        }
    }

    /// Encode `value` as the declared field `name`. Call order does not
    /// matter; fields are emitted in declaration order.
    pub fn write<V: ConfigValue>(&mut self, name: &str, value: &V) -> Result<()> {
        let index = self
            .variant
            .field_index(name)
            .ok_or_else(|| CodecError::UndeclaredField {
                variant: self.variant.name().to_string(),
                field: name.to_string(),
            })?;
        let key = self.variant.fields()[index].wire_key(self.codec.config());
        let tree = value.to_tree(self.codec).map_err(|e| e.at(&key))?;
        self.slots[index] = Some(tree);
        Ok(())
    }

    /// Pair every slot with its wire key, failing on fields never written.
    fn finish(self) -> Result<Vec<(String, TreeValue)>> {
        let config = self.codec.config();
        self.variant
            .fields()
            .iter()
            .zip(self.slots)
            .map(|(field, slot)| {
                let key = field.wire_key(config).into_owned();
                match slot {
                    Some(tree) => Ok((key, tree)),
                    None => Err(CodecError::MissingField(key)),
                }
            })
            .collect()
    }
}

pub(crate) fn encode_sealed<T: Sealed>(codec: &Codec<'_>, value: &T) -> Result<TreeValue> {
    let entry = codec.registry().resolve::<T>()?;
    let name = value.variant_name();
    let variant = entry
        .by_name(name)
        .ok_or_else(|| CodecError::UnregisteredVariant {
            sealed: T::NAME.to_string(),
            variant: name.to_string(),
        })?;

    let mut writer = FieldWriter::new(codec, variant);
    value.write_fields(&mut writer)?;
    let fields = writer.finish()?;
    let label = TreeValue::string(variant.label());

    let config = codec.config();
    if config.use_array_polymorphism() {
        return Ok(TreeValue::Array(vec![label, TreeValue::Object(fields)]));
    }

    let key = config.class_discriminator();
    let (colliding, rest): (Vec<_>, Vec<_>) = fields.into_iter().partition(|(k, _)| k == key);
    let mut entries = Vec::with_capacity(1 + colliding.len() + rest.len());
    entries.push((key.to_string(), label));
    entries.extend(colliding);
    entries.extend(rest);
    Ok(TreeValue::Object(entries))
}
