//! Schema metadata for sealed types.
//!
//! A sealed type is a Rust `enum` whose variants are the closed set of
//! subtypes. It describes itself to the codec by implementing [`Sealed`]:
//! a list of [`VariantDescriptor`]s plus the two functions that move field
//! values in and out of a variant. Each field's type provides its own
//! encode/decode strategy through [`ConfigValue`], which is how nested sealed
//! types, lists and optionals recurse through the same pipeline.

use crate::codec::Codec;
use crate::config::Configuration;
use crate::decoder::FieldReader;
use crate::encoder::FieldWriter;
use crate::error::Result;
use crate::types::TreeValue;
use std::borrow::Cow;
use std::fmt;

/// Scalar shapes a field can expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    Integer,
    Float,
}

/// The shape of a field's value, recorded for diagnostics and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Optional(Box<FieldKind>),
    List(Box<FieldKind>),
    /// A nested sealed type, by its base name.
    Sealed(&'static str),
    /// An arbitrary subtree, passed through untouched.
    Any,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(ScalarKind::String) => write!(f, "string"),
            FieldKind::Scalar(ScalarKind::Bool) => write!(f, "bool"),
            FieldKind::Scalar(ScalarKind::Integer) => write!(f, "integer"),
            FieldKind::Scalar(ScalarKind::Float) => write!(f, "float"),
            FieldKind::Optional(inner) => write!(f, "optional {inner}"),
            FieldKind::List(inner) => write!(f, "list of {inner}"),
            FieldKind::Sealed(name) => write!(f, "{name}"),
            FieldKind::Any => write!(f, "any"),
        }
    }
}

/// One declared field of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    wire_name: Option<String>,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            wire_name: None,
            kind,
        }
    }

    /// Describe a field whose value type is `V`.
    pub fn of<V: ConfigValue>(name: impl Into<String>) -> Self {
        Self::new(name, V::kind())
    }

    /// Write and read this field under `wire_name` instead of its declared name.
    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wire_name(&self) -> Option<&str> {
        self.wire_name.as_deref()
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The key this field occupies in a body under `config`. An explicit wire
    /// name always wins over the naming convention.
    pub fn wire_key<'a>(&'a self, config: &Configuration) -> Cow<'a, str> {
        match &self.wire_name {
            Some(wire) => Cow::Borrowed(wire),
            None => config.field_key(&self.name),
        }
    }
}

/// Schema metadata for one variant of a sealed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDescriptor {
    name: String,
    label: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl VariantDescriptor {
    /// A variant with the given structural name and, so far, no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            fields: Vec::new(),
        }
    }

    /// Use `label` on the wire instead of the structural name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a field. Fields are encoded in the order they are added.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Structural (Rust-side) name of the variant.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire label: the override if one was declared, otherwise the structural name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// False for unit variants, which carry no fields.
    pub fn is_object_variant(&self) -> bool {
        !self.fields.is_empty()
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A closed set of variants that can be encoded polymorphically.
///
/// Implemented by hand on an `enum`:
///
/// ```
/// use tagtree_core::{
///     FieldDescriptor, FieldReader, FieldWriter, Result, Sealed, VariantDescriptor,
/// };
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Backend {
///     Memory,
///     Disk { path: String },
/// }
///
/// impl Sealed for Backend {
///     const NAME: &'static str = "Backend";
///
///     fn variants() -> Vec<VariantDescriptor> {
///         vec![
///             VariantDescriptor::new("Memory").with_label("memory"),
///             VariantDescriptor::new("Disk")
///                 .with_label("disk")
///                 .with_field(FieldDescriptor::of::<String>("path")),
///         ]
///     }
///
///     fn variant_name(&self) -> &'static str {
///         match self {
///             Backend::Memory => "Memory",
///             Backend::Disk { .. } => "Disk",
///         }
///     }
///
///     fn write_fields(&self, fields: &mut FieldWriter<'_>) -> Result<()> {
///         if let Backend::Disk { path } = self {
///             fields.write("path", path)?;
///         }
///         Ok(())
///     }
///
///     fn read_variant(variant: &VariantDescriptor, fields: &FieldReader<'_>) -> Result<Self> {
///         match variant.name() {
///             "Disk" => Ok(Backend::Disk { path: fields.read("path")? }),
///             _ => Ok(Backend::Memory),
///         }
///     }
/// }
/// ```
pub trait Sealed: Clone + Send + Sync + 'static {
    /// Name of the sealed base type, used in diagnostics.
    const NAME: &'static str;

    /// Every variant, in declaration order.
    fn variants() -> Vec<VariantDescriptor>;

    /// Structural name of this instance's variant. Must match one of the
    /// names returned by [`Sealed::variants`].
    fn variant_name(&self) -> &'static str;

    /// Write each declared field of this instance.
    fn write_fields(&self, fields: &mut FieldWriter<'_>) -> Result<()>;

    /// Build the variant described by `variant` from its fields. Called once
    /// per unit variant at registration; its result is cached.
    fn read_variant(variant: &VariantDescriptor, fields: &FieldReader<'_>) -> Result<Self>;
}

/// Encode/decode strategy for a field's value type.
pub trait ConfigValue: Sized {
    /// Shape of the value, recorded in the field's descriptor.
    fn kind() -> FieldKind;

    fn to_tree(&self, codec: &Codec<'_>) -> Result<TreeValue>;

    fn from_tree(codec: &Codec<'_>, value: &TreeValue) -> Result<Self>;

    /// Value used when the field's key is absent. `None` makes the field required.
    fn absent() -> Option<Self> {
        None
    }
}
