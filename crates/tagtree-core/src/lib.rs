//! # tagtree-core
//!
//! Polymorphic tagged-union codec for configuration value trees.
//!
//! A *sealed* type is a Rust `enum` with a closed set of variants. This crate
//! encodes such values into a generic [`TreeValue`] (ordered objects, arrays,
//! scalars) and decodes them back, using a discriminator label to pick the
//! variant. Two wire shapes are supported:
//!
//! - **Object mode** (default): `{type: "data_class", name: "n", intField: 10}`
//! - **Array mode**: `["data_class", {name: "n", intField: 10}]`
//!
//! Variants may carry a wire label different from their structural name, and
//! fields may carry a wire key different from their declared name.
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//! use tagtree_core::{
//!     decode_from_config, encode_to_config, Configuration, FieldDescriptor, FieldReader,
//!     FieldWriter, Registry, Result, Sealed, TreeValue, VariantDescriptor,
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Shape {
//!     Circle { radius: f64 },
//!     Square { side: f64 },
//! }
//!
//! impl Sealed for Shape {
//!     const NAME: &'static str = "Shape";
//!
//!     fn variants() -> Vec<VariantDescriptor> {
//!         vec![
//!             VariantDescriptor::new("Circle")
//!                 .with_label("circle")
//!                 .with_field(FieldDescriptor::of::<f64>("radius")),
//!             VariantDescriptor::new("Square")
//!                 .with_label("square")
//!                 .with_field(FieldDescriptor::of::<f64>("side")),
//!         ]
//!     }
//!
//!     fn variant_name(&self) -> &'static str {
//!         match self {
//!             Shape::Circle { .. } => "Circle",
//!             Shape::Square { .. } => "Square",
//!         }
//!     }
//!
//!     fn write_fields(&self, fields: &mut FieldWriter<'_>) -> Result<()> {
//!         match self {
//!             Shape::Circle { radius } => fields.write("radius", radius),
//!             Shape::Square { side } => fields.write("side", side),
//!         }
//!     }
//!
//!     fn read_variant(variant: &VariantDescriptor, fields: &FieldReader<'_>) -> Result<Self> {
//!         match variant.name() {
//!             "Circle" => Ok(Shape::Circle { radius: fields.read("radius")? }),
//!             _ => Ok(Shape::Square { side: fields.read("side")? }),
//!         }
//!     }
//! }
//!
//! let registry = Registry::new();
//! let config = Configuration::default();
//!
//! let tree = encode_to_config(&registry, &config, &Shape::Circle { radius: 1.5 }).unwrap();
//! assert_eq!(tree, TreeValue::from(json!({"type": "circle", "radius": 1.5})));
//!
//! let arrays = config.with_array_polymorphism(true);
//! let input = TreeValue::from(json!(["square", {"side": 2.0}]));
//! let shape: Shape = decode_from_config(&registry, &arrays, &input).unwrap();
//! assert_eq!(shape, Shape::Square { side: 2.0 });
//! ```
//!
//! ## Modules
//!
//! - [`types`]: `TreeValue` / `Scalar` tree model and the `serde_json` bridge
//! - [`config`]: `Configuration` (shape, discriminator key, naming convention)
//! - [`schema`]: `Sealed`, `ConfigValue`, variant and field descriptors
//! - [`registry`]: memoized per-type label/name indexes and unit singletons
//! - `resolver`: discriminator resolution for both shapes (internal)
//! - [`decoder`] / [`encoder`]: the field reader/writer and the two pipelines
//! - [`codec`]: `Codec` context and the top-level operations
//! - [`error`]: `CodecError`

pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod registry;
mod resolver;
pub mod schema;
pub mod types;
mod value;

pub use codec::{
    decode_from_config, decode_json, decode_shared, encode_json, encode_to_config, Codec,
};
pub use config::{Configuration, DEFAULT_CLASS_DISCRIMINATOR};
pub use decoder::FieldReader;
pub use encoder::FieldWriter;
pub use error::{CodecError, Result};
pub use registry::{Registry, SealedEntry};
pub use schema::{ConfigValue, FieldDescriptor, FieldKind, ScalarKind, Sealed, VariantDescriptor};
pub use types::{Scalar, TreeValue};
