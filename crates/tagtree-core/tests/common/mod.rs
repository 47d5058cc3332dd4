//! Shared sealed-type fixtures for the integration tests.
#![allow(dead_code)]

use tagtree_core::{
    Configuration, FieldDescriptor, FieldReader, FieldWriter, Result, Sealed, VariantDescriptor,
};

/// The main fixture: a unit variant, label overrides, a field literally
/// named `type` with and without a wire-name override, and a variant that
/// keeps its structural name as its label.
#[derive(Debug, Clone, PartialEq)]
pub enum SealedConfig {
    ObjectChild,
    DataClassChild { name: String, int_field: i64 },
    TypeChild { kind: String },
    AnnotatedTypeChild { kind: String },
    Unlabeled { ratio: f64 },
}

impl Sealed for SealedConfig {
    const NAME: &'static str = "SealedConfig";

    fn variants() -> Vec<VariantDescriptor> {
        vec![
            VariantDescriptor::new("ObjectChild").with_label("object"),
            VariantDescriptor::new("DataClassChild")
                .with_label("data_class")
                .with_field(FieldDescriptor::of::<String>("name"))
                .with_field(FieldDescriptor::of::<i64>("intField")),
            VariantDescriptor::new("TypeChild")
                .with_label("type_child")
                .with_field(FieldDescriptor::of::<String>("type")),
            VariantDescriptor::new("AnnotatedTypeChild")
                .with_label("annotated_type_child")
                .with_field(FieldDescriptor::of::<String>("type").with_wire_name("my_type")),
            VariantDescriptor::new("Unlabeled").with_field(FieldDescriptor::of::<f64>("ratio")),
        ]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            SealedConfig::ObjectChild => "ObjectChild",
            SealedConfig::DataClassChild { .. } => "DataClassChild",
            SealedConfig::TypeChild { .. } => "TypeChild",
            SealedConfig::AnnotatedTypeChild { .. } => "AnnotatedTypeChild",
            SealedConfig::Unlabeled { .. } => "Unlabeled",
        }
    }

    fn write_fields(&self, fields: &mut FieldWriter<'_>) -> Result<()> {
        match self {
            SealedConfig::ObjectChild => Ok(()),
            SealedConfig::DataClassChild { name, int_field } => {
                fields.write("name", name)?;
                fields.write("intField", int_field)
            }
            SealedConfig::TypeChild { kind } | SealedConfig::AnnotatedTypeChild { kind } => {
                fields.write("type", kind)
            }
            SealedConfig::Unlabeled { ratio } => fields.write("ratio", ratio),
        }
    }

    fn read_variant(variant: &VariantDescriptor, fields: &FieldReader<'_>) -> Result<Self> {
        Ok(match variant.name() {
            "DataClassChild" => SealedConfig::DataClassChild {
                name: fields.read("name")?,
                int_field: fields.read("intField")?,
            },
            "TypeChild" => SealedConfig::TypeChild {
                kind: fields.read("type")?,
            },
            "AnnotatedTypeChild" => SealedConfig::AnnotatedTypeChild {
                kind: fields.read("type")?,
            },
            "Unlabeled" => SealedConfig::Unlabeled {
                ratio: fields.read("ratio")?,
            },
            _ => SealedConfig::ObjectChild,
        })
    }
}

/// A sealed type whose fields hold other sealed values, lists and optionals.
#[derive(Debug, Clone, PartialEq)]
pub enum Pipeline {
    Stage {
        inner: SealedConfig,
        extras: Vec<SealedConfig>,
        note: Option<String>,
    },
    Fanout {
        branches: Vec<Pipeline>,
    },
    Idle,
}

impl Sealed for Pipeline {
    const NAME: &'static str = "Pipeline";

    fn variants() -> Vec<VariantDescriptor> {
        vec![
            VariantDescriptor::new("Stage")
                .with_label("stage")
                .with_field(FieldDescriptor::of::<SealedConfig>("inner"))
                .with_field(FieldDescriptor::of::<Vec<SealedConfig>>("extras"))
                .with_field(FieldDescriptor::of::<Option<String>>("note")),
            VariantDescriptor::new("Fanout")
                .with_label("fanout")
                .with_field(FieldDescriptor::of::<Vec<Pipeline>>("branches")),
            VariantDescriptor::new("Idle").with_label("idle"),
        ]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Pipeline::Stage { .. } => "Stage",
            Pipeline::Fanout { .. } => "Fanout",
            Pipeline::Idle => "Idle",
        }
    }

    fn write_fields(&self, fields: &mut FieldWriter<'_>) -> Result<()> {
        match self {
            Pipeline::Stage {
                inner,
                extras,
                note,
            } => {
                fields.write("inner", inner)?;
                fields.write("extras", extras)?;
                fields.write("note", note)
            }
            Pipeline::Fanout { branches } => fields.write("branches", branches),
            Pipeline::Idle => Ok(()),
        }
    }

    fn read_variant(variant: &VariantDescriptor, fields: &FieldReader<'_>) -> Result<Self> {
        Ok(match variant.name() {
            "Stage" => Pipeline::Stage {
                inner: fields.read("inner")?,
                extras: fields.read("extras")?,
                note: fields.read("note")?,
            },
            "Fanout" => Pipeline::Fanout {
                branches: fields.read("branches")?,
            },
            _ => Pipeline::Idle,
        })
    }
}

/// One instance of every `SealedConfig` variant.
pub fn all_variants() -> Vec<SealedConfig> {
    vec![
        SealedConfig::ObjectChild,
        SealedConfig::DataClassChild {
            name: "n".to_string(),
            int_field: 10,
        },
        SealedConfig::TypeChild {
            kind: "foo".to_string(),
        },
        SealedConfig::AnnotatedTypeChild {
            kind: "bar".to_string(),
        },
        SealedConfig::Unlabeled { ratio: 0.25 },
    ]
}

/// Every combination of shape and discriminator key the tests exercise.
pub fn all_configs() -> Vec<Configuration> {
    let mut configs = Vec::new();
    for array in [false, true] {
        for key in ["type", "key", "$kind"] {
            configs.push(
                Configuration::default()
                    .with_array_polymorphism(array)
                    .with_class_discriminator(key),
            );
        }
    }
    configs
}

pub fn object_mode() -> Configuration {
    Configuration::default()
}

pub fn array_mode() -> Configuration {
    Configuration::default().with_array_polymorphism(true)
}

/// Scalar-heavy fixture: one field per remaining scalar handler, plus a raw
/// subtree that passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Tuning {
    Knobs {
        enabled: bool,
        scale: f32,
        port: u16,
        total: u64,
        extra: tagtree_core::TreeValue,
    },
    Off,
}

impl Sealed for Tuning {
    const NAME: &'static str = "Tuning";

    fn variants() -> Vec<VariantDescriptor> {
        vec![
            VariantDescriptor::new("Knobs")
                .with_label("knobs")
                .with_field(FieldDescriptor::of::<bool>("enabled"))
                .with_field(FieldDescriptor::of::<f32>("scale"))
                .with_field(FieldDescriptor::of::<u16>("port"))
                .with_field(FieldDescriptor::of::<u64>("total"))
                .with_field(FieldDescriptor::of::<tagtree_core::TreeValue>("extra")),
            VariantDescriptor::new("Off").with_label("off"),
        ]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Tuning::Knobs { .. } => "Knobs",
            Tuning::Off => "Off",
        }
    }

    fn write_fields(&self, fields: &mut FieldWriter<'_>) -> Result<()> {
        if let Tuning::Knobs {
            enabled,
            scale,
            port,
            total,
            extra,
        } = self
        {
            fields.write("enabled", enabled)?;
            fields.write("scale", scale)?;
            fields.write("port", port)?;
            fields.write("total", total)?;
            fields.write("extra", extra)?;
        }
        Ok(())
    }

    fn read_variant(variant: &VariantDescriptor, fields: &FieldReader<'_>) -> Result<Self> {
        Ok(match variant.name() {
            "Knobs" => Tuning::Knobs {
                enabled: fields.read("enabled")?,
                scale: fields.read("scale")?,
                port: fields.read("port")?,
                total: fields.read("total")?,
                extra: fields.read("extra")?,
            },
            _ => Tuning::Off,
        })
    }
}
