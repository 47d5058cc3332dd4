//! [`ConfigValue`] implementations for scalars, collections and sealed types.
//!
//! Scalar reads are lenient the way config scalars usually are: an integer
//! field accepts `10` or `"10"`, a bool field accepts `true` or `"true"`, and
//! a string field accepts any non-null scalar in its textual form.

use crate::codec::Codec;
use crate::error::{CodecError, Result};
use crate::schema::{ConfigValue, FieldKind, ScalarKind, Sealed};
use crate::types::{Scalar, TreeValue};

fn expect_scalar<'v>(value: &'v TreeValue, expected: &FieldKind) -> Result<&'v Scalar> {
    value
        .as_scalar()
        .ok_or_else(|| CodecError::mismatch(expected.to_string(), value.kind_name()))
}

impl ConfigValue for String {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::String)
    }

    fn to_tree(&self, _codec: &Codec<'_>) -> Result<TreeValue> {
        Ok(TreeValue::string(self.clone()))
    }

    fn from_tree(_codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        match expect_scalar(value, &Self::kind())? {
            Scalar::Null => Err(CodecError::mismatch("string", "null")),
            s => Ok(s.as_text()),
        }
    }
}

impl ConfigValue for bool {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Bool)
    }

    fn to_tree(&self, _codec: &Codec<'_>) -> Result<TreeValue> {
        Ok(TreeValue::Scalar(Scalar::Bool(*self)))
    }

    fn from_tree(_codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        match expect_scalar(value, &Self::kind())? {
            Scalar::Bool(b) => Ok(*b),
            Scalar::String(s) if s == "true" => Ok(true),
            Scalar::String(s) if s == "false" => Ok(false),
            other => Err(CodecError::mismatch("bool", other.kind_name())),
        }
    }
}

/// Read any integral scalar widened to `i128`, which holds both `i64` and `u64`.
fn read_integer(value: &TreeValue) -> Result<i128> {
    let kind = FieldKind::Scalar(ScalarKind::Integer);
    match expect_scalar(value, &kind)? {
        Scalar::Integer(i) => Ok(i128::from(*i)),
        Scalar::Unsigned(u) => Ok(i128::from(*u)),
        // Saturates for huge floats; the narrowing below rejects those.
        Scalar::Float(f) if f.fract() == 0.0 => Ok(*f as i128),
        Scalar::Float(f) => Err(CodecError::mismatch("integer", format!("float {f}"))),
        Scalar::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| CodecError::mismatch("integer", format!("string '{s}'"))),
        other => Err(CodecError::mismatch("integer", other.kind_name())),
    }
}

fn integer_scalar(wide: i128) -> Result<Scalar> {
    if let Ok(i) = i64::try_from(wide) {
        return Ok(Scalar::Integer(i));
    }
    u64::try_from(wide)
        .map(Scalar::Unsigned)
        .map_err(|_| CodecError::mismatch("integer within u64 range", wide.to_string()))
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl ConfigValue for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Scalar(ScalarKind::Integer)
                }

                fn to_tree(&self, _codec: &Codec<'_>) -> Result<TreeValue> {
                    integer_scalar(*self as i128).map(TreeValue::Scalar)
                }

                fn from_tree(_codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
                    let i = read_integer(value)?;
                    <$ty>::try_from(i).map_err(|_| {
                        CodecError::mismatch(concat!("integer within ", stringify!($ty)), i.to_string())
                    })
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

fn read_float(value: &TreeValue) -> Result<f64> {
    let kind = FieldKind::Scalar(ScalarKind::Float);
    match expect_scalar(value, &kind)? {
        Scalar::Float(f) => Ok(*f),
        Scalar::Integer(i) => Ok(*i as f64),
        Scalar::Unsigned(u) => Ok(*u as f64),
        Scalar::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CodecError::mismatch("float", format!("string '{s}'"))),
        other => Err(CodecError::mismatch("float", other.kind_name())),
    }
}

impl ConfigValue for f64 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Float)
    }

    fn to_tree(&self, _codec: &Codec<'_>) -> Result<TreeValue> {
        Ok(TreeValue::Scalar(Scalar::Float(*self)))
    }

    fn from_tree(_codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        read_float(value)
    }
}

impl ConfigValue for f32 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Float)
    }

    fn to_tree(&self, _codec: &Codec<'_>) -> Result<TreeValue> {
        Ok(TreeValue::Scalar(Scalar::Float(f64::from(*self))))
    }

    fn from_tree(_codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        read_float(value).map(|f| f as f32)
    }
}

/// `None` encodes as an explicit null; an absent key or a null decodes to `None`.
impl<V: ConfigValue> ConfigValue for Option<V> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(V::kind()))
    }

    fn to_tree(&self, codec: &Codec<'_>) -> Result<TreeValue> {
        match self {
            Some(v) => v.to_tree(codec),
            None => Ok(TreeValue::null()),
        }
    }

    fn from_tree(codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        V::from_tree(codec, value).map(Some)
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<V: ConfigValue> ConfigValue for Vec<V> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(V::kind()))
    }

    fn to_tree(&self, codec: &Codec<'_>) -> Result<TreeValue> {
        self.iter()
            .enumerate()
            .map(|(i, v)| v.to_tree(codec).map_err(|e| e.at(&format!("[{i}]"))))
            .collect::<Result<Vec<_>>>()
            .map(TreeValue::Array)
    }

    fn from_tree(codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| CodecError::mismatch(Self::kind().to_string(), value.kind_name()))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| V::from_tree(codec, item).map_err(|e| e.at(&format!("[{i}]"))))
            .collect()
    }
}

/// Raw subtrees pass through unchanged.
impl ConfigValue for TreeValue {
    fn kind() -> FieldKind {
        FieldKind::Any
    }

    fn to_tree(&self, _codec: &Codec<'_>) -> Result<TreeValue> {
        Ok(self.clone())
    }

    fn from_tree(_codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        Ok(value.clone())
    }
}

/// Nested sealed types re-enter the full polymorphic pipeline with the same
/// configuration and registry.
impl<T: Sealed> ConfigValue for T {
    fn kind() -> FieldKind {
        FieldKind::Sealed(T::NAME)
    }

    fn to_tree(&self, codec: &Codec<'_>) -> Result<TreeValue> {
        codec.encode(self)
    }

    fn from_tree(codec: &Codec<'_>, value: &TreeValue) -> Result<Self> {
        codec.decode(value)
    }
}
