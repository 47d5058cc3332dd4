//! Codec configuration.
//!
//! A [`Configuration`] is an immutable value. Derived configurations are made
//! with the `with_*` methods, which return a modified copy:
//!
//! ```
//! use tagtree_core::Configuration;
//!
//! let base = Configuration::default();
//! let arrays = base.clone().with_array_polymorphism(true);
//! assert!(!base.use_array_polymorphism());
//! assert!(arrays.use_array_polymorphism());
//! assert_eq!(arrays.class_discriminator(), "type");
//! ```

use serde::{Deserialize, Serialize};

/// Default object-mode discriminator key.
pub const DEFAULT_CLASS_DISCRIMINATOR: &str = "type";

/// Settings that select the wire shape of polymorphic values.
///
/// Deserializable with camelCase keys so a host application can embed it in
/// its own config file; absent keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    use_array_polymorphism: bool,
    class_discriminator: String,
    use_naming_convention: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            use_array_polymorphism: false,
            class_discriminator: DEFAULT_CLASS_DISCRIMINATOR.to_string(),
            use_naming_convention: false,
        }
    }
}

impl Configuration {
    /// Encode polymorphic values as `[label, body]` arrays instead of objects
    /// with an embedded discriminator.
    pub fn use_array_polymorphism(&self) -> bool {
        self.use_array_polymorphism
    }

    /// Object-mode key that carries the variant label.
    pub fn class_discriminator(&self) -> &str {
        &self.class_discriminator
    }

    /// Write fields without an explicit wire name in kebab-case.
    pub fn use_naming_convention(&self) -> bool {
        self.use_naming_convention
    }

    pub fn with_array_polymorphism(mut self, enabled: bool) -> Self {
        self.use_array_polymorphism = enabled;
        self
    }

    pub fn with_class_discriminator(mut self, key: impl Into<String>) -> Self {
        self.class_discriminator = key.into();
        self
    }

    pub fn with_naming_convention(mut self, enabled: bool) -> Self {
        self.use_naming_convention = enabled;
        self
    }

    /// Apply the naming convention to a declared field name.
    pub(crate) fn field_key<'a>(&self, declared: &'a str) -> std::borrow::Cow<'a, str> {
        if self.use_naming_convention {
            std::borrow::Cow::Owned(to_kebab_case(declared))
        } else {
            std::borrow::Cow::Borrowed(declared)
        }
    }
}

/// `intField` -> `int-field`, `HTTPPort` -> `http-port`, `snake_case` -> `snake-case`.
pub(crate) fn to_kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            out.push('-');
            continue;
        }
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                // End of an acronym run: "HTTPPort" splits before the final 'P'
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
