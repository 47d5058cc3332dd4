//! Variant registry: per-sealed-type label and name indexes.
//!
//! Entries are built lazily on first use of a sealed type and cached for the
//! lifetime of the [`Registry`]. A miss builds the entry outside the lock and
//! publishes it under the write lock; if another thread published first, its
//! entry is kept and the local one dropped, so every caller sees one entry per
//! type. Hits only take the read lock.

use crate::codec::Codec;
use crate::config::Configuration;
use crate::decoder::FieldReader;
use crate::error::{CodecError, Result};
use crate::schema::{Sealed, VariantDescriptor};
use crate::types::TreeValue;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Resolved schema of one sealed type.
pub struct SealedEntry<T> {
    variants: Vec<VariantDescriptor>,
    by_label: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    /// Canonical instances of unit variants, keyed by variant index.
    singletons: HashMap<usize, Arc<T>>,
}

impl<T: Sealed> SealedEntry<T> {
    /// Name of the sealed base type.
    pub fn name(&self) -> &'static str {
        T::NAME
    }

    /// All variants in declaration order.
    pub fn variants(&self) -> &[VariantDescriptor] {
        &self.variants
    }

    /// The variant carrying wire label `label`.
    pub fn by_label(&self, label: &str) -> Option<&VariantDescriptor> {
        self.by_label.get(label).map(|&i| &self.variants[i])
    }

    /// The variant with structural name `name`.
    pub fn by_name(&self, name: &str) -> Option<&VariantDescriptor> {
        self.by_name.get(name).map(|&i| &self.variants[i])
    }

    /// Wire label of the variant with structural name `name`: its override
    /// label if declared, otherwise the name itself.
    pub fn label_of(&self, name: &str) -> Option<&str> {
        self.by_name(name).map(VariantDescriptor::label)
    }

    /// Cached instance of the unit variant labelled `label`.
    pub fn singleton(&self, label: &str) -> Option<Arc<T>> {
        let index = self.by_label.get(label)?;
        self.singletons.get(index).cloned()
    }

    pub(crate) fn singleton_at(&self, index: usize) -> Option<&Arc<T>> {
        self.singletons.get(&index)
    }

    pub(crate) fn index_of_label(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    pub(crate) fn variant_at(&self, index: usize) -> &VariantDescriptor {
        &self.variants[index]
    }

    /// Validate `T`'s schema and build its indexes and unit singletons.
    fn build(registry: &Registry) -> Result<Self> {
        let variants = T::variants();
        let conflict = |message: String| CodecError::SchemaConflict {
            sealed: T::NAME.to_string(),
            message,
        };

        let naming_convention = Configuration::default().with_naming_convention(true);
        let mut by_label = HashMap::with_capacity(variants.len());
        let mut by_name = HashMap::with_capacity(variants.len());
        for (i, variant) in variants.iter().enumerate() {
            if by_label.insert(variant.label().to_string(), i).is_some() {
                return Err(conflict(format!("duplicate label '{}'", variant.label())));
            }
            if by_name.insert(variant.name().to_string(), i).is_some() {
                return Err(conflict(format!("duplicate variant '{}'", variant.name())));
            }
            let mut keys = HashSet::new();
            let mut convention_keys = HashSet::new();
            for field in variant.fields() {
                let key = field.wire_name().unwrap_or(field.name());
                if !keys.insert(key) {
                    return Err(conflict(format!(
                        "variant '{}' has two fields on key '{key}'",
                        variant.name()
                    )));
                }
                let key = field.wire_key(&naming_convention);
                if !convention_keys.insert(key.clone()) {
                    return Err(conflict(format!(
                        "variant '{}' has two fields on key '{key}' under the naming convention",
                        variant.name()
                    )));
                }
            }
        }

        let config = Configuration::default();
        let codec = Codec::new(registry, &config);
        let empty = TreeValue::object();
        let mut singletons = HashMap::new();
        for (i, variant) in variants.iter().enumerate() {
            if variant.is_object_variant() {
                continue;
            }
            let reader = FieldReader::new(&codec, variant, &empty, None);
            singletons.insert(i, Arc::new(T::read_variant(variant, &reader)?));
        }

        Ok(Self {
            variants,
            by_label,
            by_name,
            singletons,
        })
    }
}

struct Published {
    name: &'static str,
    entry: Arc<dyn Any + Send + Sync>,
}

/// Memoizing registry of sealed-type schemas.
///
/// Cloning is cheap and clones share the same cache.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<RwLock<HashMap<TypeId, Published>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A process-wide registry for callers that do not keep their own.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Resolve `T`'s entry, building and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns `SchemaConflict` when `T`'s variants repeat a label or name, or a
    /// variant declares two fields on the same key, with or without the naming
    /// convention applied. Nothing is cached then.
    pub fn resolve<T: Sealed>(&self) -> Result<Arc<SealedEntry<T>>> {
        let id = TypeId::of::<T>();
        if let Some(published) = self.entries.read().get(&id) {
            return Ok(downcast(&published.entry));
        }

        debug!(sealed = T::NAME, "registry miss, building entry");
        let built = SealedEntry::<T>::build(self)?;
        let variant_count = built.variants.len();
        let built: Arc<dyn Any + Send + Sync> = Arc::new(built);

        let mut entries = self.entries.write();
        let published = entries.entry(id).or_insert_with(|| {
            debug!(
                sealed = T::NAME,
                variants = variant_count,
                "registered sealed type"
            );
            Published {
                name: T::NAME,
                entry: built,
            }
        });
        Ok(downcast(&published.entry))
    }

    /// Whether `T` has been resolved already.
    pub fn contains<T: Sealed>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }

    /// Names of the sealed types resolved so far, sorted.
    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.read().values().map(|p| p.name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("registered", &self.registered())
            .finish()
    }
}

fn downcast<T: Sealed>(entry: &Arc<dyn Any + Send + Sync>) -> Arc<SealedEntry<T>> {
    match Arc::clone(entry).downcast::<SealedEntry<T>>() {
        Ok(entry) => entry,
        // Entries are keyed by `TypeId::of::<T>()`, so the stored type always matches.
        Err(_) => unreachable!("registry entry stored under the wrong TypeId"),
    }
}
