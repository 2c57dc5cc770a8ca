//! Registry of canonical resource types.
//!
//! The registry supplies the set of resource type names every record is
//! seeded with, together with their default units and kind. It is an
//! explicit dependency handed to a record at construction time, so a
//! misconfigured (empty) registry is caught when the record is built
//! rather than on some later access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_error::{RecordError, Result};

use crate::types::ResourceInformation;

/// Canonical set of known resource types with their default units and kind.
///
/// Always contains at least the mandatory memory and vcores types when
/// built through [`ResourceTypeRegistry::with_defaults`]. Custom types
/// such as accelerators are added with [`ResourceTypeRegistry::register`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeRegistry {
    types: BTreeMap<String, ResourceInformation>,
}

impl ResourceTypeRegistry {
    /// Create an empty registry.
    ///
    /// A record refuses an empty registry at construction, so this is only
    /// a staging point before [`register`](Self::register) calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the mandatory memory and vcores types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        // register only rejects empty names, which these are not
        let _ = registry.register(ResourceInformation::memory_default());
        let _ = registry.register(ResourceInformation::vcores_default());
        registry
    }

    /// Add or replace a resource type definition
    pub fn register(&mut self, info: ResourceInformation) -> Result<()> {
        if info.name.is_empty() {
            return Err(RecordError::invalid_argument(
                "resource type name cannot be empty",
            ));
        }
        self.types.insert(info.name.clone(), info);
        Ok(())
    }

    /// Clone out the seed map: one default entry per registered type
    pub fn defaults(&self) -> BTreeMap<String, ResourceInformation> {
        self.types.clone()
    }

    /// Look up the definition of a registered type
    pub fn get(&self, name: &str) -> Option<&ResourceInformation> {
        self.types.get(name)
    }

    /// Whether the registry holds no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }
}
