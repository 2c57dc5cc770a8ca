//! In-memory-only resource record.
//!
//! Same accessor semantics as [`RecordResource`](crate::RecordResource)
//! without the wire side: the map is built eagerly at construction and
//! there is nothing to serialize or keep in sync. Useful in tests and for
//! callers that only ever build and inspect requirements in process.

use std::collections::BTreeMap;

use tally_error::{RecordError, Result};
use tally_types::{ResourceInformation, ResourceTypeRegistry, MEMORY, MEMORY_UNITS, VCORES};

use crate::record::{memory_in_mi, to_i32_or_abort, vcores_value};
use crate::view::ResourceView;

/// Plain map-backed implementation of [`ResourceView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapResource {
    entries: BTreeMap<String, ResourceInformation>,
}

impl MapResource {
    /// Create a record seeded from the registry's defaults.
    ///
    /// An empty registry is rejected for the same reason as in the
    /// wire-backed record: it cannot guarantee the mandatory memory and
    /// vcores entries.
    pub fn new(registry: &ResourceTypeRegistry) -> Result<Self> {
        if registry.is_empty() {
            return Err(RecordError::EmptyRegistry);
        }
        Ok(Self {
            entries: registry.defaults(),
        })
    }
}

impl ResourceView for MapResource {
    fn memory(&mut self) -> i32 {
        to_i32_or_abort(MEMORY, memory_in_mi(&self.entries))
    }

    fn set_memory(&mut self, memory: i32) {
        self.entries.insert(
            MEMORY.to_string(),
            ResourceInformation::new(MEMORY, MEMORY_UNITS, i64::from(memory)),
        );
    }

    fn virtual_cores(&mut self) -> i32 {
        to_i32_or_abort(VCORES, vcores_value(&self.entries))
    }

    fn set_virtual_cores(&mut self, vcores: i32) {
        let value = i64::from(vcores);
        if self.set_resource_value(VCORES, value).is_err() {
            let _ = self
                .set_resource_information(VCORES, ResourceInformation::countable(VCORES, value));
        }
    }

    fn resource_information(&mut self, name: &str) -> Result<ResourceInformation> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| RecordError::not_found(name))
    }

    fn resource_value(&mut self, name: &str) -> Result<i64> {
        self.entries
            .get(name)
            .map(|info| info.value)
            .ok_or_else(|| RecordError::not_found(name))
    }

    fn set_resource_information(&mut self, name: &str, mut info: ResourceInformation) -> Result<()> {
        if name.is_empty() {
            return Err(RecordError::invalid_argument(
                "resource name cannot be empty",
            ));
        }
        if info.name != name {
            info.name = name.to_string();
        }
        self.entries.insert(name.to_string(), info);
        Ok(())
    }

    fn set_resource_value(&mut self, name: &str, value: i64) -> Result<()> {
        if name.is_empty() {
            return Err(RecordError::invalid_argument(
                "resource name cannot be empty",
            ));
        }
        match self.entries.get_mut(name) {
            Some(info) => {
                info.value = value;
                Ok(())
            }
            None => Err(RecordError::not_found(name)),
        }
    }

    fn resources(&mut self) -> &BTreeMap<String, ResourceInformation> {
        &self.entries
    }
}
