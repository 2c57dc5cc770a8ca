//! The resource entry type and its kind discriminator.
//!
//! A [`ResourceInformation`] is one named, typed, unit-tagged 64-bit
//! quantity inside a resource record: memory, vcores, or any custom
//! resource such as an accelerator count.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Name of the mandatory memory entry every record carries
pub const MEMORY: &str = "memory";

/// Canonical unit memory is stored and reported in
pub const MEMORY_UNITS: &str = "Mi";

/// Name of the mandatory virtual-cores entry every record carries
pub const VCORES: &str = "vcores";

/// Kind of a resource type.
///
/// Countable resources are consumed in integer amounts and released back
/// when the consumer finishes. The enum is non-exhaustive so new kinds can
/// be introduced without breaking downstream matches.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
#[non_exhaustive]
pub enum ResourceKind {
    /// A resource consumed and released in integer quantities
    #[default]
    Countable,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Countable => write!(f, "countable"),
        }
    }
}

/// One named, typed, unit-tagged quantity within a resource record.
///
/// `name` must be non-empty for registry and map use. A negative `value`
/// is not rejected structurally; it is a logic error on the caller's part,
/// not a malformed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInformation {
    /// Entry name, unique within a record
    pub name: String,
    /// Unit symbol the value is tagged with; empty string means unit-less
    pub units: String,
    /// Kind of the resource
    pub kind: ResourceKind,
    /// Current quantity
    pub value: i64,
}

impl ResourceInformation {
    /// Create a new entry with the given name, units, and value
    pub fn new(name: impl Into<String>, units: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            kind: ResourceKind::Countable,
            value,
        }
    }

    /// Create a unit-less countable entry
    pub fn countable(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, "", value)
    }

    /// The registry-default memory entry: zero mebibytes
    pub fn memory_default() -> Self {
        Self::new(MEMORY, MEMORY_UNITS, 0)
    }

    /// The registry-default vcores entry: zero, unit-less
    pub fn vcores_default() -> Self {
        Self::countable(VCORES, 0)
    }
}

impl Default for ResourceInformation {
    fn default() -> Self {
        Self::countable("", 0)
    }
}

impl fmt::Display for ResourceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.units.is_empty() {
            write!(f, "{}={}", self.name, self.value)
        } else {
            write!(f, "{}={} {}", self.name, self.value, self.units)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countable_is_unitless() {
        let info = ResourceInformation::countable("gpu", 4);
        assert_eq!(info.units, "");
        assert_eq!(info.kind, ResourceKind::Countable);
        assert_eq!(info.value, 4);
    }

    #[test]
    fn test_memory_default() {
        let info = ResourceInformation::memory_default();
        assert_eq!(info.name, MEMORY);
        assert_eq!(info.units, MEMORY_UNITS);
        assert_eq!(info.value, 0);
    }

    #[test]
    fn test_display() {
        let info = ResourceInformation::new("memory", "Mi", 512);
        assert_eq!(info.to_string(), "memory=512 Mi");
    }

    #[test]
    fn test_display_unitless() {
        let info = ResourceInformation::countable("vcores", 2);
        assert_eq!(info.to_string(), "vcores=2");
    }
}
