//! Core types for the Tally resource record framework.
//!
//! This crate holds the data model shared by everything that builds or
//! inspects resource requirement records: the typed entry itself, the
//! registry of canonical resource types, unit-aware integer conversion,
//! and the compact wire message the record serializes into.

pub mod registry;
pub mod types;
pub mod units;
pub mod wire;

pub use registry::ResourceTypeRegistry;
pub use types::{ResourceInformation, ResourceKind, MEMORY, MEMORY_UNITS, VCORES};
pub use units::convert;
pub use wire::{ResourceEntryMessage, ResourceMessage};
