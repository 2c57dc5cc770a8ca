//! The capability interface every resource record implements.

use std::collections::BTreeMap;

use tally_error::Result;
use tally_types::ResourceInformation;

/// Read/write access to a resource requirement record.
///
/// Getters take `&mut self` because the first access to any entry lazily
/// materializes the in-memory map. Memory and vcores are guaranteed
/// present on every implementation; the generic accessors reach any named
/// entry, including custom types such as accelerators.
///
/// Two implementations exist: [`RecordResource`](crate::RecordResource),
/// backed by a wire snapshot, and [`MapResource`](crate::MapResource), a
/// plain in-memory map with no wire side.
pub trait ResourceView {
    /// Memory in mebibytes, converted from whatever unit the entry is
    /// tagged with.
    ///
    /// # Panics
    ///
    /// Panics if the converted value does not fit in an `i32`, if the
    /// entry's unit is unknown, or if the registry-guaranteed memory entry
    /// is missing. A record in any of those states cannot be safely
    /// consumed downstream.
    fn memory(&mut self) -> i32;

    /// Overwrite the memory entry with `memory` mebibytes
    fn set_memory(&mut self, memory: i32);

    /// Virtual cores, read unit-less.
    ///
    /// # Panics
    ///
    /// Panics if the value does not fit in an `i32` or the
    /// registry-guaranteed vcores entry is missing.
    fn virtual_cores(&mut self) -> i32;

    /// Update the vcores entry, inserting a fresh unit-less entry if it is
    /// somehow absent
    fn set_virtual_cores(&mut self, vcores: i32);

    /// Look up a named entry
    fn resource_information(&mut self, name: &str) -> Result<ResourceInformation>;

    /// Look up a named entry's scalar value
    fn resource_value(&mut self, name: &str) -> Result<i64>;

    /// Insert or replace a named entry. If the entry's recorded name
    /// disagrees with `name`, the entry is corrected to match the key.
    fn set_resource_information(&mut self, name: &str, info: ResourceInformation) -> Result<()>;

    /// Update an existing entry's value in place. Strict: never creates an
    /// entry, and fails with `NotFound` when `name` is undefined.
    fn set_resource_value(&mut self, name: &str, value: i64) -> Result<()>;

    /// Read-only view over every entry.
    ///
    /// The borrow reflects the record at this moment, not a live feed; a
    /// later mutation is not observable through a copy a caller made.
    fn resources(&mut self) -> &BTreeMap<String, ResourceInformation>;
}
