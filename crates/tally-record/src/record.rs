//! Wire-backed resource record with a lazily synchronized snapshot.
//!
//! The record keeps two representations of the same data: an immutable
//! wire snapshot and an in-memory entry map. Exactly one of them is
//! authoritative at any time, tracked by the [`Representation`] state
//! machine, so reads and writes never pay for eager re-encoding and the
//! two forms cannot silently diverge.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, trace};
use tally_error::{RecordError, Result};
use tally_types::{
    convert, ResourceEntryMessage, ResourceInformation, ResourceMessage, ResourceTypeRegistry,
    MEMORY, MEMORY_UNITS, VCORES,
};

use crate::view::ResourceView;

/// Which side of the dual representation is authoritative.
///
/// Holding the snapshot and the builder in one enum makes the
/// inconsistent case (both present, or a stale flag pointing at the wrong
/// one) unrepresentable.
#[derive(Debug)]
enum Representation {
    /// An immutable wire snapshot is authoritative; no pending edits
    Clean(ResourceMessage),
    /// An editable builder holds authoritative state; any previously
    /// returned snapshot is stale
    Dirty(ResourceMessage),
}

impl Representation {
    fn message(&self) -> &ResourceMessage {
        match self {
            Representation::Clean(m) | Representation::Dirty(m) => m,
        }
    }

    fn take_message(&mut self) -> ResourceMessage {
        match std::mem::replace(self, Representation::Clean(ResourceMessage::default())) {
            Representation::Clean(m) | Representation::Dirty(m) => m,
        }
    }

    fn is_dirty(&self) -> bool {
        matches!(self, Representation::Dirty(_))
    }
}

/// Memory normalized to mebibytes, from whatever unit the entry carries.
///
/// Panics when the entry is missing or its unit cannot be converted; both
/// mean a record the rest of the system cannot safely act on.
pub(crate) fn memory_in_mi(entries: &BTreeMap<String, ResourceInformation>) -> i64 {
    let info = entries
        .get(MEMORY)
        .unwrap_or_else(|| panic!("registry-guaranteed entry \"{}\" missing from record", MEMORY));
    match convert(&info.units, MEMORY_UNITS, info.value) {
        Ok(value) => value,
        Err(e) => panic!("cannot normalize memory to {}: {}", MEMORY_UNITS, e),
    }
}

/// Raw vcores value; panics when the registry-guaranteed entry is missing.
pub(crate) fn vcores_value(entries: &BTreeMap<String, ResourceInformation>) -> i64 {
    match entries.get(VCORES) {
        Some(info) => info.value,
        None => panic!("registry-guaranteed entry \"{}\" missing from record", VCORES),
    }
}

/// Narrow a scalar to the 32-bit range the wire form carries.
///
/// Panics on overflow: a record whose memory or vcores no longer fits the
/// wire scalar is unusable, and returning a clamped value would let it
/// propagate silently.
pub(crate) fn to_i32_or_abort(name: &str, value: i64) -> i32 {
    i32::try_from(value).unwrap_or_else(|_| {
        panic!(
            "illegal value for {}: {} does not fit a 32-bit signed integer",
            name, value
        )
    })
}

/// A mutable resource requirement record backed by a wire snapshot.
///
/// Born either fresh (empty snapshot) or hydrated from a decoded
/// [`ResourceMessage`]. The entry map is materialized lazily on first
/// access: registry defaults first, wire-provided entries overlaid on
/// top, dedicated memory/vcores scalars reconciled last. Mutators flip
/// the record dirty; [`serialize`](RecordResource::serialize) folds the
/// map back into a fresh snapshot and flips it clean again.
#[derive(Debug)]
pub struct RecordResource {
    registry: Arc<ResourceTypeRegistry>,
    repr: Representation,
    entries: Option<BTreeMap<String, ResourceInformation>>,
}

impl RecordResource {
    /// Create a fresh record seeded from the given registry.
    ///
    /// The registry is a construction-time contract: one with no types
    /// cannot guarantee the mandatory memory and vcores entries and is
    /// rejected here rather than on some later access.
    pub fn new(registry: Arc<ResourceTypeRegistry>) -> Result<Self> {
        if registry.is_empty() {
            return Err(RecordError::EmptyRegistry);
        }
        Ok(Self {
            registry,
            repr: Representation::Clean(ResourceMessage::default()),
            entries: None,
        })
    }

    /// Create a record from a decoded wire message.
    ///
    /// The entry map stays unmaterialized until first access; the message
    /// is authoritative until then.
    pub fn hydrate(message: ResourceMessage, registry: Arc<ResourceTypeRegistry>) -> Result<Self> {
        if registry.is_empty() {
            return Err(RecordError::EmptyRegistry);
        }
        Ok(Self {
            registry,
            repr: Representation::Clean(message),
            entries: None,
        })
    }

    /// Decode the compact byte form and hydrate from it
    pub fn from_wire_bytes(bytes: &[u8], registry: Arc<ResourceTypeRegistry>) -> Result<Self> {
        Self::hydrate(ResourceMessage::decode(bytes)?, registry)
    }

    /// Serialize pending edits and encode to the compact byte form
    pub fn to_wire_bytes(&mut self) -> Result<Vec<u8>> {
        self.serialize().encode()
    }

    /// Fold any pending edits into the wire snapshot and return it.
    ///
    /// When dirty, the repeated entry list is rebuilt from scratch in map
    /// (sorted-key) order and the dedicated memory/vcores scalars are set
    /// from the typed accessors, so the redundant scalar fields and the
    /// generic list agree on every serialize. When already clean the
    /// existing snapshot is returned unchanged, bit for bit.
    ///
    /// The exclusive borrow is what makes the clear-then-repopulate merge
    /// safe: no second caller can observe the builder mid-rebuild.
    pub fn serialize(&mut self) -> &ResourceMessage {
        if self.repr.is_dirty() {
            let memory = self.memory();
            let virtual_cores = self.virtual_cores();
            let resource_value_map: Vec<ResourceEntryMessage> = self
                .entries_mut()
                .values()
                .map(ResourceEntryMessage::from_information)
                .collect();
            let mut builder = self.repr.take_message();
            builder.resource_value_map = resource_value_map;
            builder.memory = memory;
            builder.virtual_cores = virtual_cores;
            trace!(
                "merged {} entries into wire snapshot",
                builder.resource_value_map.len()
            );
            self.repr = Representation::Clean(builder);
        }
        self.repr.message()
    }

    /// Build the entry map on first access.
    ///
    /// Seeds registry defaults, overlays every wire-provided entry (wire
    /// values win), then reconciles the dedicated scalars: the wire form
    /// carries memory and vcores both as generic entries and as top-level
    /// fields, and the top-level fields are authoritative on hydration.
    fn materialize_if_needed(&mut self) {
        if self.entries.is_some() {
            return;
        }
        let mut map = self.registry.defaults();
        let snapshot = self.repr.message();
        for entry in &snapshot.resource_value_map {
            let info = entry.to_information();
            map.insert(info.name.clone(), info);
        }
        let dedicated_memory = i64::from(snapshot.memory);
        let dedicated_vcores = i64::from(snapshot.virtual_cores);
        if memory_in_mi(&map) != dedicated_memory {
            map.insert(
                MEMORY.to_string(),
                ResourceInformation::new(MEMORY, MEMORY_UNITS, dedicated_memory),
            );
        }
        if vcores_value(&map) != dedicated_vcores {
            map.insert(
                VCORES.to_string(),
                ResourceInformation::countable(VCORES, dedicated_vcores),
            );
        }
        debug!("materialized {} resource entries", map.len());
        self.entries = Some(map);
    }

    fn entries_mut(&mut self) -> &mut BTreeMap<String, ResourceInformation> {
        self.materialize_if_needed();
        self.entries.get_or_insert_with(BTreeMap::new)
    }

    /// Move a clean snapshot into an editable builder before the first
    /// edit lands, so the transition is a single state change and never
    /// leaves both forms claiming authority.
    fn make_dirty(&mut self) {
        if !self.repr.is_dirty() {
            let snapshot = self.repr.take_message();
            self.repr = Representation::Dirty(snapshot);
        }
    }
}

impl ResourceView for RecordResource {
    fn memory(&mut self) -> i32 {
        let mi = memory_in_mi(self.entries_mut());
        to_i32_or_abort(MEMORY, mi)
    }

    fn set_memory(&mut self, memory: i32) {
        self.make_dirty();
        self.entries_mut().insert(
            MEMORY.to_string(),
            ResourceInformation::new(MEMORY, MEMORY_UNITS, i64::from(memory)),
        );
    }

    fn virtual_cores(&mut self) -> i32 {
        let value = vcores_value(self.entries_mut());
        to_i32_or_abort(VCORES, value)
    }

    fn set_virtual_cores(&mut self, vcores: i32) {
        let value = i64::from(vcores);
        if self.set_resource_value(VCORES, value).is_err() {
            // Post-materialization the entry always exists; cover the
            // unmaterialized path by inserting a fresh unit-less entry.
            let _ = self.set_resource_information(
                VCORES,
                ResourceInformation::countable(VCORES, value),
            );
        }
    }

    fn resource_information(&mut self, name: &str) -> Result<ResourceInformation> {
        self.entries_mut()
            .get(name)
            .cloned()
            .ok_or_else(|| RecordError::not_found(name))
    }

    fn resource_value(&mut self, name: &str) -> Result<i64> {
        self.entries_mut()
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
        self.make_dirty();
        self.entries_mut().insert(name.to_string(), info);
        Ok(())
    }

    fn set_resource_value(&mut self, name: &str, value: i64) -> Result<()> {
        if name.is_empty() {
            return Err(RecordError::invalid_argument(
                "resource name cannot be empty",
            ));
        }
        self.make_dirty();
        // Strict by contract: never materializes the map and never creates
        // an entry. The name must already be visible in the map.
        match self.entries.as_mut().and_then(|map| map.get_mut(name)) {
            Some(info) => {
                info.value = value;
                Ok(())
            }
            None => Err(RecordError::not_found(name)),
        }
    }

    fn resources(&mut self) -> &BTreeMap<String, ResourceInformation> {
        self.entries_mut()
    }
}
