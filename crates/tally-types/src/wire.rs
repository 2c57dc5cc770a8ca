//! Wire message types for resource records.
//!
//! The wire form carries the generic entry list plus dedicated memory and
//! virtual-cores scalars kept for backward compatibility with consumers
//! that predate extensible resource types. On hydration the dedicated
//! scalars are authoritative when the two disagree.
//!
//! Byte encoding goes through borsh, which is deterministic: serializing
//! the same message twice yields bit-identical output.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tally_error::{RecordError, Result};

use crate::types::{ResourceInformation, ResourceKind};

/// One entry of the wire-level resource map.
///
/// Units, kind, and value are optional on the wire; absent fields decode
/// to the empty string, [`ResourceKind::Countable`], and zero.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct ResourceEntryMessage {
    /// Entry name, the map key
    pub key: String,
    /// Unit symbol, if tagged
    pub units: Option<String>,
    /// Resource kind, if recorded
    pub kind: Option<ResourceKind>,
    /// Quantity, if recorded
    pub value: Option<i64>,
}

impl ResourceEntryMessage {
    /// Build a wire entry from an in-memory entry, copying every field
    pub fn from_information(info: &ResourceInformation) -> Self {
        Self {
            key: info.name.clone(),
            units: Some(info.units.clone()),
            kind: Some(info.kind),
            value: Some(info.value),
        }
    }

    /// Decode into an in-memory entry, applying wire defaults for any
    /// absent optional field
    pub fn to_information(&self) -> ResourceInformation {
        ResourceInformation {
            name: self.key.clone(),
            units: self.units.clone().unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            value: self.value.unwrap_or(0),
        }
    }
}

/// Compact wire representation of a resource record.
///
/// `resource_value_map` is emitted in sorted-key order so the encoding of
/// a given record is canonical.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct ResourceMessage {
    /// Generic entry list; one element per named resource
    pub resource_value_map: Vec<ResourceEntryMessage>,
    /// Dedicated memory scalar in mebibytes, authoritative on hydration
    pub memory: i32,
    /// Dedicated virtual-cores scalar, authoritative on hydration
    pub virtual_cores: i32,
}

impl ResourceMessage {
    /// Encode to the compact byte form
    pub fn encode(&self) -> Result<Vec<u8>> {
        borsh::to_vec(self).map_err(|e| RecordError::Codec(e.to_string()))
    }

    /// Decode from the compact byte form
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        borsh::from_slice(bytes).map_err(|e| RecordError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> ResourceMessage {
        ResourceMessage {
            resource_value_map: vec![
                ResourceEntryMessage {
                    key: "gpu".to_string(),
                    units: None,
                    kind: None,
                    value: Some(2),
                },
                ResourceEntryMessage {
                    key: "memory".to_string(),
                    units: Some("Mi".to_string()),
                    kind: Some(ResourceKind::Countable),
                    value: Some(1024),
                },
            ],
            memory: 1024,
            virtual_cores: 4,
        }
    }

    #[test]
    fn test_entry_round_trip_preserves_fields() {
        let info = ResourceInformation::new("memory", "Mi", 512);
        let entry = ResourceEntryMessage::from_information(&info);
        assert_eq!(entry.to_information(), info);
    }

    #[test]
    fn test_entry_wire_defaults() {
        let entry = ResourceEntryMessage {
            key: "gpu".to_string(),
            units: None,
            kind: None,
            value: None,
        };
        let info = entry.to_information();
        assert_eq!(info.units, "");
        assert_eq!(info.kind, ResourceKind::Countable);
        assert_eq!(info.value, 0);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let message = sample_message();
        let bytes = message.encode().unwrap();
        assert_eq!(ResourceMessage::decode(&bytes).unwrap(), message);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let message = sample_message();
        assert_eq!(message.encode().unwrap(), message.encode().unwrap());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = ResourceMessage::decode(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(err, RecordError::Codec(_)));
    }
}
