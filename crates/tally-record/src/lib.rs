//! Mutable resource requirement records.
//!
//! A record is a mapping of entry name to [`ResourceInformation`] plus a
//! lazily synchronized wire snapshot. Callers mutate it in process through
//! the [`ResourceView`] accessors; [`RecordResource::serialize`] folds any
//! pending edits back into the wire form on demand, so reads and writes
//! never pay for eager re-encoding.
//!
//! [`ResourceInformation`]: tally_types::ResourceInformation

pub mod record;
pub mod simple;
pub mod view;

pub use record::RecordResource;
pub use simple::MapResource;
pub use view::ResourceView;
