//! Common types shared by all mock aggregates

pub mod entity_metadata;

pub use entity_metadata::EntityMetadata;
