//! Value objects - small immutable types shared across the domain

mod entity_id;

pub use entity_id::EntityId;
