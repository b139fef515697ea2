//! Engine layer: the entity registry plus stateless services over records.
//! Nothing in here performs I/O.

pub mod entity_registry;
pub mod services;

pub use entity_registry::EntityRegistry;
