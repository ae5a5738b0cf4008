//! Common types module for the order-management service.
//!
//! This module defines the core data types shared by the store, snapshot,
//! and service crates. It provides a centralized location for entity
//! definitions to ensure consistency across all components.

/// Delivery entity associated with an order.
pub mod delivery;
/// Entity-kind tags for the four collections.
pub mod kind;
/// Order entity and its status lifecycle.
pub mod order;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Tagged union over every storable entity type.
pub mod storable;
/// User entity.
pub mod user;
/// Utility functions shared across crates.
pub mod utils;
/// Warehouse entity associated with an order.
pub mod warehouse;

// Re-export all types for convenient access
pub use delivery::*;
pub use kind::*;
pub use order::*;
pub use registry::*;
pub use storable::*;
pub use user::*;
pub use utils::current_timestamp;
pub use warehouse::*;

/// Trait implemented by every entity kept in the store.
///
/// Ties an entity type to its collection tag and exposes the opaque id
/// used for lookups. The store's generic collection and the snapshot
/// service are written against this seam.
pub trait Entity: Clone + Send + Sync + 'static {
	/// The collection this entity type belongs to.
	const KIND: EntityKind;

	/// Returns the entity's unique id.
	fn id(&self) -> &str;
}
