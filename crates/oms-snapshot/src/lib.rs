//! Snapshot persistence for the order-management service.
//!
//! This module provides the durable checkpoint/restore cycle for the
//! entity store: one snapshot artifact per entity kind, written by a
//! pluggable backend (file-based in production, in-memory for tests).
//! Persistence is a best-effort cache, not the durability guarantee of
//! record - the in-memory store stays authoritative, and snapshot
//! failures are logged, never surfaced to store callers.

use async_trait::async_trait;
use oms_types::{Entity, EntityKind, ImplementationRegistry};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

pub mod checkpoint;
pub mod persist;

pub use checkpoint::Checkpointer;

/// Errors that can occur during snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
	/// Error that occurs when a requested snapshot is absent.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for snapshot backends.
///
/// A backend stores one opaque byte artifact per entity kind. Backends
/// must be safe to share across tasks; the gateway never issues two
/// concurrent writes for the same kind.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
	/// Retrieves the raw snapshot bytes for the given kind.
	///
	/// An absent snapshot is reported as [`SnapshotError::NotFound`].
	async fn read(&self, kind: EntityKind) -> Result<Vec<u8>, SnapshotError>;

	/// Stores the raw snapshot bytes for the given kind, replacing any
	/// previous snapshot.
	async fn write(&self, kind: EntityKind, data: Vec<u8>) -> Result<(), SnapshotError>;

	/// Checks if a snapshot exists for the given kind.
	async fn exists(&self, kind: EntityKind) -> Result<bool, SnapshotError>;
}

/// Type alias for snapshot backend factory functions.
///
/// This is the function signature every backend implementation provides
/// to create instances from its configuration block.
pub type SnapshotFactory = fn(&toml::Value) -> Result<Box<dyn SnapshotBackend>, SnapshotError>;

/// Registry trait for snapshot backend implementations.
pub trait SnapshotRegistry: ImplementationRegistry<Factory = SnapshotFactory> {}

/// Get all registered snapshot backend implementations.
///
/// Returns a vector of (name, factory) tuples used by the service to
/// build the backend named in configuration.
pub fn get_all_implementations() -> Vec<(&'static str, SnapshotFactory)> {
	use implementations::{file, memory};

	vec![
		(file::Registry::NAME, file::Registry::factory()),
		(memory::Registry::NAME, memory::Registry::factory()),
	]
}

/// High-level snapshot service that provides typed operations.
///
/// Wraps a low-level backend and handles serialization to the snapshot
/// format: a pretty-printed JSON array of entity records, self-describing
/// and human-diffable.
pub struct SnapshotService {
	/// The underlying backend implementation.
	backend: Box<dyn SnapshotBackend>,
}

impl SnapshotService {
	/// Creates a new SnapshotService with the specified backend.
	pub fn new(backend: Box<dyn SnapshotBackend>) -> Self {
		Self { backend }
	}

	/// Serializes a copied collection and writes it as the kind's snapshot.
	///
	/// The caller passes an already-copied list, so no store lock is held
	/// anywhere near the I/O.
	pub async fn save_collection<T>(&self, entities: &[T]) -> Result<(), SnapshotError>
	where
		T: Entity + Serialize,
	{
		let bytes = serde_json::to_vec_pretty(entities)
			.map_err(|e| SnapshotError::Serialization(e.to_string()))?;
		self.backend.write(T::KIND, bytes).await
	}

	/// Reads and deserializes the snapshot for an entity kind.
	///
	/// An absent snapshot yields an empty list - a cold cache is not an
	/// error. A malformed snapshot is reported so the caller can log it
	/// and start empty.
	pub async fn load_collection<T>(&self) -> Result<Vec<T>, SnapshotError>
	where
		T: Entity + DeserializeOwned,
	{
		match self.backend.read(T::KIND).await {
			Ok(bytes) => serde_json::from_slice(&bytes)
				.map_err(|e| SnapshotError::Serialization(e.to_string())),
			Err(SnapshotError::NotFound) => Ok(Vec::new()),
			Err(e) => Err(e),
		}
	}

	/// Checks whether a snapshot exists for the given kind.
	pub async fn exists(&self, kind: EntityKind) -> Result<bool, SnapshotError> {
		self.backend.exists(kind).await
	}
}
