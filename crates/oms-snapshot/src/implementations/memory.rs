//! In-memory snapshot backend.
//!
//! Keeps snapshot artifacts in a HashMap, providing fast access but no
//! persistence across restarts. Useful for tests and development.

use crate::{SnapshotBackend, SnapshotError, SnapshotFactory, SnapshotRegistry};
use async_trait::async_trait;
use oms_types::{EntityKind, ImplementationRegistry};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory snapshot backend implementation.
pub struct MemoryBackend {
	/// The in-memory artifacts protected by a read-write lock.
	artifacts: RwLock<HashMap<EntityKind, Vec<u8>>>,
}

impl MemoryBackend {
	/// Creates a new MemoryBackend instance.
	pub fn new() -> Self {
		Self {
			artifacts: RwLock::new(HashMap::new()),
		}
	}
}

impl Default for MemoryBackend {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl SnapshotBackend for MemoryBackend {
	async fn read(&self, kind: EntityKind) -> Result<Vec<u8>, SnapshotError> {
		let artifacts = self.artifacts.read().await;
		artifacts.get(&kind).cloned().ok_or(SnapshotError::NotFound)
	}

	async fn write(&self, kind: EntityKind, data: Vec<u8>) -> Result<(), SnapshotError> {
		let mut artifacts = self.artifacts.write().await;
		artifacts.insert(kind, data);
		Ok(())
	}

	async fn exists(&self, kind: EntityKind) -> Result<bool, SnapshotError> {
		let artifacts = self.artifacts.read().await;
		Ok(artifacts.contains_key(&kind))
	}
}

/// Registry for the memory snapshot backend.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = SnapshotFactory;

	fn factory() -> Self::Factory {
		create_backend
	}
}

impl SnapshotRegistry for Registry {}

/// Factory function to create a memory backend from configuration.
///
/// Configuration parameters: none.
pub fn create_backend(_config: &toml::Value) -> Result<Box<dyn SnapshotBackend>, SnapshotError> {
	Ok(Box::new(MemoryBackend::new()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_basic_operations() {
		let backend = MemoryBackend::new();

		backend
			.write(EntityKind::Orders, b"payload".to_vec())
			.await
			.unwrap();

		assert_eq!(backend.read(EntityKind::Orders).await.unwrap(), b"payload");
		assert!(backend.exists(EntityKind::Orders).await.unwrap());
		assert!(!backend.exists(EntityKind::Users).await.unwrap());

		let result = backend.read(EntityKind::Users).await;
		assert!(matches!(result, Err(SnapshotError::NotFound)));
	}

	#[tokio::test]
	async fn test_overwrite() {
		let backend = MemoryBackend::new();

		backend
			.write(EntityKind::Users, b"first".to_vec())
			.await
			.unwrap();
		backend
			.write(EntityKind::Users, b"second".to_vec())
			.await
			.unwrap();

		assert_eq!(backend.read(EntityKind::Users).await.unwrap(), b"second");
	}
}
