//! File-based snapshot backend.
//!
//! Stores one JSON artifact per entity kind under a configurable base
//! directory. Writes go to a temporary file first and are renamed into
//! place, so a crash mid-write never corrupts the previous successfully
//! saved snapshot.

use crate::{SnapshotBackend, SnapshotError, SnapshotFactory, SnapshotRegistry};
use async_trait::async_trait;
use oms_types::{EntityKind, ImplementationRegistry};
use std::path::PathBuf;
use tokio::fs;

/// File-based snapshot backend implementation.
pub struct FileBackend {
	/// Base directory path for storing snapshot files.
	base_path: PathBuf,
}

impl FileBackend {
	/// Creates a new FileBackend rooted at the specified base path.
	pub fn new(base_path: PathBuf) -> Self {
		Self { base_path }
	}

	/// Converts an entity kind to its snapshot file path.
	fn file_path(&self, kind: EntityKind) -> PathBuf {
		self.base_path.join(format!("{}.json", kind.as_str()))
	}
}

#[async_trait]
impl SnapshotBackend for FileBackend {
	async fn read(&self, kind: EntityKind) -> Result<Vec<u8>, SnapshotError> {
		let path = self.file_path(kind);

		match fs::read(&path).await {
			Ok(data) => Ok(data),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SnapshotError::NotFound),
			Err(e) => Err(SnapshotError::Backend(e.to_string())),
		}
	}

	async fn write(&self, kind: EntityKind, data: Vec<u8>) -> Result<(), SnapshotError> {
		let path = self.file_path(kind);

		// Create parent directory if it doesn't exist
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| SnapshotError::Backend(e.to_string()))?;
		}

		// Write atomically by writing to temp file then renaming
		let temp_path = path.with_extension("tmp");
		fs::write(&temp_path, data)
			.await
			.map_err(|e| SnapshotError::Backend(e.to_string()))?;

		fs::rename(&temp_path, &path)
			.await
			.map_err(|e| SnapshotError::Backend(e.to_string()))?;

		Ok(())
	}

	async fn exists(&self, kind: EntityKind) -> Result<bool, SnapshotError> {
		Ok(self.file_path(kind).exists())
	}
}

/// Registry for the file snapshot backend.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "file";
	type Factory = SnapshotFactory;

	fn factory() -> Self::Factory {
		create_backend
	}
}

impl SnapshotRegistry for Registry {}

/// Factory function to create a file backend from configuration.
///
/// Configuration parameters:
/// - `path`: Base directory for snapshot files (default: "./data")
pub fn create_backend(config: &toml::Value) -> Result<Box<dyn SnapshotBackend>, SnapshotError> {
	let path = config
		.get("path")
		.and_then(|v| v.as_str())
		.unwrap_or("./data")
		.to_string();

	Ok(Box::new(FileBackend::new(PathBuf::from(path))))
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[tokio::test]
	async fn test_write_then_read() {
		let dir = tempdir().unwrap();
		let backend = FileBackend::new(dir.path().to_path_buf());

		backend
			.write(EntityKind::Orders, b"[]".to_vec())
			.await
			.unwrap();

		let data = backend.read(EntityKind::Orders).await.unwrap();
		assert_eq!(data, b"[]");
		assert!(backend.exists(EntityKind::Orders).await.unwrap());
	}

	#[tokio::test]
	async fn test_absent_snapshot_is_not_found() {
		let dir = tempdir().unwrap();
		let backend = FileBackend::new(dir.path().to_path_buf());

		let result = backend.read(EntityKind::Users).await;
		assert!(matches!(result, Err(SnapshotError::NotFound)));
		assert!(!backend.exists(EntityKind::Users).await.unwrap());
	}

	#[tokio::test]
	async fn test_write_replaces_previous_snapshot() {
		let dir = tempdir().unwrap();
		let backend = FileBackend::new(dir.path().to_path_buf());

		backend
			.write(EntityKind::Orders, b"first".to_vec())
			.await
			.unwrap();
		backend
			.write(EntityKind::Orders, b"second".to_vec())
			.await
			.unwrap();

		assert_eq!(backend.read(EntityKind::Orders).await.unwrap(), b"second");
		// No temp file is left behind after a completed write.
		assert!(!dir.path().join("orders.tmp").exists());
	}

	#[tokio::test]
	async fn test_creates_missing_base_directory() {
		let dir = tempdir().unwrap();
		let backend = FileBackend::new(dir.path().join("nested").join("data"));

		backend
			.write(EntityKind::Warehouses, b"[]".to_vec())
			.await
			.unwrap();

		assert!(backend.exists(EntityKind::Warehouses).await.unwrap());
	}

	#[tokio::test]
	async fn test_one_file_per_kind() {
		let dir = tempdir().unwrap();
		let backend = FileBackend::new(dir.path().to_path_buf());

		for kind in EntityKind::all() {
			backend.write(kind, b"[]".to_vec()).await.unwrap();
		}

		for kind in EntityKind::all() {
			assert!(dir.path().join(format!("{}.json", kind.as_str())).exists());
		}
	}

	#[test]
	fn test_factory_defaults() {
		let config = toml::Value::Table(toml::map::Map::new());
		assert!(create_backend(&config).is_ok());
	}
}
