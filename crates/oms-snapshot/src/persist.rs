//! Per-kind checkpoint and restore of the entity store.
//!
//! These functions bridge the typed snapshot service and the store: a
//! save copies one collection and writes its snapshot; a load wholesale
//! replaces the in-memory collection with whatever the snapshot holds.
//! The all-kinds variants attempt every kind and never let one kind's
//! failure stop the others.

use crate::{SnapshotError, SnapshotService};
use oms_store::EntityStore;
use oms_types::{Delivery, EntityKind, Order, User, Warehouse};

/// Saves the snapshot for a single entity kind.
///
/// The collection is copied under its lock and serialized after release;
/// no store lock is held during I/O.
pub async fn save_kind(
	snapshots: &SnapshotService,
	store: &EntityStore,
	kind: EntityKind,
) -> Result<(), SnapshotError> {
	match kind {
		EntityKind::Orders => snapshots.save_collection(&store.orders().list()).await,
		EntityKind::Users => snapshots.save_collection(&store.users().list()).await,
		EntityKind::Deliveries => snapshots.save_collection(&store.deliveries().list()).await,
		EntityKind::Warehouses => snapshots.save_collection(&store.warehouses().list()).await,
	}
}

/// Loads the snapshot for a single entity kind, replacing the in-memory
/// collection.
pub async fn load_kind(
	snapshots: &SnapshotService,
	store: &EntityStore,
	kind: EntityKind,
) -> Result<(), SnapshotError> {
	match kind {
		EntityKind::Orders => {
			let orders: Vec<Order> = snapshots.load_collection().await?;
			store.orders().replace_all(orders);
		}
		EntityKind::Users => {
			let users: Vec<User> = snapshots.load_collection().await?;
			store.users().replace_all(users);
		}
		EntityKind::Deliveries => {
			let deliveries: Vec<Delivery> = snapshots.load_collection().await?;
			store.deliveries().replace_all(deliveries);
		}
		EntityKind::Warehouses => {
			let warehouses: Vec<Warehouse> = snapshots.load_collection().await?;
			store.warehouses().replace_all(warehouses);
		}
	}
	Ok(())
}

/// Saves snapshots for all entity kinds.
///
/// Failures are logged and swallowed; the in-memory store remains
/// authoritative until the next successful save.
pub async fn save_all(snapshots: &SnapshotService, store: &EntityStore) {
	for kind in EntityKind::all() {
		if let Err(e) = save_kind(snapshots, store, kind).await {
			tracing::warn!(kind = %kind, error = %e, "Failed to save snapshot");
		}
	}
}

/// Loads snapshots for all entity kinds.
///
/// A kind whose snapshot is malformed or unreadable starts empty; startup
/// is never aborted by a bad snapshot.
pub async fn load_all(snapshots: &SnapshotService, store: &EntityStore) {
	for kind in EntityKind::all() {
		if let Err(e) = load_kind(snapshots, store, kind).await {
			tracing::warn!(kind = %kind, error = %e, "Failed to load snapshot, starting empty");
			clear_kind(store, kind);
		}
	}
}

fn clear_kind(store: &EntityStore, kind: EntityKind) {
	match kind {
		EntityKind::Orders => store.orders().replace_all(Vec::new()),
		EntityKind::Users => store.users().replace_all(Vec::new()),
		EntityKind::Deliveries => store.deliveries().replace_all(Vec::new()),
		EntityKind::Warehouses => store.warehouses().replace_all(Vec::new()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::file::FileBackend;
	use crate::implementations::memory::MemoryBackend;
	use tempfile::tempdir;

	fn populated_store() -> EntityStore {
		let store = EntityStore::new();
		let user = User::new("Alice");
		let order = Order::new(user.id.clone());
		store
			.deliveries()
			.add(Delivery::new(order.id.clone(), user.id.clone(), "1 Main St", 0));
		store.warehouses().add(Warehouse::new(order.id.clone(), 0));
		store.users().add(user);
		store.orders().add(order);
		store
	}

	#[tokio::test]
	async fn test_save_all_then_load_all_round_trip() {
		let snapshots = SnapshotService::new(Box::new(MemoryBackend::new()));
		let store = populated_store();
		let orders = store.orders().list();
		let users = store.users().list();
		let deliveries = store.deliveries().list();
		let warehouses = store.warehouses().list();

		save_all(&snapshots, &store).await;

		// Clear in-memory state, then restore from snapshots.
		let restored = EntityStore::new();
		load_all(&snapshots, &restored).await;

		assert_eq!(restored.orders().list(), orders);
		assert_eq!(restored.users().list(), users);
		assert_eq!(restored.deliveries().list(), deliveries);
		assert_eq!(restored.warehouses().list(), warehouses);
	}

	#[tokio::test]
	async fn test_load_all_with_cold_backend_yields_empty_store() {
		let snapshots = SnapshotService::new(Box::new(MemoryBackend::new()));
		let store = EntityStore::new();

		load_all(&snapshots, &store).await;

		assert!(store.orders().is_empty());
		assert!(store.users().is_empty());
		assert!(store.deliveries().is_empty());
		assert!(store.warehouses().is_empty());
	}

	#[tokio::test]
	async fn test_load_replaces_rather_than_merges() {
		let snapshots = SnapshotService::new(Box::new(MemoryBackend::new()));
		let store = EntityStore::new();
		store.users().add(User::new("Persisted"));
		save_all(&snapshots, &store).await;

		let other = EntityStore::new();
		other.users().add(User::new("PreExisting"));
		load_all(&snapshots, &other).await;

		let users = other.users().list();
		assert_eq!(users.len(), 1);
		assert_eq!(users[0].name, "Persisted");
	}

	#[tokio::test]
	async fn test_malformed_snapshot_starts_empty() {
		let dir = tempdir().unwrap();
		std::fs::write(dir.path().join("orders.json"), b"{ not json ]").unwrap();
		let snapshots = SnapshotService::new(Box::new(FileBackend::new(dir.path().to_path_buf())));

		let store = EntityStore::new();
		store.orders().add(Order::new("user-1"));
		load_all(&snapshots, &store).await;

		assert!(store.orders().is_empty());
	}

	#[tokio::test]
	async fn test_one_malformed_kind_does_not_block_others() {
		let dir = tempdir().unwrap();
		let snapshots = SnapshotService::new(Box::new(FileBackend::new(dir.path().to_path_buf())));

		let store = populated_store();
		save_all(&snapshots, &store).await;
		std::fs::write(dir.path().join("orders.json"), b"{ not json ]").unwrap();

		let restored = EntityStore::new();
		load_all(&snapshots, &restored).await;

		assert!(restored.orders().is_empty());
		assert_eq!(restored.users().len(), 1);
		assert_eq!(restored.deliveries().len(), 1);
		assert_eq!(restored.warehouses().len(), 1);
	}

	#[tokio::test]
	async fn test_snapshot_is_pretty_json() {
		let dir = tempdir().unwrap();
		let snapshots = SnapshotService::new(Box::new(FileBackend::new(dir.path().to_path_buf())));

		let store = EntityStore::new();
		store.users().add(User::new("Alice"));
		save_all(&snapshots, &store).await;

		let text = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
		// Indented, one field per line - diffable by humans.
		assert!(text.contains("\n  {"));
		assert!(text.contains("\"name\": \"Alice\""));
	}
}
