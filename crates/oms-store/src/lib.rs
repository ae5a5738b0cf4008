//! In-memory entity store for the order-management service.
//!
//! This module provides the authoritative, thread-safe store for the four
//! entity collections (orders, users, deliveries, warehouses) together
//! with the order status state machine. Each collection sits behind its
//! own exclusive lock so unrelated operations never serialize against
//! each other; callers always receive independent copies, never the
//! authoritative instances.

use oms_types::{Delivery, EntityKind, Order, OrderStatus, Storable, User, Warehouse};
use thiserror::Error;
use tokio::sync::mpsc;

pub mod collection;
pub mod machine;

pub use collection::Collection;
pub use machine::OrderStateMachine;

/// Errors that can occur during store operations.
///
/// Both variants are expected, routine outcomes of concurrent callers and
/// are returned as ordinary values; the dispatcher decides how they map to
/// externally visible error codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
	/// The requested id does not exist in the collection.
	#[error("Not found")]
	NotFound,
	/// The entity exists but its status forbids the requested transition.
	#[error("Invalid status transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// The in-memory store owning all four entity collections.
///
/// Constructed once at startup and shared as `Arc<EntityStore>`. Each
/// collection has its own lock; an order mutation never blocks a user
/// read. When built with a notifier, every successful mutation sends its
/// collection kind over the channel so the checkpointer can persist a
/// fresh snapshot.
pub struct EntityStore {
	orders: Collection<Order>,
	users: Collection<User>,
	deliveries: Collection<Delivery>,
	warehouses: Collection<Warehouse>,
}

impl EntityStore {
	/// Creates an empty store with no change notifier.
	pub fn new() -> Self {
		Self {
			orders: Collection::new(None),
			users: Collection::new(None),
			deliveries: Collection::new(None),
			warehouses: Collection::new(None),
		}
	}

	/// Creates an empty store that reports mutated collection kinds on the
	/// given channel.
	///
	/// Sends are fire-and-forget; a closed channel is ignored so the store
	/// keeps working after the checkpointer has shut down.
	pub fn with_notifier(notifier: mpsc::UnboundedSender<EntityKind>) -> Self {
		Self {
			orders: Collection::new(Some(notifier.clone())),
			users: Collection::new(Some(notifier.clone())),
			deliveries: Collection::new(Some(notifier.clone())),
			warehouses: Collection::new(Some(notifier)),
		}
	}

	/// The orders collection.
	pub fn orders(&self) -> &Collection<Order> {
		&self.orders
	}

	/// The users collection.
	pub fn users(&self) -> &Collection<User> {
		&self.users
	}

	/// The deliveries collection.
	pub fn deliveries(&self) -> &Collection<Delivery> {
		&self.deliveries
	}

	/// The warehouses collection.
	pub fn warehouses(&self) -> &Collection<Warehouse> {
		&self.warehouses
	}

	/// Stores a mixed-kind entity, dispatching on its tag.
	pub fn save(&self, storable: Storable) {
		match storable {
			Storable::Order(order) => self.orders.add(order),
			Storable::User(user) => self.users.add(user),
			Storable::Delivery(delivery) => self.deliveries.add(delivery),
			Storable::Warehouse(warehouse) => self.warehouses.add(warehouse),
		}
	}
}

impl Default for EntityStore {
	fn default() -> Self {
		Self::new()
	}
}
