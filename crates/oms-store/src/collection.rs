//! Generic, mutex-guarded entity collection.
//!
//! One `Collection<T>` backs each entity kind in the store. All access
//! goes through a single exclusive lock whose scope is the body of one
//! operation; the lock is never held across I/O, and serialization for
//! persistence always happens on an already-returned copy.

use crate::StoreError;
use oms_types::{Entity, EntityKind, User};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// A thread-safe, ordered collection of one entity kind.
///
/// Callers receive clones from every read; the authoritative instances
/// never leave the lock. In-place mutation is only possible through
/// [`Collection::update_with`], which runs the caller's check inside the
/// same lock acquisition as the write.
pub struct Collection<T: Entity> {
	entries: Mutex<Vec<T>>,
	notifier: Option<mpsc::UnboundedSender<EntityKind>>,
}

impl<T: Entity> Collection<T> {
	/// Creates an empty collection, optionally reporting mutations on the
	/// given channel.
	pub fn new(notifier: Option<mpsc::UnboundedSender<EntityKind>>) -> Self {
		Self {
			entries: Mutex::new(Vec::new()),
			notifier,
		}
	}

	// A poisoned lock still guards consistent data: every mutation leaves
	// the vector in a valid state before it can panic.
	fn lock(&self) -> MutexGuard<'_, Vec<T>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn mark_dirty(&self) {
		if let Some(notifier) = &self.notifier {
			// Fire-and-forget; the receiver may already be gone at shutdown.
			let _ = notifier.send(T::KIND);
		}
	}

	/// Appends an entity to the collection.
	///
	/// No uniqueness check is performed; creators are responsible for
	/// generating collision-free ids.
	pub fn add(&self, entity: T) {
		self.lock().push(entity);
		self.mark_dirty();
	}

	/// Returns an independent copy of all entities.
	///
	/// The copy reflects a single consistent point in time; mutating it,
	/// or mutating the store afterwards, has no effect on the other side.
	pub fn list(&self) -> Vec<T> {
		self.lock().clone()
	}

	/// Returns a copy of the entity with the given id.
	pub fn get(&self, id: &str) -> Result<T, StoreError> {
		self.lock()
			.iter()
			.find(|entity| entity.id() == id)
			.cloned()
			.ok_or(StoreError::NotFound)
	}

	/// Updates the entity with the given id through a fallible closure.
	///
	/// The closure runs against a working copy while the collection lock is
	/// held, and the copy is committed only when the closure succeeds, so a
	/// precondition check and the mutation it guards form one atomic
	/// check-and-set. If the closure returns an error the stored entity is
	/// left exactly as found and nothing is marked dirty. On success the
	/// updated copy is returned.
	pub fn update_with<F>(&self, id: &str, updater: F) -> Result<T, StoreError>
	where
		F: FnOnce(&mut T) -> Result<(), StoreError>,
	{
		let updated = {
			let mut entries = self.lock();
			let entry = entries
				.iter_mut()
				.find(|entity| entity.id() == id)
				.ok_or(StoreError::NotFound)?;
			let mut updated = entry.clone();
			updater(&mut updated)?;
			*entry = updated.clone();
			updated
		};
		self.mark_dirty();
		Ok(updated)
	}

	/// Removes the entity with the given id, preserving the relative order
	/// of the remaining entries.
	pub fn delete(&self, id: &str) -> Result<(), StoreError> {
		{
			let mut entries = self.lock();
			let index = entries
				.iter()
				.position(|entity| entity.id() == id)
				.ok_or(StoreError::NotFound)?;
			entries.remove(index);
		}
		self.mark_dirty();
		Ok(())
	}

	/// Wholesale-replaces the collection contents.
	///
	/// Used by the snapshot load path; does not mark the collection dirty,
	/// since what was just loaded is by definition what is on disk.
	pub fn replace_all(&self, entities: Vec<T>) {
		*self.lock() = entities;
	}

	/// Number of entities currently held.
	pub fn len(&self) -> usize {
		self.lock().len()
	}

	/// Returns true if the collection holds no entities.
	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}
}

impl Collection<User> {
	/// Updates a user's display name in place.
	pub fn rename(&self, id: &str, new_name: impl Into<String>) -> Result<User, StoreError> {
		let name = new_name.into();
		self.update_with(id, |user| {
			user.name = name;
			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use oms_types::Order;

	fn collection() -> Collection<Order> {
		Collection::new(None)
	}

	#[test]
	fn test_add_then_list() {
		let orders = collection();
		orders.add(Order::new("user-1"));
		orders.add(Order::new("user-2"));

		let listed = orders.list();
		assert_eq!(listed.len(), 2);
		assert_eq!(listed[0].user_id, "user-1");
		assert_eq!(listed[1].user_id, "user-2");
	}

	#[test]
	fn test_list_returns_independent_copy() {
		let orders = collection();
		orders.add(Order::new("user-1"));

		let mut listed = orders.list();
		listed[0].user_id = "mutated".to_string();
		listed.clear();

		// The store is unaffected by mutation of the returned copy.
		let fresh = orders.list();
		assert_eq!(fresh.len(), 1);
		assert_eq!(fresh[0].user_id, "user-1");
	}

	#[test]
	fn test_copy_unaffected_by_later_mutation() {
		let orders = collection();
		orders.add(Order::new("user-1"));

		let before = orders.list();
		orders.add(Order::new("user-2"));

		assert_eq!(before.len(), 1);
		assert_eq!(orders.len(), 2);
	}

	#[test]
	fn test_get_returns_clone() {
		let orders = collection();
		let order = Order::new("user-1");
		let id = order.id.clone();
		orders.add(order);

		let mut fetched = orders.get(&id).unwrap();
		fetched.user_id = "mutated".to_string();

		assert_eq!(orders.get(&id).unwrap().user_id, "user-1");
	}

	#[test]
	fn test_get_missing_id() {
		let orders = collection();
		assert_eq!(orders.get("order-missing"), Err(StoreError::NotFound));
	}

	#[test]
	fn test_delete_preserves_relative_order() {
		let orders = collection();
		let first = Order::new("user-1");
		let second = Order::new("user-2");
		let third = Order::new("user-3");
		let second_id = second.id.clone();
		orders.add(first);
		orders.add(second);
		orders.add(third);

		orders.delete(&second_id).unwrap();

		let remaining = orders.list();
		assert_eq!(remaining.len(), 2);
		assert_eq!(remaining[0].user_id, "user-1");
		assert_eq!(remaining[1].user_id, "user-3");
	}

	#[test]
	fn test_delete_twice_reports_not_found() {
		let orders = collection();
		let order = Order::new("user-1");
		let id = order.id.clone();
		orders.add(order);

		assert!(orders.delete(&id).is_ok());
		assert_eq!(orders.delete(&id), Err(StoreError::NotFound));
	}

	#[test]
	fn test_add_delete_arithmetic() {
		let orders = collection();
		let mut ids = Vec::new();
		for i in 0..5 {
			let order = Order::new(format!("user-{i}"));
			ids.push(order.id.clone());
			orders.add(order);
		}
		orders.delete(&ids[1]).unwrap();
		orders.delete(&ids[3]).unwrap();

		assert_eq!(orders.len(), 3);
	}

	#[test]
	fn test_update_with_rejection_leaves_entity_untouched() {
		let orders = collection();
		let order = Order::new("user-1");
		let id = order.id.clone();
		orders.add(order);

		let result = orders.update_with(&id, |entity| {
			entity.user_id = "mutated".to_string();
			Err(StoreError::NotFound)
		});

		assert!(result.is_err());
		// A failed closure must not leak a partial write.
		assert_eq!(orders.get(&id).unwrap().user_id, "user-1");
	}

	#[test]
	fn test_replace_all() {
		let orders = collection();
		orders.add(Order::new("user-1"));

		orders.replace_all(vec![Order::new("user-2"), Order::new("user-3")]);

		let listed = orders.list();
		assert_eq!(listed.len(), 2);
		assert_eq!(listed[0].user_id, "user-2");
	}

	#[test]
	fn test_rename_user() {
		let users: Collection<User> = Collection::new(None);
		let user = User::new("Alice");
		let id = user.id.clone();
		users.add(user);

		let renamed = users.rename(&id, "Bob").unwrap();
		assert_eq!(renamed.name, "Bob");
		assert_eq!(users.get(&id).unwrap().name, "Bob");
	}

	#[test]
	fn test_rename_missing_user() {
		let users: Collection<User> = Collection::new(None);
		assert_eq!(users.rename("user-missing", "Bob"), Err(StoreError::NotFound));
	}
}
