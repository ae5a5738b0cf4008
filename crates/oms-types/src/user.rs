//! User types for the order-management service.

use crate::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// Users are created on registration and mutated only by a rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	/// Unique identifier for this user.
	pub id: String,
	/// Display name.
	pub name: String,
}

impl User {
	/// Creates a new user with a fresh unique id.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			id: format!("user-{}", Uuid::new_v4()),
			name: name.into(),
		}
	}
}

impl Entity for User {
	const KIND: EntityKind = EntityKind::Users;

	fn id(&self) -> &str {
		&self.id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_user() {
		let user = User::new("Alice");
		assert_eq!(user.name, "Alice");
		assert!(user.id.starts_with("user-"));
	}

	#[test]
	fn test_user_ids_are_unique() {
		assert_ne!(User::new("a").id, User::new("a").id);
	}
}
