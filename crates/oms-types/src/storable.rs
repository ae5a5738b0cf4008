//! Tagged union over every entity type the store accepts.
//!
//! Mixed-kind producers (the demo seeder, bulk ingest) hand the store one
//! of these; the store dispatches on the tag to the right collection.

use crate::{Delivery, Entity, EntityKind, Order, User, Warehouse};
use serde::{Deserialize, Serialize};

/// Any entity that can be placed in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Storable {
	Order(Order),
	User(User),
	Delivery(Delivery),
	Warehouse(Warehouse),
}

impl Storable {
	/// Returns the unique id of the wrapped entity.
	pub fn id(&self) -> &str {
		match self {
			Storable::Order(o) => o.id(),
			Storable::User(u) => u.id(),
			Storable::Delivery(d) => d.id(),
			Storable::Warehouse(w) => w.id(),
		}
	}

	/// Returns the collection kind of the wrapped entity.
	pub fn kind(&self) -> EntityKind {
		match self {
			Storable::Order(_) => EntityKind::Orders,
			Storable::User(_) => EntityKind::Users,
			Storable::Delivery(_) => EntityKind::Deliveries,
			Storable::Warehouse(_) => EntityKind::Warehouses,
		}
	}
}

impl From<Order> for Storable {
	fn from(order: Order) -> Self {
		Storable::Order(order)
	}
}

impl From<User> for Storable {
	fn from(user: User) -> Self {
		Storable::User(user)
	}
}

impl From<Delivery> for Storable {
	fn from(delivery: Delivery) -> Self {
		Storable::Delivery(delivery)
	}
}

impl From<Warehouse> for Storable {
	fn from(warehouse: Warehouse) -> Self {
		Storable::Warehouse(warehouse)
	}
}
