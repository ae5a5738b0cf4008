//! Warehouse types for the order-management service.

use crate::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A warehouse reservation associated with an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
	/// Unique identifier for this warehouse entry.
	pub id: String,
	/// Id of the associated order.
	pub order_id: String,
	/// Free-form warehouse status.
	pub status: i32,
}

impl Warehouse {
	/// Creates a new warehouse entry with a fresh unique id.
	pub fn new(order_id: impl Into<String>, status: i32) -> Self {
		Self {
			id: format!("warehouse-{}", Uuid::new_v4()),
			order_id: order_id.into(),
			status,
		}
	}
}

impl Entity for Warehouse {
	const KIND: EntityKind = EntityKind::Warehouses;

	fn id(&self) -> &str {
		&self.id
	}
}
