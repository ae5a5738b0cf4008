//! Delivery types for the order-management service.

use crate::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A delivery associated with an order.
///
/// Deliveries carry a free-form numeric status; unlike orders, no
/// transition rules are enforced on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
	/// Unique identifier for this delivery.
	pub id: String,
	/// Id of the order being delivered.
	pub order_id: String,
	/// Id of the user receiving the delivery.
	pub user_id: String,
	/// Destination address.
	pub address: String,
	/// Free-form delivery status.
	pub status: i32,
}

impl Delivery {
	/// Creates a new delivery with a fresh unique id.
	pub fn new(
		order_id: impl Into<String>,
		user_id: impl Into<String>,
		address: impl Into<String>,
		status: i32,
	) -> Self {
		Self {
			id: format!("delivery-{}", Uuid::new_v4()),
			order_id: order_id.into(),
			user_id: user_id.into(),
			address: address.into(),
			status,
		}
	}
}

impl Entity for Delivery {
	const KIND: EntityKind = EntityKind::Deliveries;

	fn id(&self) -> &str {
		&self.id
	}
}
