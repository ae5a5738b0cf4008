//! Order types for the order-management service.
//!
//! This module defines the order entity and its status lifecycle. An order
//! is created for a user and moves through a linear fulfillment flow:
//! Created -> Confirmed -> Delivered, with cancellation possible from the
//! two non-terminal states.

use crate::{utils::current_timestamp, Entity, EntityKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A customer order tracked through its fulfillment lifecycle.
///
/// The id, owning user and creation timestamp are fixed at construction;
/// only the status changes afterwards, and only through the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier for this order.
	pub id: String,
	/// Id of the user that placed the order.
	pub user_id: String,
	/// Current status of the order.
	pub status: OrderStatus,
	/// Timestamp when this order was created (Unix seconds).
	pub created_at: u64,
}

impl Order {
	/// Creates a new order for the given user.
	///
	/// The order gets a fresh unique id and starts in [`OrderStatus::Created`].
	pub fn new(user_id: impl Into<String>) -> Self {
		Self {
			id: format!("order-{}", Uuid::new_v4()),
			user_id: user_id.into(),
			status: OrderStatus::Created,
			created_at: current_timestamp(),
		}
	}
}

impl Entity for Order {
	const KIND: EntityKind = EntityKind::Orders;

	fn id(&self) -> &str {
		&self.id
	}
}

/// Status of an order in the fulfillment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
	/// Order has been created but not yet confirmed.
	Created,
	/// Order has been confirmed and awaits delivery.
	Confirmed,
	/// Order has been delivered. Terminal.
	Delivered,
	/// Order has been cancelled. Terminal.
	Cancelled,
}

impl OrderStatus {
	/// Returns true if no further transition is permitted from this status.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Created => write!(f, "Created"),
			OrderStatus::Confirmed => write!(f, "Confirmed"),
			OrderStatus::Delivered => write!(f, "Delivered"),
			OrderStatus::Cancelled => write!(f, "Cancelled"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_order_starts_created() {
		let order = Order::new("user-1");
		assert_eq!(order.status, OrderStatus::Created);
		assert_eq!(order.user_id, "user-1");
		assert!(order.id.starts_with("order-"));
		assert!(order.created_at > 0);
	}

	#[test]
	fn test_order_ids_are_unique() {
		let a = Order::new("user-1");
		let b = Order::new("user-1");
		assert_ne!(a.id, b.id);
	}

	#[test]
	fn test_terminal_statuses() {
		assert!(!OrderStatus::Created.is_terminal());
		assert!(!OrderStatus::Confirmed.is_terminal());
		assert!(OrderStatus::Delivered.is_terminal());
		assert!(OrderStatus::Cancelled.is_terminal());
	}

	#[test]
	fn test_status_serializes_as_camel_case() {
		let json = serde_json::to_string(&OrderStatus::Created).unwrap();
		assert_eq!(json, "\"created\"");
		let back: OrderStatus = serde_json::from_str(&json).unwrap();
		assert_eq!(back, OrderStatus::Created);
	}
}
