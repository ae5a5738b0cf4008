//! Order state machine implementation.
//!
//! Manages order status transitions with validation, ensuring orders move
//! through the legal lifecycle: Created -> Confirmed -> Delivered, with
//! Cancelled reachable from Created and Confirmed. Delivered and Cancelled
//! are terminal. Every transition is a check-and-set performed inside a
//! single acquisition of the orders lock, so two racing transition
//! attempts can never both succeed.

use crate::{EntityStore, StoreError};
use once_cell::sync::Lazy;
use oms_types::{Order, OrderStatus};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// Static transition table - each state maps to allowed next states
static TRANSITIONS: Lazy<HashMap<OrderStatus, HashSet<OrderStatus>>> = Lazy::new(|| {
	let mut m = HashMap::new();
	m.insert(
		OrderStatus::Created,
		HashSet::from([OrderStatus::Confirmed, OrderStatus::Cancelled]),
	);
	m.insert(
		OrderStatus::Confirmed,
		HashSet::from([OrderStatus::Delivered, OrderStatus::Cancelled]),
	);
	m.insert(OrderStatus::Delivered, HashSet::new()); // terminal
	m.insert(OrderStatus::Cancelled, HashSet::new()); // terminal
	m
});

/// Checks if a status transition is legal.
pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
	TRANSITIONS
		.get(&from)
		.is_some_and(|allowed| allowed.contains(&to))
}

/// Manages order status transitions against the entity store.
pub struct OrderStateMachine {
	store: Arc<EntityStore>,
}

impl OrderStateMachine {
	pub fn new(store: Arc<EntityStore>) -> Self {
		Self { store }
	}

	/// Transitions an order to a new status with validation.
	///
	/// The precondition check and the status write share one lock
	/// acquisition; of several concurrent competing attempts on the same
	/// order exactly one wins, and the losers observe
	/// [`StoreError::InvalidTransition`] with the order left as found.
	pub fn transition_order(
		&self,
		order_id: &str,
		new_status: OrderStatus,
	) -> Result<Order, StoreError> {
		self.store.orders().update_with(order_id, |order| {
			if !is_valid_transition(order.status, new_status) {
				return Err(StoreError::InvalidTransition {
					from: order.status,
					to: new_status,
				});
			}
			order.status = new_status;
			Ok(())
		})
	}

	/// Confirms a Created order.
	pub fn confirm(&self, order_id: &str) -> Result<Order, StoreError> {
		self.transition_order(order_id, OrderStatus::Confirmed)
	}

	/// Marks a Confirmed order as delivered.
	pub fn deliver(&self, order_id: &str) -> Result<Order, StoreError> {
		self.transition_order(order_id, OrderStatus::Delivered)
	}

	/// Cancels a Created or Confirmed order.
	pub fn cancel(&self, order_id: &str) -> Result<Order, StoreError> {
		self.transition_order(order_id, OrderStatus::Cancelled)
	}

	/// Gets a copy of an order by id.
	pub fn get_order(&self, order_id: &str) -> Result<Order, StoreError> {
		self.store.orders().get(order_id)
	}
}
