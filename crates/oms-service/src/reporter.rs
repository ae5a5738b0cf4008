//! Periodic activity reporter.
//!
//! Scans the store on a fixed interval and logs every entity appended
//! since the previous scan. Works entirely on the copies returned by
//! `list()`, so a scan never interferes with concurrent writers beyond
//! the momentary collection lock.

use oms_store::EntityStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Tracks how far into each collection the previous scan got.
pub struct Reporter {
	last_orders: usize,
	last_users: usize,
	last_deliveries: usize,
	last_warehouses: usize,
}

impl Reporter {
	/// Creates a reporter that only reports entities added after this call.
	pub fn new(store: &EntityStore) -> Self {
		Self {
			last_orders: store.orders().len(),
			last_users: store.users().len(),
			last_deliveries: store.deliveries().len(),
			last_warehouses: store.warehouses().len(),
		}
	}

	/// Logs entities appended since the previous scan and returns how many
	/// were new per kind, in (orders, users, deliveries, warehouses) order.
	pub fn scan(&mut self, store: &EntityStore) -> (usize, usize, usize, usize) {
		let orders = store.orders().list();
		// A shrunk collection (deletes) just resets the cursor.
		let new_orders = orders.get(self.last_orders..).unwrap_or(&[]);
		if !new_orders.is_empty() {
			tracing::info!(count = new_orders.len(), "New orders");
			for order in new_orders {
				tracing::info!(
					id = %order.id,
					user_id = %order.user_id,
					status = %order.status,
					created_at = order.created_at,
					"Order"
				);
			}
		}
		let order_count = new_orders.len();
		self.last_orders = orders.len();

		let users = store.users().list();
		let new_users = users.get(self.last_users..).unwrap_or(&[]);
		if !new_users.is_empty() {
			tracing::info!(count = new_users.len(), "New users");
			for user in new_users {
				tracing::info!(id = %user.id, name = %user.name, "User");
			}
		}
		let user_count = new_users.len();
		self.last_users = users.len();

		let deliveries = store.deliveries().list();
		let new_deliveries = deliveries.get(self.last_deliveries..).unwrap_or(&[]);
		if !new_deliveries.is_empty() {
			tracing::info!(count = new_deliveries.len(), "New deliveries");
			for delivery in new_deliveries {
				tracing::info!(
					id = %delivery.id,
					order_id = %delivery.order_id,
					user_id = %delivery.user_id,
					address = %delivery.address,
					status = delivery.status,
					"Delivery"
				);
			}
		}
		let delivery_count = new_deliveries.len();
		self.last_deliveries = deliveries.len();

		let warehouses = store.warehouses().list();
		let new_warehouses = warehouses.get(self.last_warehouses..).unwrap_or(&[]);
		if !new_warehouses.is_empty() {
			tracing::info!(count = new_warehouses.len(), "New warehouses");
			for warehouse in new_warehouses {
				tracing::info!(
					id = %warehouse.id,
					order_id = %warehouse.order_id,
					status = warehouse.status,
					"Warehouse"
				);
			}
		}
		let warehouse_count = new_warehouses.len();
		self.last_warehouses = warehouses.len();

		(order_count, user_count, delivery_count, warehouse_count)
	}
}

/// Runs the reporter loop until shutdown.
pub async fn run(store: Arc<EntityStore>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
	let mut reporter = Reporter::new(&store);
	let mut ticker = tokio::time::interval(interval);
	loop {
		tokio::select! {
			_ = ticker.tick() => {
				reporter.scan(&store);
			}
			_ = shutdown.changed() => return,
		}
	}
}
