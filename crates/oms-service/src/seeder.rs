//! Demo data seeder.
//!
//! Generates a coherent batch of demo entities (a user, an order for that
//! user, and the order's delivery and warehouse entries) on a fixed
//! interval and feeds them through a channel into the store. Disabled by
//! default; enabled via the `[seeder]` config section for demos and load
//! exercises.

use oms_store::EntityStore;
use oms_types::{Delivery, Order, Storable, User, Warehouse};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Builds one batch of related demo entities.
fn demo_batch() -> [Storable; 4] {
	let user = User::new("demo");
	let order = Order::new(user.id.clone());
	let delivery = Delivery::new(order.id.clone(), user.id.clone(), "1 Demo Street", 0);
	let warehouse = Warehouse::new(order.id.clone(), 0);
	[
		Storable::User(user),
		Storable::Order(order),
		Storable::Delivery(delivery),
		Storable::Warehouse(warehouse),
	]
}

/// Emits a demo batch on every tick until shutdown.
///
/// Dropping the returned sender side on exit is what ends the sink task.
pub async fn run_generator(
	interval: Duration,
	data_tx: mpsc::Sender<Storable>,
	mut shutdown: watch::Receiver<bool>,
) {
	let mut ticker = tokio::time::interval(interval);
	loop {
		tokio::select! {
			_ = ticker.tick() => {
				for storable in demo_batch() {
					if data_tx.send(storable).await.is_err() {
						// Sink is gone; nothing left to feed.
						return;
					}
				}
			}
			_ = shutdown.changed() => return,
		}
	}
}

/// Drains the channel into the store until every sender is dropped.
pub async fn run_sink(mut data_rx: mpsc::Receiver<Storable>, store: Arc<EntityStore>) {
	while let Some(storable) = data_rx.recv().await {
		tracing::debug!(kind = %storable.kind(), id = %storable.id(), "Seeding entity");
		store.save(storable);
	}
}
