//! Background checkpointing of dirty collections.
//!
//! The store marks a collection kind dirty on every successful mutation;
//! the checkpointer drains those marks and flushes the affected kinds on
//! a fixed interval, plus once more on shutdown. Disk writes therefore
//! never sit on the mutation path: a slow save delays nothing but the
//! next save.

use crate::{persist, SnapshotService};
use oms_store::EntityStore;
use oms_types::EntityKind;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

/// Periodically persists collections that changed since the last flush.
pub struct Checkpointer {
	store: Arc<EntityStore>,
	snapshots: Arc<SnapshotService>,
	dirty_rx: mpsc::UnboundedReceiver<EntityKind>,
	interval: Duration,
}

impl Checkpointer {
	/// Creates a checkpointer draining the given dirty-kind channel.
	pub fn new(
		store: Arc<EntityStore>,
		snapshots: Arc<SnapshotService>,
		dirty_rx: mpsc::UnboundedReceiver<EntityKind>,
		interval: Duration,
	) -> Self {
		Self {
			store,
			snapshots,
			dirty_rx,
			interval,
		}
	}

	/// Runs the flush loop until shutdown is signalled or every sender is
	/// dropped, then flushes whatever is still dirty.
	pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
		let mut dirty: HashSet<EntityKind> = HashSet::new();
		let mut ticker = tokio::time::interval(self.interval);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			tokio::select! {
				maybe_kind = self.dirty_rx.recv() => {
					match maybe_kind {
						Some(kind) => {
							dirty.insert(kind);
						}
						// All senders gone; nothing more will arrive.
						None => break,
					}
				}
				_ = ticker.tick() => {
					flush(&self.snapshots, &self.store, &mut dirty).await;
				}
				_ = shutdown.changed() => break,
			}
		}

		// Pick up marks that raced with shutdown, then do the final flush.
		while let Ok(kind) = self.dirty_rx.try_recv() {
			dirty.insert(kind);
		}
		flush(&self.snapshots, &self.store, &mut dirty).await;
		tracing::debug!("Checkpointer stopped");
	}
}

async fn flush(snapshots: &SnapshotService, store: &EntityStore, dirty: &mut HashSet<EntityKind>) {
	for kind in dirty.drain() {
		if let Err(e) = persist::save_kind(snapshots, store, kind).await {
			tracing::warn!(kind = %kind, error = %e, "Failed to save snapshot");
		}
	}
}
