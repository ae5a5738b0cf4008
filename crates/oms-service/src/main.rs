//! Main entry point for the order-management service.
//!
//! This binary wires the in-memory entity store to the snapshot
//! persistence layer: it warms the store from the last snapshots on
//! startup, runs a background checkpointer (plus the optional demo seeder
//! and activity reporter), and writes a final snapshot of every
//! collection on shutdown.

use clap::Parser;
use oms_config::Config;
use oms_snapshot::{persist, Checkpointer, SnapshotBackend, SnapshotError, SnapshotFactory, SnapshotService};
use oms_store::EntityStore;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

mod reporter;
mod seeder;

/// Command-line arguments for the order-management service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the order-management service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the store and snapshot layer, warming from disk
/// 5. Runs background tasks until interrupted, then saves everything
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	// Load configuration
	let config = Config::from_file(&args.config)?;
	tracing::info!("Loaded configuration [{}]", config.service.id);

	let backend = build_snapshot_backend(&config)?;
	let snapshots = Arc::new(SnapshotService::new(backend));

	let (dirty_tx, dirty_rx) = mpsc::unbounded_channel();
	let store = Arc::new(EntityStore::with_notifier(dirty_tx));

	// Warm the store from the last snapshots; absent or malformed
	// snapshots leave the affected collection empty.
	persist::load_all(&snapshots, &store).await;
	tracing::info!(
		orders = store.orders().len(),
		users = store.users().len(),
		deliveries = store.deliveries().len(),
		warehouses = store.warehouses().len(),
		"Store warmed from snapshots"
	);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let mut tasks = Vec::new();

	let checkpointer = Checkpointer::new(
		Arc::clone(&store),
		Arc::clone(&snapshots),
		dirty_rx,
		Duration::from_secs(config.snapshot.flush_interval_seconds),
	);
	tasks.push(tokio::spawn(checkpointer.run(shutdown_rx.clone())));

	if let Some(seeder_config) = config.seeder.as_ref().filter(|s| s.enabled) {
		let (data_tx, data_rx) = mpsc::channel(64);
		tasks.push(tokio::spawn(seeder::run_generator(
			Duration::from_millis(seeder_config.interval_ms),
			data_tx,
			shutdown_rx.clone(),
		)));
		tasks.push(tokio::spawn(seeder::run_sink(data_rx, Arc::clone(&store))));
		tracing::info!(interval_ms = seeder_config.interval_ms, "Demo seeder enabled");
	}

	if let Some(reporter_config) = &config.reporter {
		tasks.push(tokio::spawn(reporter::run(
			Arc::clone(&store),
			Duration::from_millis(reporter_config.interval_ms),
			shutdown_rx.clone(),
		)));
	}

	tracing::info!("Started order-management service");

	tokio::signal::ctrl_c().await?;
	tracing::info!("Shutdown signal received");

	// Stop background tasks, then take a final snapshot of everything.
	let _ = shutdown_tx.send(true);
	for task in tasks {
		let _ = task.await;
	}
	persist::save_all(&snapshots, &store).await;

	tracing::info!("Stopped order-management service");
	Ok(())
}

/// Builds the snapshot backend named by `snapshot.primary` in the config.
fn build_snapshot_backend(config: &Config) -> Result<Box<dyn SnapshotBackend>, SnapshotError> {
	let factories: HashMap<&'static str, SnapshotFactory> =
		oms_snapshot::get_all_implementations().into_iter().collect();

	let factory = factories.get(config.snapshot.primary.as_str()).ok_or_else(|| {
		SnapshotError::Configuration(format!(
			"Unknown snapshot backend '{}'",
			config.snapshot.primary
		))
	})?;

	let backend_config = config
		.snapshot
		.implementations
		.get(&config.snapshot.primary)
		.cloned()
		.unwrap_or(toml::Value::Table(toml::map::Map::new()));

	factory(&backend_config)
}
