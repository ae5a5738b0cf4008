//! Registry trait for self-registering implementations.
//!
//! Each pluggable backend (snapshot storage, for now) provides a Registry
//! struct implementing this trait, declaring its configuration name and
//! factory function.

/// Base trait for implementation registries.
///
/// Ensures every implementation declares the name used to reference it in
/// configuration files and provides a factory function.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation,
	/// e.g. "file" for snapshot.implementations.file.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
