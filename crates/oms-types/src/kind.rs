//! Entity-kind tags for the four store collections.

use std::fmt;
use std::str::FromStr;

/// Tags identifying the data collections managed by the store.
///
/// This enum provides type safety for store and snapshot operations by
/// replacing string literals with strongly typed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
	/// Collection of orders.
	Orders,
	/// Collection of users.
	Users,
	/// Collection of deliveries.
	Deliveries,
	/// Collection of warehouses.
	Warehouses,
}

impl EntityKind {
	/// Returns the string representation of the kind.
	pub fn as_str(&self) -> &'static str {
		match self {
			EntityKind::Orders => "orders",
			EntityKind::Users => "users",
			EntityKind::Deliveries => "deliveries",
			EntityKind::Warehouses => "warehouses",
		}
	}

	/// Returns an iterator over all kinds.
	pub fn all() -> impl Iterator<Item = Self> {
		[
			Self::Orders,
			Self::Users,
			Self::Deliveries,
			Self::Warehouses,
		]
		.into_iter()
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EntityKind {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"orders" => Ok(Self::Orders),
			"users" => Ok(Self::Users),
			"deliveries" => Ok(Self::Deliveries),
			"warehouses" => Ok(Self::Warehouses),
			_ => Err(()),
		}
	}
}

impl From<EntityKind> for &'static str {
	fn from(kind: EntityKind) -> Self {
		kind.as_str()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_round_trip_through_str() {
		for kind in EntityKind::all() {
			assert_eq!(kind.as_str().parse::<EntityKind>(), Ok(kind));
		}
	}

	#[test]
	fn test_unknown_kind_rejected() {
		assert!("intents".parse::<EntityKind>().is_err());
	}

	#[test]
	fn test_all_covers_four_kinds() {
		assert_eq!(EntityKind::all().count(), 4);
	}
}
