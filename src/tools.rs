/*!
# Paisley: Tools.

The "tools" bag is the capability snapshot handed to command handlers:
loggers, clients, whatever the program or its plugins decided handlers
should have on hand. Contributions merge later-write-wins, and each
dispatch receives its own (cheap, `Arc`-backed) clone, so nothing here is
ever shared mutable state.
*/

use std::{
	any::Any,
	collections::BTreeMap,
	fmt,
	sync::Arc,
};



#[derive(Default, Clone)]
/// # Capability Snapshot.
///
/// A string-keyed collection of type-erased helpers, recovered by type at
/// the point of use.
///
/// ## Examples
///
/// ```
/// use paisley::Tools;
///
/// let tools = Tools::default()
///     .with("retries", 3_u32)
///     .with("greeting", String::from("hey"));
///
/// assert_eq!(tools.get::<u32>("retries"), Some(&3));
/// assert_eq!(tools.get::<String>("greeting").map(String::as_str), Some("hey"));
///
/// // Wrong type or missing key? None.
/// assert_eq!(tools.get::<u64>("retries"), None);
/// assert_eq!(tools.get::<u32>("nope"), None);
/// ```
pub struct Tools(BTreeMap<String, Arc<dyn Any + Send + Sync>>);

impl fmt::Debug for Tools {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.0.keys()).finish()
	}
}

impl Tools {
	#[must_use]
	/// # With Capability.
	///
	/// Add (or replace) a keyed capability, builder-style.
	pub fn with<T: Any + Send + Sync>(mut self, key: &str, value: T) -> Self {
		self.insert(key, value);
		self
	}

	/// # Insert Capability.
	pub fn insert<T: Any + Send + Sync>(&mut self, key: &str, value: T) {
		self.0.insert(key.to_owned(), Arc::new(value));
	}

	#[must_use]
	/// # Fetch Capability.
	///
	/// Return the capability registered under `key`, if present and of the
	/// requested type.
	pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
		self.0.get(key).and_then(|v| (**v).downcast_ref())
	}

	#[must_use]
	/// # Has Capability?
	pub fn contains(&self, key: &str) -> bool { self.0.contains_key(key) }

	#[must_use]
	/// # Number of Capabilities.
	pub fn len(&self) -> usize { self.0.len() }

	#[must_use]
	/// # Empty?
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// # Merge Another Snapshot.
	///
	/// Fold `other` into `self`, later-write-wins on key collision. The
	/// merge is associative, so contributions gathered concurrently can be
	/// combined in registration order afterward.
	pub fn merge(&mut self, other: Self) {
		self.0.extend(other.0);
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_merge_later_wins() {
		let mut a = Tools::default().with("n", 1_u32).with("only-a", true);
		let b = Tools::default().with("n", 2_u32).with("only-b", true);

		a.merge(b);
		assert_eq!(a.get::<u32>("n"), Some(&2));
		assert!(a.contains("only-a"));
		assert!(a.contains("only-b"));
		assert_eq!(a.len(), 3);
	}

	#[test]
	fn t_snapshot_clone() {
		let tools = Tools::default().with("n", 1_u32);
		let copy = tools.clone();

		// Clones are independent snapshots of the same capabilities.
		assert_eq!(copy.get::<u32>("n"), Some(&1));
		assert_eq!(copy.len(), tools.len());
	}
}
