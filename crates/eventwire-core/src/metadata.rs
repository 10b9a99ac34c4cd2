//! Typed per-page metadata.
//!
//! A [`MetaDataKey`] names a slot of a fixed value type. Keys are usually
//! declared as constants so every part of an application addresses the
//! same slot:
//!
//! ```ignore
//! const VISITS: MetaDataKey<u32> = MetaDataKey::new("visits");
//!
//! let mut metadata = MetaDataMap::new();
//! metadata.set(&VISITS, 3);
//! assert_eq!(metadata.get(&VISITS), Some(&3));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// A typed key into a [`MetaDataMap`].
///
/// Two keys address the same slot when both their name and value type
/// match.
pub struct MetaDataKey<T> {
	name: &'static str,
	_marker: PhantomData<fn() -> T>,
}

impl<T> MetaDataKey<T> {
	/// Creates a key with the given name.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_marker: PhantomData,
		}
	}

	/// Returns the key's name.
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl<T> fmt::Debug for MetaDataKey<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MetaDataKey")
			.field("name", &self.name)
			.finish()
	}
}

type Slot = (&'static str, TypeId);

/// Heterogeneous map of metadata values keyed by [`MetaDataKey`].
#[derive(Default)]
pub struct MetaDataMap {
	entries: HashMap<Slot, Box<dyn Any + Send + Sync>>,
}

impl MetaDataMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	fn slot<T: 'static>(key: &MetaDataKey<T>) -> Slot {
		(key.name, TypeId::of::<T>())
	}

	/// Stores a value, returning the previous one.
	pub fn set<T: Send + Sync + 'static>(&mut self, key: &MetaDataKey<T>, value: T) -> Option<T> {
		self.entries
			.insert(Self::slot(key), Box::new(value))
			.and_then(|old| old.downcast::<T>().ok())
			.map(|old| *old)
	}

	/// Returns the stored value.
	pub fn get<T: Send + Sync + 'static>(&self, key: &MetaDataKey<T>) -> Option<&T> {
		self.entries
			.get(&Self::slot(key))
			.and_then(|value| value.downcast_ref::<T>())
	}

	/// Returns the stored value mutably.
	pub fn get_mut<T: Send + Sync + 'static>(&mut self, key: &MetaDataKey<T>) -> Option<&mut T> {
		self.entries
			.get_mut(&Self::slot(key))
			.and_then(|value| value.downcast_mut::<T>())
	}

	/// Returns the stored value, inserting `T::default()` first if absent.
	///
	/// Returns `None` only if the slot holds a value of another type, which
	/// keys of distinct types never share.
	pub fn get_or_default<T: Default + Send + Sync + 'static>(
		&mut self,
		key: &MetaDataKey<T>,
	) -> Option<&mut T> {
		self.entries
			.entry(Self::slot(key))
			.or_insert_with(|| Box::new(T::default()))
			.downcast_mut::<T>()
	}

	/// Removes and returns the stored value.
	pub fn remove<T: Send + Sync + 'static>(&mut self, key: &MetaDataKey<T>) -> Option<T> {
		self.entries
			.remove(&Self::slot(key))
			.and_then(|value| value.downcast::<T>().ok())
			.map(|value| *value)
	}

	/// Returns true if a value is stored under the key.
	pub fn contains<T: 'static>(&self, key: &MetaDataKey<T>) -> bool {
		self.entries.contains_key(&Self::slot(key))
	}

	/// Returns the number of stored values.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for MetaDataMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<_> = self.entries.keys().map(|(name, _)| *name).collect();
		names.sort_unstable();
		f.debug_struct("MetaDataMap").field("keys", &names).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	const COUNTER: MetaDataKey<u32> = MetaDataKey::new("counter");
	const LABEL: MetaDataKey<String> = MetaDataKey::new("label");
	const COUNTER_AS_STRING: MetaDataKey<String> = MetaDataKey::new("counter");

	#[rstest]
	fn test_set_and_get() {
		let mut map = MetaDataMap::new();
		assert_eq!(map.set(&COUNTER, 1), None);
		assert_eq!(map.set(&COUNTER, 2), Some(1));
		assert_eq!(map.get(&COUNTER), Some(&2));
	}

	#[rstest]
	fn test_same_name_different_type_are_distinct() {
		let mut map = MetaDataMap::new();
		map.set(&COUNTER, 7);
		map.set(&COUNTER_AS_STRING, "seven".to_string());

		assert_eq!(map.get(&COUNTER), Some(&7));
		assert_eq!(map.get(&COUNTER_AS_STRING).map(String::as_str), Some("seven"));
		assert_eq!(map.len(), 2);
	}

	#[rstest]
	fn test_get_or_default_and_mutate() {
		let mut map = MetaDataMap::new();
		*map.get_or_default(&COUNTER).unwrap() += 5;
		*map.get_or_default(&COUNTER).unwrap() += 1;
		assert_eq!(map.get(&COUNTER), Some(&6));
	}

	#[rstest]
	fn test_get_or_default_keeps_same_name_types_apart() {
		let mut map = MetaDataMap::new();
		*map.get_or_default(&COUNTER).unwrap() += 3;
		map.get_or_default(&COUNTER_AS_STRING).unwrap().push_str("three");

		assert_eq!(map.get(&COUNTER), Some(&3));
		assert_eq!(map.get(&COUNTER_AS_STRING).map(String::as_str), Some("three"));
		assert_eq!(map.len(), 2);
	}

	#[rstest]
	fn test_remove() {
		let mut map = MetaDataMap::new();
		map.set(&LABEL, "hello".to_string());
		assert!(map.contains(&LABEL));
		assert_eq!(map.remove(&LABEL).as_deref(), Some("hello"));
		assert!(!map.contains(&LABEL));
		assert!(map.is_empty());
	}

	#[rstest]
	fn test_debug_lists_key_names() {
		let mut map = MetaDataMap::new();
		map.set(&LABEL, String::new());
		assert!(format!("{:?}", map).contains("label"));
	}
}
