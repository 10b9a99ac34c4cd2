//! Page parameters.
//!
//! Stateless pages carry everything they need to rebuild themselves in the
//! request URL. [`PageParameters`] is the ordered multi-map of those named
//! values.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Ordered multi-map of named URL parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParameters {
	entries: Vec<(String, String)>,
}

impl PageParameters {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Decodes parameters from a URL query string (without the leading `?`).
	pub fn from_query_str(query: &str) -> Result<Self> {
		let entries: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		Ok(Self { entries })
	}

	/// Encodes the parameters as a URL query string.
	pub fn to_query_string(&self) -> Result<String> {
		Ok(serde_urlencoded::to_string(&self.entries)?)
	}

	/// Returns the first value for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Returns the first non-empty value for `key` parsed as `T`.
	///
	/// Returns `None` when the value is absent, empty, or fails to parse.
	pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
		self.get(key)
			.filter(|value| !value.is_empty())
			.and_then(|value| value.parse().ok())
	}

	/// Returns every value for `key` in insertion order.
	pub fn get_all(&self, key: &str) -> Vec<&str> {
		self.entries
			.iter()
			.filter(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
			.collect()
	}

	/// Replaces all values for `key` with a single value.
	///
	/// The value keeps the position of the first existing entry, or is
	/// appended when the key is new.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		let key = key.into();
		let value = value.into();
		match self.entries.iter().position(|(k, _)| *k == key) {
			Some(first) => {
				self.entries[first].1 = value;
				let mut index = 0;
				self.entries.retain(|(k, _)| {
					let keep = index <= first || *k != key;
					index += 1;
					keep
				});
			}
			None => self.entries.push((key, value)),
		}
		self
	}

	/// Appends a value for `key`, keeping existing ones.
	pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.entries.push((key.into(), value.into()));
		self
	}

	/// Removes every value for `key`. Returns true if anything was removed.
	pub fn remove(&mut self, key: &str) -> bool {
		let before = self.entries.len();
		self.entries.retain(|(k, _)| k != key);
		before != self.entries.len()
	}

	/// Iterates over all `(key, value)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Returns the number of stored pairs.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if no parameters are stored.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PageParameters {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_set_replaces_all_values_in_place() {
		let mut params: PageParameters =
			[("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();

		params.set("a", "9");

		assert_eq!(params.get_all("a"), vec!["9"]);
		assert_eq!(
			params.iter().collect::<Vec<_>>(),
			vec![("a", "9"), ("b", "2")]
		);
	}

	#[rstest]
	fn test_add_keeps_existing_values() {
		let mut params = PageParameters::new();
		params.add("tag", "x").add("tag", "y");
		assert_eq!(params.get("tag"), Some("x"));
		assert_eq!(params.get_all("tag"), vec!["x", "y"]);
	}

	#[rstest]
	#[case("5", Some(5))]
	#[case("", None)]
	#[case("five", None)]
	fn test_get_parsed(#[case] raw: &str, #[case] expected: Option<i32>) {
		let mut params = PageParameters::new();
		params.set("counter", raw);
		assert_eq!(params.get_parsed::<i32>("counter"), expected);
	}

	#[rstest]
	fn test_query_string_encoding() {
		let mut params = PageParameters::new();
		params.set("counter", "1").set("q", "a b&c");

		let query = params.to_query_string().unwrap();
		assert_eq!(query, "counter=1&q=a+b%26c");
		assert_eq!(PageParameters::from_query_str(&query).unwrap(), params);
	}

	#[rstest]
	fn test_remove() {
		let mut params: PageParameters = [("a", "1"), ("a", "2")].into_iter().collect();
		assert!(params.remove("a"));
		assert!(!params.remove("a"));
		assert!(params.is_empty());
	}
}
