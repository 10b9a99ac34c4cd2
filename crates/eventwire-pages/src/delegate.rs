//! Event delegation.
//!
//! An [`EventDelegatingBehavior`] on a container replaces the per-element
//! listeners of its descendants with one listener on the container. During a
//! render pass each descendant hands over its markup id and serialized
//! request attributes as a [`Contribution`]; once the container's subtree has
//! rendered, the behavior emits a single script carrying all of them.

use std::collections::BTreeMap;

use eventwire_core::{AjaxSettings, Result};

use crate::behavior::normalize_event;
use crate::component::ComponentId;

/// Listener configuration handed to a delegating ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
	/// Markup id of the descendant.
	pub markup_id: String,
	/// Serialized request attributes of the descendant's listener.
	pub attributes: String,
}

/// One listener bound on a container for all matching descendants.
#[derive(Debug, Clone)]
pub struct EventDelegatingBehavior {
	event: String,
}

impl EventDelegatingBehavior {
	/// Creates a delegating behavior for `event`.
	///
	/// The name is normalized the same way as for
	/// [`AjaxEventBehavior`](crate::behavior::AjaxEventBehavior).
	pub fn new(event: &str) -> Result<Self> {
		Ok(Self {
			event: normalize_event(event)?,
		})
	}

	/// Returns the normalized event name.
	pub fn event(&self) -> &str {
		&self.event
	}

	/// Returns true if this behavior handles `event` (case-insensitive).
	pub fn handles(&self, event: &str) -> bool {
		self.event.eq_ignore_ascii_case(event)
	}

	/// Renders the consolidated listener script for `container_markup_id`.
	///
	/// Returns `None` when no descendant contributed.
	pub fn render_consolidated(
		&self,
		settings: &AjaxSettings,
		container_markup_id: &str,
		contributions: &[Contribution],
	) -> Result<Option<String>> {
		if contributions.is_empty() {
			return Ok(None);
		}

		let mut entries = Vec::with_capacity(contributions.len());
		for contribution in contributions {
			entries.push(format!(
				"{}:{}",
				serde_json::to_string(&contribution.markup_id)?,
				contribution.attributes
			));
		}

		Ok(Some(format!(
			"{}.Event.delegate({}, {}, {{{}}});",
			settings.js_namespace,
			serde_json::to_string(container_markup_id)?,
			serde_json::to_string(&self.event)?,
			entries.join(",")
		)))
	}
}

/// Identifies one delegating behavior within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DelegationTarget {
	/// Container carrying the behavior.
	pub container: ComponentId,
	/// Index of the behavior on the container.
	pub behavior: usize,
}

/// Contributions received by delegating behaviors during one render pass.
#[derive(Debug, Default)]
pub struct Contributions {
	entries: BTreeMap<DelegationTarget, Vec<Contribution>>,
}

impl Contributions {
	/// Creates an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a descendant's listener configuration for `target`.
	pub fn contribute(
		&mut self,
		target: DelegationTarget,
		markup_id: impl Into<String>,
		attributes: impl Into<String>,
	) {
		self.entries.entry(target).or_default().push(Contribution {
			markup_id: markup_id.into(),
			attributes: attributes.into(),
		});
	}

	/// Returns the contributions recorded for `target`.
	pub fn get(&self, target: &DelegationTarget) -> &[Contribution] {
		self.entries
			.get(target)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Removes and returns the contributions recorded for `target`.
	pub fn take(&mut self, target: &DelegationTarget) -> Vec<Contribution> {
		self.entries.remove(target).unwrap_or_default()
	}

	/// Returns true if nothing was contributed.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn contribution(markup_id: &str, attributes: &str) -> Contribution {
		Contribution {
			markup_id: markup_id.to_string(),
			attributes: attributes.to_string(),
		}
	}

	#[rstest]
	fn test_handles_is_case_insensitive() {
		let behavior = EventDelegatingBehavior::new("onClick").unwrap();
		assert_eq!(behavior.event(), "click");
		assert!(behavior.handles("CLICK"));
		assert!(!behavior.handles("change"));
	}

	#[rstest]
	fn test_no_contributions_renders_nothing() {
		let behavior = EventDelegatingBehavior::new("click").unwrap();
		let script = behavior
			.render_consolidated(&AjaxSettings::default(), "list1", &[])
			.unwrap();
		assert!(script.is_none());
	}

	#[rstest]
	fn test_consolidated_script() {
		let behavior = EventDelegatingBehavior::new("click").unwrap();
		let contributions = vec![
			contribution("item1", r#"{"c":"item1"}"#),
			contribution("item2", r#"{"c":"item2"}"#),
		];

		let script = behavior
			.render_consolidated(&AjaxSettings::default(), "list1", &contributions)
			.unwrap()
			.unwrap();

		assert_eq!(
			script,
			r#"Eventwire.Event.delegate("list1", "click", {"item1":{"c":"item1"},"item2":{"c":"item2"}});"#
		);
	}

	#[rstest]
	fn test_contributions_buffer() {
		let target = DelegationTarget {
			container: ComponentId::from_index(1),
			behavior: 0,
		};
		let other = DelegationTarget {
			container: ComponentId::from_index(2),
			behavior: 0,
		};
		let mut buffer = Contributions::new();
		buffer.contribute(target, "a", "{}");
		buffer.contribute(target, "b", "{}");

		assert_eq!(buffer.get(&target).len(), 2);
		assert!(buffer.get(&other).is_empty());
		assert_eq!(buffer.take(&target).len(), 2);
		assert!(buffer.is_empty());
	}
}
