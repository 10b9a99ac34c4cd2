//! Pages and their component trees.
//!
//! A [`Page`] owns an arena of [`Component`]s rooted at
//! [`ComponentId::PAGE`]. Besides the tree it holds the per-page state
//! behaviors rely on: the [`DelegatedEvents`] registry, typed metadata and
//! the page parameters.
//!
//! ## Example
//!
//! ```ignore
//! let mut page = Page::new();
//! let list = page.add(ComponentId::PAGE, "list")?;
//! let item = page.add(list, "item")?;
//!
//! page.add_behavior(list, EventDelegatingBehavior::new("click")?)?;
//! page.add_behavior(item, AjaxEventBehavior::new("click", |_| {})?)?;
//!
//! assert_eq!(page.delegated_events().count("click"), 1);
//! assert_eq!(page.path(item).as_deref(), Some("list:item"));
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use eventwire_core::{EventwireError, MetaDataMap, PageParameters, Result};

use crate::behavior::Behavior;
use crate::component::{Component, ComponentId};

/// Separator between component ids in a page-relative path.
pub const PATH_SEPARATOR: &str = ":";

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Registration counts of delegated events on one page.
///
/// Each attached [`EventDelegatingBehavior`](crate::behavior::EventDelegatingBehavior)
/// counts once for its event. Renders consult the registry before walking
/// the ancestor chain: an absent or zero count means no delegation is
/// possible for that event anywhere on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelegatedEvents {
	counts: HashMap<String, usize>,
}

impl DelegatedEvents {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the count for `event`; absent events count zero.
	pub fn count(&self, event: &str) -> usize {
		self.counts.get(event).copied().unwrap_or(0)
	}

	/// Returns true if at least one delegating behavior handles `event`.
	pub fn is_registered(&self, event: &str) -> bool {
		self.count(event) > 0
	}

	/// Increments the count for `event`, returning the new count.
	pub fn register(&mut self, event: &str) -> usize {
		let count = self.counts.entry(event.to_string()).or_insert(0);
		*count += 1;
		*count
	}

	/// Decrements the count for `event`, returning the new count.
	///
	/// The entry is removed when it reaches zero. Unregistering an absent
	/// event is a no-op.
	pub fn unregister(&mut self, event: &str) -> usize {
		match self.counts.get_mut(event) {
			Some(count) if *count > 1 => {
				*count -= 1;
				*count
			}
			Some(_) => {
				self.counts.remove(event);
				0
			}
			None => 0,
		}
	}

	/// Overwrites the count for `event`.
	///
	/// A stored zero behaves exactly like an absent entry.
	pub fn set(&mut self, event: impl Into<String>, count: usize) {
		self.counts.insert(event.into(), count);
	}

	/// Iterates over `(event, count)` entries in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(event, count)| (event.as_str(), *count))
	}

	/// Returns true if no entries are stored.
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}
}

/// The root of a component tree for one render-and-respond cycle.
#[derive(Debug)]
pub struct Page {
	id: u64,
	nodes: Vec<Option<Component>>,
	delegated_events: DelegatedEvents,
	metadata: MetaDataMap,
	parameters: PageParameters,
	next_markup_seq: u64,
}

impl Default for Page {
	fn default() -> Self {
		Self::new()
	}
}

impl Page {
	/// Creates an empty page.
	pub fn new() -> Self {
		Self::with_parameters(PageParameters::new())
	}

	/// Creates an empty page with the request's parameters.
	pub fn with_parameters(parameters: PageParameters) -> Self {
		let id = NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed);
		let mut root = Component::new(String::new(), None, format!("page{}", id));
		root.output_markup_id = true;

		Self {
			id,
			nodes: vec![Some(root)],
			delegated_events: DelegatedEvents::new(),
			metadata: MetaDataMap::new(),
			parameters,
			next_markup_seq: 1,
		}
	}

	/// Process-unique page id.
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Returns the component behind `id`, if it is still part of the page.
	pub fn component(&self, id: ComponentId) -> Option<&Component> {
		self.nodes.get(id.index()).and_then(Option::as_ref)
	}

	fn node(&self, id: ComponentId) -> Result<&Component> {
		self.component(id)
			.ok_or_else(|| EventwireError::ComponentNotFound(format!("#{}", id.index())))
	}

	fn node_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
		self.nodes
			.get_mut(id.index())
			.and_then(Option::as_mut)
			.ok_or_else(|| EventwireError::ComponentNotFound(format!("#{}", id.index())))
	}

	/// Adds a child component under `parent`.
	///
	/// # Errors
	///
	/// - `InvalidArgument` if `id` is empty or contains whitespace or `:`
	/// - `ComponentNotFound` if `parent` is not part of the page
	/// - `DuplicateComponent` if `parent` already has a child named `id`
	pub fn add(&mut self, parent: ComponentId, id: impl Into<String>) -> Result<ComponentId> {
		let id = id.into();
		if id.is_empty() {
			return Err(EventwireError::invalid_argument("component id must not be empty"));
		}
		if id.contains(PATH_SEPARATOR) || id.chars().any(char::is_whitespace) {
			return Err(EventwireError::invalid_argument(format!(
				"component id '{}' must not contain whitespace or '{}'",
				id, PATH_SEPARATOR
			)));
		}

		let parent_node = self.node(parent)?;
		let duplicate = parent_node
			.children
			.iter()
			.filter_map(|child| self.component(*child))
			.any(|child| child.id == id);
		if duplicate {
			return Err(EventwireError::DuplicateComponent {
				parent: self.path(parent).unwrap_or_default(),
				id,
			});
		}

		let markup_id = self.generate_markup_id(&id);
		let handle = ComponentId::from_index(self.nodes.len());
		self.nodes.push(Some(Component::new(id, Some(parent), markup_id)));
		self.node_mut(parent)?.children.push(handle);
		Ok(handle)
	}

	/// Generated ids are `{id}_{seq}`. The sequence number follows the last
	/// `_`, so two components never share one. Numbers taken by explicit
	/// markup ids are skipped.
	fn generate_markup_id(&mut self, id: &str) -> String {
		loop {
			let candidate = format!("{}_{}", id, self.next_markup_seq);
			self.next_markup_seq += 1;
			if !self.markup_id_in_use(&candidate, None) {
				return candidate;
			}
		}
	}

	fn markup_id_in_use(&self, markup_id: &str, except: Option<ComponentId>) -> bool {
		self.iter()
			.any(|(handle, node)| Some(handle) != except && node.markup_id == markup_id)
	}

	/// Removes a component and its subtree.
	///
	/// Delegating behaviors in the subtree are unregistered from
	/// [`DelegatedEvents`].
	pub fn remove(&mut self, id: ComponentId) -> Result<()> {
		if id.is_page() {
			return Err(EventwireError::invalid_argument("the page cannot be removed"));
		}
		let parent = self.node(id)?.parent;

		let mut pending = vec![id];
		while let Some(current) = pending.pop() {
			let Some(node) = self.nodes.get_mut(current.index()).and_then(Option::take) else {
				continue;
			};
			for behavior in &node.behaviors {
				if let Behavior::Delegating(delegating) = behavior {
					let count = self.delegated_events.unregister(delegating.event());
					tracing::debug!(event = delegating.event(), count, "Unregistered delegated event");
				}
			}
			pending.extend(node.children);
		}

		if let Some(parent) = parent {
			self.node_mut(parent)?.children.retain(|child| *child != id);
		}
		Ok(())
	}

	/// Attaches a behavior, returning its index on the component.
	///
	/// The component's markup id is output from now on, since the client
	/// needs it to find the element. Delegating behaviors are registered in
	/// [`DelegatedEvents`].
	pub fn add_behavior(&mut self, id: ComponentId, behavior: impl Into<Behavior>) -> Result<usize> {
		let behavior = behavior.into();
		self.node(id)?;
		if let Behavior::Delegating(delegating) = &behavior {
			let count = self.delegated_events.register(delegating.event());
			tracing::debug!(event = delegating.event(), count, "Registered delegated event");
		}

		let node = self.node_mut(id)?;
		node.output_markup_id = true;
		node.behaviors.push(behavior);
		Ok(node.behaviors.len() - 1)
	}

	/// Detaches the behavior at `index`.
	///
	/// Behaviors after `index` shift down by one, which changes their
	/// callback URLs.
	pub fn remove_behavior(&mut self, id: ComponentId, index: usize) -> Result<Behavior> {
		let node = self.node_mut(id)?;
		if index >= node.behaviors.len() {
			let path = self.path(id).unwrap_or_default();
			return Err(EventwireError::BehaviorNotFound { path, index });
		}

		let behavior = node.behaviors.remove(index);
		if let Behavior::Delegating(delegating) = &behavior {
			let count = self.delegated_events.unregister(delegating.event());
			tracing::debug!(event = delegating.event(), count, "Unregistered delegated event");
		}
		Ok(behavior)
	}

	/// Parent of `id`; `None` for the page or unknown components.
	pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
		self.component(id).and_then(Component::parent)
	}

	/// Iterates over the ancestors of `id`, nearest first, excluding the page.
	pub fn ancestors(&self, id: ComponentId) -> Ancestors<'_> {
		Ancestors {
			page: self,
			cursor: self.parent(id),
		}
	}

	/// Returns true if `id` and all of its ancestors, including the page, are
	/// enabled.
	pub fn is_enabled_in_hierarchy(&self, id: ComponentId) -> bool {
		self.all_in_hierarchy(id, Component::is_enabled)
	}

	/// Returns true if `id` and all of its ancestors, including the page, are
	/// visible.
	pub fn is_visible_in_hierarchy(&self, id: ComponentId) -> bool {
		self.all_in_hierarchy(id, Component::is_visible)
	}

	fn all_in_hierarchy(&self, id: ComponentId, predicate: fn(&Component) -> bool) -> bool {
		let mut cursor = Some(id);
		while let Some(current) = cursor {
			match self.component(current) {
				Some(node) if predicate(node) => cursor = node.parent,
				_ => return false,
			}
		}
		true
	}

	/// Enables or disables a component (and thereby its subtree).
	pub fn set_enabled(&mut self, id: ComponentId, enabled: bool) -> Result<()> {
		self.node_mut(id)?.enabled = enabled;
		Ok(())
	}

	/// Shows or hides a component (and thereby its subtree).
	pub fn set_visible(&mut self, id: ComponentId, visible: bool) -> Result<()> {
		self.node_mut(id)?.visible = visible;
		Ok(())
	}

	/// Replaces the generated markup id.
	///
	/// # Errors
	///
	/// - `InvalidArgument` if `markup_id` is empty
	/// - `DuplicateMarkupId` if another component already uses it
	pub fn set_markup_id(&mut self, id: ComponentId, markup_id: impl Into<String>) -> Result<()> {
		let markup_id = markup_id.into();
		if markup_id.is_empty() {
			return Err(EventwireError::invalid_argument("markup id must not be empty"));
		}
		self.node(id)?;
		if self.markup_id_in_use(&markup_id, Some(id)) {
			return Err(EventwireError::DuplicateMarkupId(markup_id));
		}
		self.node_mut(id)?.markup_id = markup_id;
		Ok(())
	}

	/// Controls whether the markup id is written to the rendered element.
	pub fn set_output_markup_id(&mut self, id: ComponentId, output: bool) -> Result<()> {
		self.node_mut(id)?.output_markup_id = output;
		Ok(())
	}

	/// Markup id of `id`.
	pub fn markup_id(&self, id: ComponentId) -> Option<&str> {
		self.component(id).map(Component::markup_id)
	}

	/// Page-relative path of `id`: component ids joined with `:`.
	///
	/// The page itself has the empty path.
	pub fn path(&self, id: ComponentId) -> Option<String> {
		let mut segments = Vec::new();
		let mut cursor = id;
		loop {
			let node = self.component(cursor)?;
			match node.parent {
				Some(parent) => {
					segments.push(node.id.as_str());
					cursor = parent;
				}
				None => break,
			}
		}
		segments.reverse();
		Some(segments.join(PATH_SEPARATOR))
	}

	/// Resolves a page-relative path produced by [`Page::path`].
	pub fn find(&self, path: &str) -> Option<ComponentId> {
		let mut cursor = ComponentId::PAGE;
		if path.is_empty() {
			return Some(cursor);
		}
		for segment in path.split(PATH_SEPARATOR) {
			let node = self.component(cursor)?;
			cursor = *node
				.children
				.iter()
				.find(|child| self.component(**child).is_some_and(|c| c.id == segment))?;
		}
		Some(cursor)
	}

	/// Iterates over all components, the page first, in arena order.
	pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
		self.nodes
			.iter()
			.enumerate()
			.filter_map(|(index, node)| node.as_ref().map(|n| (ComponentId::from_index(index), n)))
	}

	/// Returns true if every attached behavior is stateless.
	///
	/// Stateless pages need no server-side state between requests: their
	/// callback URLs carry everything needed to rebuild them.
	pub fn is_stateless(&self) -> bool {
		self.iter()
			.all(|(_, component)| component.behaviors.iter().all(Behavior::is_stateless))
	}

	/// Delegated event registrations.
	pub fn delegated_events(&self) -> &DelegatedEvents {
		&self.delegated_events
	}

	/// Delegated event registrations, mutably.
	pub fn delegated_events_mut(&mut self) -> &mut DelegatedEvents {
		&mut self.delegated_events
	}

	/// Typed page metadata.
	pub fn metadata(&self) -> &MetaDataMap {
		&self.metadata
	}

	/// Typed page metadata, mutably.
	pub fn metadata_mut(&mut self) -> &mut MetaDataMap {
		&mut self.metadata
	}

	/// The page parameters.
	pub fn parameters(&self) -> &PageParameters {
		&self.parameters
	}

	/// The page parameters, mutably.
	pub fn parameters_mut(&mut self) -> &mut PageParameters {
		&mut self.parameters
	}

	/// Replaces the page parameters.
	pub fn set_parameters(&mut self, parameters: PageParameters) {
		self.parameters = parameters;
	}
}

/// Iterator over a component's ancestors, nearest first.
///
/// Stops before the page node.
pub struct Ancestors<'a> {
	page: &'a Page,
	cursor: Option<ComponentId>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = (ComponentId, &'a Component);

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.cursor.filter(|id| !id.is_page())?;
		let node = self.page.component(current)?;
		self.cursor = node.parent;
		Some((current, node))
	}
}
