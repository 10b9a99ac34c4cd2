//! Components of a page tree.

use crate::behavior::{Behavior, BehaviorKind, EventDelegatingBehavior};

/// Handle of a component within its [`Page`](crate::page::Page).
///
/// Handles are only meaningful for the page that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
	/// The page's own root node.
	pub const PAGE: ComponentId = ComponentId(0);

	pub(crate) fn from_index(index: usize) -> Self {
		Self(index)
	}

	pub(crate) fn index(self) -> usize {
		self.0
	}

	/// Returns true if this is the page's root node.
	pub fn is_page(self) -> bool {
		self == Self::PAGE
	}
}

/// A node in a page's component tree.
///
/// The page owns every component; `parent` is a plain back-reference into
/// the same page.
#[derive(Debug)]
pub struct Component {
	pub(crate) id: String,
	pub(crate) parent: Option<ComponentId>,
	pub(crate) children: Vec<ComponentId>,
	pub(crate) enabled: bool,
	pub(crate) visible: bool,
	pub(crate) markup_id: String,
	pub(crate) output_markup_id: bool,
	pub(crate) behaviors: Vec<Behavior>,
}

impl Component {
	pub(crate) fn new(id: String, parent: Option<ComponentId>, markup_id: String) -> Self {
		Self {
			id,
			parent,
			children: Vec::new(),
			enabled: true,
			visible: true,
			markup_id,
			output_markup_id: false,
			behaviors: Vec::new(),
		}
	}

	/// Id of the component, unique among its siblings.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Parent handle; `None` for the page itself.
	pub fn parent(&self) -> Option<ComponentId> {
		self.parent
	}

	/// Child handles in insertion order.
	pub fn children(&self) -> &[ComponentId] {
		&self.children
	}

	/// Whether this component itself is enabled.
	///
	/// See [`Page::is_enabled_in_hierarchy`](crate::page::Page::is_enabled_in_hierarchy)
	/// for the inherited state.
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Whether this component itself is visible.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Markup id of the rendered DOM node, stable for the page's lifetime.
	pub fn markup_id(&self) -> &str {
		&self.markup_id
	}

	/// Whether the markup id is written to the rendered element.
	pub fn output_markup_id(&self) -> bool {
		self.output_markup_id
	}

	/// All attached behaviors in attachment order.
	pub fn behaviors(&self) -> &[Behavior] {
		&self.behaviors
	}

	/// Attached behaviors of one kind, with their indices.
	pub fn behaviors_of_kind(&self, kind: BehaviorKind) -> impl Iterator<Item = (usize, &Behavior)> {
		self.behaviors
			.iter()
			.enumerate()
			.filter(move |(_, behavior)| behavior.kind() == kind)
	}

	/// Attached delegating behaviors, with their indices.
	pub fn delegating_behaviors(&self) -> impl Iterator<Item = (usize, &EventDelegatingBehavior)> {
		self.behaviors
			.iter()
			.enumerate()
			.filter_map(|(index, behavior)| behavior.as_delegating().map(|d| (index, d)))
	}
}
