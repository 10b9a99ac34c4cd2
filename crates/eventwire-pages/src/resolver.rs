//! Listener resolution for event behaviors.
//!
//! Each time an [`AjaxEventBehavior`](crate::behavior::AjaxEventBehavior)
//! renders, it decides where its listener goes:
//!
//! 1. nowhere, if its component is disabled in the hierarchy;
//! 2. to the nearest ancestor whose [`EventDelegatingBehavior`] handles the
//!    event, if delegation is registered for that event on the page;
//! 3. otherwise into a standalone script bound directly to the component.
//!
//! [`EventDelegatingBehavior`]: crate::behavior::EventDelegatingBehavior

use eventwire_core::{AjaxSettings, EventwireError, HeaderItem, HeaderResponse, Result};

use crate::component::ComponentId;
use crate::delegate::{Contributions, DelegationTarget};
use crate::listener::callback_url;
use crate::page::Page;

/// Where one rendered listener ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
	/// The component is disabled in the hierarchy; nothing was rendered.
	Suppressed,
	/// The listener was contributed to a delegating ancestor.
	Delegated(DelegationTarget),
	/// A standalone dom-ready script was rendered.
	Direct,
}

/// Mutable state of one render pass.
#[derive(Debug)]
pub struct RenderContext<'s> {
	/// Settings in effect.
	pub settings: &'s AjaxSettings,
	/// Collected head items.
	pub response: HeaderResponse,
	/// Listener configurations handed to delegating ancestors.
	pub contributions: Contributions,
}

impl<'s> RenderContext<'s> {
	/// Creates an empty context.
	pub fn new(settings: &'s AjaxSettings) -> Self {
		Self {
			settings,
			response: HeaderResponse::new(),
			contributions: Contributions::new(),
		}
	}
}

/// Finds the delegating behavior responsible for `event` on `component`.
///
/// Returns `None` without walking the tree when the page has no delegating
/// behavior registered for the event. Otherwise the ancestors are searched
/// nearest first, the page excluded, and the first behavior that handles the
/// event wins.
pub fn find_delegating_ancestor(
	page: &Page,
	component: ComponentId,
	event: &str,
) -> Option<DelegationTarget> {
	if !page.delegated_events().is_registered(event) {
		tracing::trace!(event, "No delegated registration for event");
		return None;
	}

	for (ancestor, node) in page.ancestors(component) {
		let found = node
			.delegating_behaviors()
			.find(|(_, delegating)| delegating.handles(event));
		if let Some((behavior, _)) = found {
			tracing::trace!(event, container = node.markup_id(), "Found delegating ancestor");
			return Some(DelegationTarget {
				container: ancestor,
				behavior,
			});
		}
	}

	tracing::trace!(event, "No ancestor delegates event");
	None
}

/// Renders the listener of the event behavior at `behavior_index` on
/// `component` into `ctx`.
///
/// # Errors
///
/// - `ComponentNotFound` if `component` is not part of the page
/// - `BehaviorNotFound` if the component has no behavior at the index
/// - `NotAnEventListener` if the behavior at the index is not an event
///   behavior
pub fn resolve_and_render(
	page: &Page,
	component: ComponentId,
	behavior_index: usize,
	ctx: &mut RenderContext<'_>,
) -> Result<Resolution> {
	let node = page
		.component(component)
		.ok_or_else(|| EventwireError::ComponentNotFound(format!("#{:?}", component)))?;
	let behavior = node
		.behaviors()
		.get(behavior_index)
		.ok_or_else(|| EventwireError::BehaviorNotFound {
			path: page.path(component).unwrap_or_default(),
			index: behavior_index,
		})?
		.as_event()
		.ok_or_else(|| EventwireError::NotAnEventListener {
			path: page.path(component).unwrap_or_default(),
			index: behavior_index,
		})?;

	if !page.is_enabled_in_hierarchy(component) {
		tracing::debug!(
			event = behavior.event(),
			markup_id = node.markup_id(),
			"Suppressing listener of disabled component"
		);
		return Ok(Resolution::Suppressed);
	}

	let url = callback_url(page, component, behavior_index, ctx.settings)?;
	let attributes = behavior.render_ajax_attributes(ctx.settings, &url, node.markup_id())?;

	let target = if ctx.settings.delegation_enabled {
		find_delegating_ancestor(page, component, behavior.event())
	} else {
		None
	};

	match target {
		Some(target) => {
			tracing::debug!(
				event = behavior.event(),
				markup_id = node.markup_id(),
				container = ?target.container,
				"Delegating listener to ancestor"
			);
			ctx.contributions
				.contribute(target, node.markup_id(), attributes);
			Ok(Resolution::Delegated(target))
		}
		None => {
			tracing::debug!(
				event = behavior.event(),
				markup_id = node.markup_id(),
				"Rendering direct listener"
			);
			let script = behavior.callback_script(ctx.settings, &attributes);
			ctx.response.render(HeaderItem::on_dom_ready(script));
			Ok(Resolution::Direct)
		}
	}
}
