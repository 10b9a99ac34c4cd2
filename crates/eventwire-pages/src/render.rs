//! Head rendering for a whole page.
//!
//! The pass walks visible components depth first. Event behaviors resolve
//! their listeners on the way down; a delegating behavior renders its
//! consolidated script once its component's subtree is done, so every
//! descendant has had the chance to contribute.

use eventwire_core::{AjaxSettings, HeaderItem, HeaderResponse, Result};

use crate::behavior::{Behavior, BehaviorKind};
use crate::component::ComponentId;
use crate::delegate::DelegationTarget;
use crate::page::Page;
use crate::resolver::{RenderContext, Resolution, resolve_and_render};

/// Outcome of one listener during a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedListener {
	/// Component carrying the event behavior.
	pub component: ComponentId,
	/// Index of the behavior on the component.
	pub behavior: usize,
	/// Where the listener went.
	pub resolution: Resolution,
}

/// Head contributions of a rendered page.
#[derive(Debug)]
pub struct RenderedHead {
	/// Collected head items.
	pub response: HeaderResponse,
	/// Resolution of every event behavior on a visible component, in render
	/// order.
	pub resolutions: Vec<ResolvedListener>,
}

impl RenderedHead {
	/// Returns the resolution of the listener at `behavior` on `component`.
	pub fn resolution(&self, component: ComponentId, behavior: usize) -> Option<Resolution> {
		self.resolutions
			.iter()
			.find(|listener| listener.component == component && listener.behavior == behavior)
			.map(|listener| listener.resolution)
	}

	/// Renders the head items as a `<script>` element.
	pub fn to_html(&self, settings: &AjaxSettings) -> String {
		self.response.to_html(settings)
	}
}

/// Renders the head contributions of every behavior on the page.
///
/// The page is only read; per-pass state lives in a [`RenderContext`].
pub fn render_head(page: &Page, settings: &AjaxSettings) -> Result<RenderedHead> {
	let mut ctx = RenderContext::new(settings);
	let mut resolutions = Vec::new();
	render_component(page, ComponentId::PAGE, &mut ctx, &mut resolutions)?;

	tracing::debug!(
		page = page.id(),
		items = ctx.response.len(),
		listeners = resolutions.len(),
		"Rendered page head"
	);
	Ok(RenderedHead {
		response: ctx.response,
		resolutions,
	})
}

fn render_component(
	page: &Page,
	id: ComponentId,
	ctx: &mut RenderContext<'_>,
	resolutions: &mut Vec<ResolvedListener>,
) -> Result<()> {
	let Some(node) = page.component(id) else {
		return Ok(());
	};
	if !node.is_visible() {
		return Ok(());
	}

	for (index, _) in node.behaviors_of_kind(BehaviorKind::Event) {
		let resolution = resolve_and_render(page, id, index, ctx)?;
		resolutions.push(ResolvedListener {
			component: id,
			behavior: index,
			resolution,
		});
	}

	for child in node.children() {
		render_component(page, *child, ctx, resolutions)?;
	}

	for (index, behavior) in node.behaviors().iter().enumerate() {
		let Behavior::Delegating(delegating) = behavior else {
			continue;
		};
		let target = DelegationTarget {
			container: id,
			behavior: index,
		};
		let contributions = ctx.contributions.take(&target);
		if let Some(script) =
			delegating.render_consolidated(ctx.settings, node.markup_id(), &contributions)?
		{
			tracing::debug!(
				event = delegating.event(),
				container = node.markup_id(),
				listeners = contributions.len(),
				"Rendering consolidated listener"
			);
			ctx.response.render(HeaderItem::on_dom_ready(script));
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::behavior::{AjaxEventBehavior, EventDelegatingBehavior};
	use rstest::rstest;

	#[rstest]
	fn test_empty_page_renders_nothing() {
		let page = Page::new();
		let head = render_head(&page, &AjaxSettings::default()).unwrap();
		assert!(head.response.is_empty());
		assert_eq!(head.to_html(&AjaxSettings::default()), "");
	}

	#[rstest]
	fn test_hidden_subtree_is_skipped() {
		let mut page = Page::new();
		let panel = page.add(ComponentId::PAGE, "panel").unwrap();
		let button = page.add(panel, "button").unwrap();
		page.add_behavior(button, AjaxEventBehavior::new("click", |_| {}).unwrap())
			.unwrap();
		page.set_visible(panel, false).unwrap();

		let head = render_head(&page, &AjaxSettings::default()).unwrap();

		assert!(head.response.is_empty());
		assert_eq!(head.resolution(button, 0), None);
	}

	#[rstest]
	fn test_consolidated_script_follows_direct_scripts_of_subtree() {
		let mut page = Page::new();
		let list = page.add(ComponentId::PAGE, "list").unwrap();
		let item = page.add(list, "item").unwrap();
		let input = page.add(list, "input").unwrap();
		page.add_behavior(list, EventDelegatingBehavior::new("click").unwrap())
			.unwrap();
		page.add_behavior(item, AjaxEventBehavior::new("click", |_| {}).unwrap())
			.unwrap();
		page.add_behavior(input, AjaxEventBehavior::new("change", |_| {}).unwrap())
			.unwrap();

		let head = render_head(&page, &AjaxSettings::default()).unwrap();
		let scripts: Vec<&str> = head.response.dom_ready_scripts().collect();

		assert_eq!(scripts.len(), 2);
		assert!(scripts[0].starts_with("Eventwire.Ajax.ajax("));
		assert!(scripts[1].starts_with("Eventwire.Event.delegate(\"list_1\", \"click\""));
		assert_eq!(head.resolution(input, 0), Some(Resolution::Direct));
	}

	#[rstest]
	fn test_delegating_without_contributions_renders_nothing() {
		let mut page = Page::new();
		let list = page.add(ComponentId::PAGE, "list").unwrap();
		page.add_behavior(list, EventDelegatingBehavior::new("click").unwrap())
			.unwrap();

		let head = render_head(&page, &AjaxSettings::default()).unwrap();

		assert!(head.response.is_empty());
	}
}
