//! Callback URLs and listener dispatch.
//!
//! Every event behavior is reachable through a callback URL naming its
//! component path and behavior index. Stateless pages also carry their page
//! parameters in the URL, so a request can rebuild the page from scratch
//! before the listener runs.

use std::fmt;

use eventwire_core::{AjaxSettings, EventwireError, PageParameters, Result};

use crate::component::ComponentId;
use crate::page::{PATH_SEPARATOR, Page};
use crate::target::{AjaxRequestTarget, AjaxResponse};

/// Address of one behavior: component path plus behavior index.
///
/// Rendered as `path:index`, e.g. `form:submit:0`. Behaviors on the page
/// itself have the empty path (`:0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerPath {
	/// Page-relative component path.
	pub component_path: String,
	/// Behavior index on the component.
	pub behavior: usize,
}

impl ListenerPath {
	/// Creates a listener path.
	pub fn new(component_path: impl Into<String>, behavior: usize) -> Self {
		Self {
			component_path: component_path.into(),
			behavior,
		}
	}

	/// Parses `path:index`.
	pub fn parse(value: &str) -> Result<Self> {
		let (path, index) = value.rsplit_once(PATH_SEPARATOR).ok_or_else(|| {
			EventwireError::InvalidListener(format!("'{}' has no behavior index", value))
		})?;
		let behavior = index.parse().map_err(|_| {
			EventwireError::InvalidListener(format!("'{}' is not a behavior index", index))
		})?;
		Ok(Self::new(path, behavior))
	}
}

impl fmt::Display for ListenerPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.component_path, PATH_SEPARATOR, self.behavior)
	}
}

/// Builds the callback URL of the behavior at `behavior` on `component`.
///
/// The query holds the page parameters, the listener parameter, and for
/// stateful pages the page id.
pub fn callback_url(
	page: &Page,
	component: ComponentId,
	behavior: usize,
	settings: &AjaxSettings,
) -> Result<String> {
	let path = page
		.path(component)
		.ok_or_else(|| EventwireError::ComponentNotFound(format!("#{:?}", component)))?;

	let mut query = page.parameters().clone();
	query.remove(&settings.listener_param);
	query.remove(&settings.page_param);
	query.set(
		settings.listener_param.as_str(),
		ListenerPath::new(path, behavior).to_string(),
	);
	if !page.is_stateless() {
		query.set(settings.page_param.as_str(), page.id().to_string());
	}

	Ok(format!("{}?{}", settings.callback_path, query.to_query_string()?))
}

/// Invokes the listener addressed by a callback URL's query string.
///
/// The request's parameters (minus the listener and page parameters) are
/// handed to the handler. The page's parameters are only replaced once the
/// handler has run, with whatever the handler left in place, and the same
/// parameters are returned in the response. A rejected request leaves the
/// page untouched.
///
/// # Errors
///
/// - `InvalidListener` if the listener parameter is missing or malformed
/// - `ListenerRejected` if a stateful page's id is missing or does not match,
///   or the component is hidden or disabled
/// - `ComponentNotFound`, `BehaviorNotFound`, `NotAnEventListener` if the
///   address does not lead to an event behavior
pub fn dispatch(page: &mut Page, query: &str, settings: &AjaxSettings) -> Result<AjaxResponse> {
	let mut parameters = PageParameters::from_query_str(query)?;
	let listener = parameters
		.get(&settings.listener_param)
		.ok_or_else(|| {
			EventwireError::InvalidListener(format!(
				"missing '{}' parameter",
				settings.listener_param
			))
		})
		.and_then(ListenerPath::parse)?;

	match parameters.get(&settings.page_param) {
		Some(page_id) if page_id != page.id().to_string() => {
			tracing::warn!(requested = page_id, current = page.id(), "Listener page expired");
			return Err(EventwireError::ListenerRejected {
				path: listener.component_path,
				reason: format!("page {} has expired", page_id),
			});
		}
		None if !page.is_stateless() => {
			tracing::warn!(current = page.id(), "Listener request without page id");
			return Err(EventwireError::ListenerRejected {
				path: listener.component_path,
				reason: format!("missing '{}' parameter", settings.page_param),
			});
		}
		_ => {}
	}

	parameters.remove(&settings.listener_param);
	parameters.remove(&settings.page_param);

	let component = page
		.find(&listener.component_path)
		.ok_or_else(|| EventwireError::ComponentNotFound(listener.component_path.clone()))?;
	let rejection = if !page.is_visible_in_hierarchy(component) {
		Some("component is not visible")
	} else if !page.is_enabled_in_hierarchy(component) {
		Some("component is disabled")
	} else {
		None
	};
	if let Some(reason) = rejection {
		tracing::warn!(path = %listener.component_path, reason, "Listener rejected");
		return Err(EventwireError::ListenerRejected {
			path: listener.component_path,
			reason: reason.to_string(),
		});
	}

	let behavior = page
		.component(component)
		.and_then(|node| node.behaviors().get(listener.behavior))
		.ok_or_else(|| EventwireError::BehaviorNotFound {
			path: listener.component_path.clone(),
			index: listener.behavior,
		})?
		.as_event()
		.ok_or_else(|| EventwireError::NotAnEventListener {
			path: listener.component_path.clone(),
			index: listener.behavior,
		})?;

	let mut target = AjaxRequestTarget::new(parameters);
	behavior.respond(&mut target);
	let (components, scripts, parameters) = target.into_parts();

	let markup_ids = components
		.into_iter()
		.filter_map(|id| {
			let markup_id = page.markup_id(id).map(str::to_string);
			if markup_id.is_none() {
				tracing::warn!(component = ?id, "Skipping removed component in AJAX response");
			}
			markup_id
		})
		.collect();

	page.set_parameters(parameters.clone());
	tracing::debug!(listener = %listener, "Dispatched AJAX listener");

	Ok(AjaxResponse {
		components: markup_ids,
		scripts,
		parameters,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::behavior::{AjaxEventBehavior, EventDelegatingBehavior};
	use rstest::rstest;

	#[rstest]
	#[case("form:submit:0", "form:submit", 0)]
	#[case(":2", "", 2)]
	#[case("link:10", "link", 10)]
	fn test_parse_listener_path(#[case] raw: &str, #[case] path: &str, #[case] index: usize) {
		let listener = ListenerPath::parse(raw).unwrap();
		assert_eq!(listener, ListenerPath::new(path, index));
		assert_eq!(listener.to_string(), raw);
	}

	#[rstest]
	#[case("link")]
	#[case("link:x")]
	#[case("link:-1")]
	fn test_parse_listener_path_rejects(#[case] raw: &str) {
		assert!(matches!(
			ListenerPath::parse(raw),
			Err(EventwireError::InvalidListener(_))
		));
	}

	#[rstest]
	fn test_callback_url_for_stateless_page() {
		let mut page = Page::new();
		page.parameters_mut().set("counter", "3");
		let link = page.add(ComponentId::PAGE, "link").unwrap();
		let index = page
			.add_behavior(link, AjaxEventBehavior::new("click", |_| {}).unwrap().stateless(true))
			.unwrap();

		let url = callback_url(&page, link, index, &AjaxSettings::default()).unwrap();

		assert_eq!(url, "./?counter=3&_listener=link%3A0");
	}

	#[rstest]
	fn test_callback_url_for_stateful_page_carries_page_id() {
		let mut page = Page::new();
		let link = page.add(ComponentId::PAGE, "link").unwrap();
		page.add_behavior(link, AjaxEventBehavior::new("click", |_| {}).unwrap())
			.unwrap();

		let url = callback_url(&page, link, 0, &AjaxSettings::default()).unwrap();

		assert!(url.ends_with(&format!("&_page={}", page.id())));
	}

	#[rstest]
	fn test_dispatch_rejects_delegating_behavior() {
		let mut page = Page::new();
		let list = page.add(ComponentId::PAGE, "list").unwrap();
		page.add_behavior(list, EventDelegatingBehavior::new("click").unwrap())
			.unwrap();

		let result = dispatch(&mut page, "_listener=list%3A0", &AjaxSettings::default());

		assert!(matches!(
			result,
			Err(EventwireError::NotAnEventListener { index: 0, .. })
		));
	}

	#[rstest]
	fn test_dispatch_requires_listener_parameter() {
		let mut page = Page::new();
		let result = dispatch(&mut page, "counter=1", &AjaxSettings::default());
		assert!(matches!(result, Err(EventwireError::InvalidListener(_))));
	}

	#[rstest]
	fn test_rejected_request_keeps_page_parameters() {
		let mut page = Page::new();
		page.parameters_mut().set("counter", "1");
		let link = page.add(ComponentId::PAGE, "link").unwrap();
		page.add_behavior(link, AjaxEventBehavior::new("click", |_| {}).unwrap().stateless(true))
			.unwrap();
		page.set_enabled(link, false).unwrap();

		let result = dispatch(&mut page, "counter=99&_listener=link%3A0", &AjaxSettings::default());

		assert!(matches!(result, Err(EventwireError::ListenerRejected { .. })));
		assert_eq!(page.parameters().get("counter"), Some("1"));
	}

	#[rstest]
	fn test_stateful_page_requires_page_id() {
		let mut page = Page::new();
		page.parameters_mut().set("counter", "1");
		let link = page.add(ComponentId::PAGE, "link").unwrap();
		page.add_behavior(link, AjaxEventBehavior::new("click", |_| {}).unwrap())
			.unwrap();

		let result = dispatch(&mut page, "counter=2&_listener=link%3A0", &AjaxSettings::default());

		assert!(matches!(
			result,
			Err(EventwireError::ListenerRejected { reason, .. }) if reason.contains("_page")
		));
		assert_eq!(page.parameters().get("counter"), Some("1"));
	}

	#[rstest]
	fn test_dispatch_rejects_expired_page() {
		let mut page = Page::new();
		let link = page.add(ComponentId::PAGE, "link").unwrap();
		page.add_behavior(link, AjaxEventBehavior::new("click", |_| {}).unwrap())
			.unwrap();
		let query = format!("_listener=link%3A0&_page={}", page.id() + 1000);

		let result = dispatch(&mut page, &query, &AjaxSettings::default());

		assert!(matches!(result, Err(EventwireError::ListenerRejected { .. })));
	}
}
