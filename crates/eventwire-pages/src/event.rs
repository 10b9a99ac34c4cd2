//! Event-bound AJAX behavior.

use std::fmt;
use std::sync::Arc;

use eventwire_core::{AjaxSettings, Result};

use crate::attributes::AjaxRequestAttributes;
use crate::behavior::normalize_event;
use crate::target::AjaxRequestTarget;

/// Server-side handler invoked when the bound event fires.
pub type EventHandler = Arc<dyn Fn(&mut AjaxRequestTarget) + Send + Sync + 'static>;

type AttributesHook = Arc<dyn Fn(&mut AjaxRequestAttributes) + Send + Sync + 'static>;

/// An AJAX behavior attached to one client-side event, such as `click`,
/// `change` or `keydown`.
///
/// When the event fires in the browser, the client library calls back to the
/// server and the behavior's handler runs with an [`AjaxRequestTarget`].
///
/// # Example
///
/// ```ignore
/// let behavior = AjaxEventBehavior::new("onclick", move |target| {
///     target.add(label);
/// })?;
/// assert_eq!(behavior.event(), "click");
/// page.add_behavior(div, behavior)?;
/// ```
pub struct AjaxEventBehavior {
	event: String,
	handler: EventHandler,
	attributes_hook: Option<AttributesHook>,
	stateless: bool,
}

impl AjaxEventBehavior {
	/// Creates a behavior for `event`.
	///
	/// The name is normalized once here (lower-cased, `on` prefix removed).
	///
	/// # Errors
	///
	/// Returns `InvalidArgument` if the event name is empty.
	pub fn new<F>(event: &str, handler: F) -> Result<Self>
	where
		F: Fn(&mut AjaxRequestTarget) + Send + Sync + 'static,
	{
		Self::with_check(event, |_| Ok(()), handler)
	}

	/// Creates a behavior, running `check` on the raw event name first.
	///
	/// Use the check to refuse events that make no sense for the component
	/// the behavior is meant for. An error from `check` is returned as is.
	pub fn with_check<C, F>(event: &str, check: C, handler: F) -> Result<Self>
	where
		C: FnOnce(&str) -> Result<()>,
		F: Fn(&mut AjaxRequestTarget) + Send + Sync + 'static,
	{
		check(event)?;
		let event = normalize_event(event)?;

		Ok(Self {
			event,
			handler: Arc::new(handler),
			attributes_hook: None,
			stateless: false,
		})
	}

	/// Sets the stateless hint.
	pub fn stateless(mut self, stateless: bool) -> Self {
		self.stateless = stateless;
		self
	}

	/// Customizes the request attributes of every rendered listener.
	pub fn update_attributes<F>(mut self, hook: F) -> Self
	where
		F: Fn(&mut AjaxRequestAttributes) + Send + Sync + 'static,
	{
		self.attributes_hook = Some(Arc::new(hook));
		self
	}

	/// Returns the normalized event name.
	pub fn event(&self) -> &str {
		&self.event
	}

	/// Returns the stateless hint.
	pub fn is_stateless(&self) -> bool {
		self.stateless
	}

	/// Builds the request attributes for a listener on `markup_id`.
	pub fn ajax_attributes(
		&self,
		settings: &AjaxSettings,
		callback_url: &str,
		markup_id: &str,
	) -> AjaxRequestAttributes {
		let mut attributes = AjaxRequestAttributes::new(callback_url, markup_id);
		attributes.request_timeout_ms = settings.default_request_timeout_ms;
		if let Some(hook) = &self.attributes_hook {
			hook(&mut attributes);
		}
		// The bound event always wins over the hook.
		attributes.set_event_names(self.event.as_str());
		attributes
	}

	/// Serializes the request attributes for a listener on `markup_id`.
	pub fn render_ajax_attributes(
		&self,
		settings: &AjaxSettings,
		callback_url: &str,
		markup_id: &str,
	) -> Result<String> {
		self.ajax_attributes(settings, callback_url, markup_id)
			.to_json()
	}

	/// Wraps serialized attributes in the client call that binds the listener.
	pub fn callback_script(&self, settings: &AjaxSettings, attributes: &str) -> String {
		format!("{}.Ajax.ajax({});", settings.js_namespace, attributes)
	}

	/// Runs the handler for a fired event.
	pub fn respond(&self, target: &mut AjaxRequestTarget) {
		tracing::debug!(event = %self.event, "Invoking AJAX event handler");
		(self.handler)(target);
	}
}

impl fmt::Debug for AjaxEventBehavior {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AjaxEventBehavior")
			.field("event", &self.event)
			.field("handler", &"<function>")
			.field("stateless", &self.stateless)
			.finish()
	}
}
