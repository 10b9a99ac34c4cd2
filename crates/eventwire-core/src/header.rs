//! Header contributions.
//!
//! Behaviors contribute scripts to the page head while it renders. The
//! [`HeaderResponse`] collects them, drops duplicates, and produces a single
//! `<script>` block in contribution order.

use std::collections::HashSet;

use crate::settings::AjaxSettings;

/// A single contribution to the page head.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeaderItem {
	/// Script executed once the DOM is ready.
	OnDomReady(String),
	/// Script executed immediately where the head is rendered.
	JavaScript(String),
}

impl HeaderItem {
	/// Creates a DOM-ready script item.
	pub fn on_dom_ready(script: impl Into<String>) -> Self {
		Self::OnDomReady(script.into())
	}

	/// Creates a plain script item.
	pub fn javascript(script: impl Into<String>) -> Self {
		Self::JavaScript(script.into())
	}

	/// Returns the script text.
	pub fn script(&self) -> &str {
		match self {
			Self::OnDomReady(script) | Self::JavaScript(script) => script,
		}
	}
}

/// Collects header items for one response.
#[derive(Debug, Default)]
pub struct HeaderResponse {
	items: Vec<HeaderItem>,
	seen: HashSet<HeaderItem>,
}

impl HeaderResponse {
	/// Creates an empty response.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an item. Returns false if an identical item was already rendered.
	pub fn render(&mut self, item: HeaderItem) -> bool {
		if self.seen.contains(&item) {
			tracing::trace!(script = item.script(), "Skipping duplicate header item");
			return false;
		}
		self.seen.insert(item.clone());
		self.items.push(item);
		true
	}

	/// Returns the collected items in contribution order.
	pub fn items(&self) -> &[HeaderItem] {
		&self.items
	}

	/// Returns the DOM-ready scripts in contribution order.
	pub fn dom_ready_scripts(&self) -> impl Iterator<Item = &str> {
		self.items.iter().filter_map(|item| match item {
			HeaderItem::OnDomReady(script) => Some(script.as_str()),
			HeaderItem::JavaScript(_) => None,
		})
	}

	/// Returns the number of collected items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns true if nothing was contributed.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Renders the collected items as one `<script>` element.
	///
	/// Plain scripts come first; DOM-ready scripts follow, wrapped in the
	/// client library's DOM-ready hook. Returns an empty string if nothing
	/// was contributed.
	pub fn to_html(&self, settings: &AjaxSettings) -> String {
		if self.items.is_empty() {
			return String::new();
		}

		let mut body = String::new();
		for item in &self.items {
			if let HeaderItem::JavaScript(script) = item {
				body.push_str(script);
				body.push('\n');
			}
		}

		let dom_ready: Vec<&str> = self.dom_ready_scripts().collect();
		if !dom_ready.is_empty() {
			body.push_str(&format!(
				"{}.Event.add(window, \"domready\", function(event) {{\n",
				settings.js_namespace
			));
			for script in dom_ready {
				body.push_str(script);
				body.push('\n');
			}
			body.push_str("});\n");
		}

		if settings.escape_scripts {
			body = escape_script(&body);
		}

		format!("<script type=\"text/javascript\">\n{}</script>", body)
	}
}

/// Escapes closing-tag sequences so script text cannot end its element.
pub fn escape_script(script: &str) -> String {
	script.replace("</", "<\\/")
}
