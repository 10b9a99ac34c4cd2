//! AJAX settings.
//!
//! Settings control how generated client scripts and callback URLs look.
//! Every field has a default, so an empty TOML document is a valid
//! configuration.
//!
//! ## Example
//!
//! ```ignore
//! use eventwire_core::AjaxSettings;
//!
//! let settings = AjaxSettings::from_toml_str(r#"
//!     js_namespace = "App"
//!     delegation_enabled = false
//! "#)?;
//! assert_eq!(settings.js_namespace, "App");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for AJAX behavior rendering and listener dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AjaxSettings {
	/// Namespace of the client library used in generated scripts.
	pub js_namespace: String,

	/// Base path of listener callback URLs.
	pub callback_path: String,

	/// Query parameter naming the invoked listener.
	pub listener_param: String,

	/// Query parameter carrying the page id of stateful pages.
	pub page_param: String,

	/// When false, every event behavior renders its own script.
	pub delegation_enabled: bool,

	/// Timeout applied to requests that do not set one, in milliseconds.
	pub default_request_timeout_ms: Option<u64>,

	/// Escape `</` inside emitted scripts.
	pub escape_scripts: bool,
}

impl Default for AjaxSettings {
	fn default() -> Self {
		Self {
			js_namespace: "Eventwire".to_string(),
			callback_path: "./".to_string(),
			listener_param: "_listener".to_string(),
			page_param: "_page".to_string(),
			delegation_enabled: true,
			default_request_timeout_ms: None,
			escape_scripts: true,
		}
	}
}

impl AjaxSettings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let source = std::fs::read_to_string(path.as_ref())?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.as_ref().display(), "Loaded AJAX settings");
		Ok(settings)
	}

	/// Sets the client library namespace.
	pub fn js_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.js_namespace = namespace.into();
		self
	}

	/// Sets the callback base path.
	pub fn callback_path(mut self, path: impl Into<String>) -> Self {
		self.callback_path = path.into();
		self
	}

	/// Enables or disables event delegation.
	pub fn delegation(mut self, enabled: bool) -> Self {
		self.delegation_enabled = enabled;
		self
	}

	/// Sets the default request timeout.
	pub fn default_request_timeout_ms(mut self, timeout: u64) -> Self {
		self.default_request_timeout_ms = Some(timeout);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = AjaxSettings::default();
		assert_eq!(settings.js_namespace, "Eventwire");
		assert_eq!(settings.callback_path, "./");
		assert_eq!(settings.listener_param, "_listener");
		assert!(settings.delegation_enabled);
		assert!(settings.escape_scripts);
		assert_eq!(settings.default_request_timeout_ms, None);
	}

	#[rstest]
	fn test_empty_document_uses_defaults() {
		let settings = AjaxSettings::from_toml_str("").unwrap();
		assert_eq!(settings, AjaxSettings::default());
	}

	#[rstest]
	fn test_partial_document() {
		let settings = AjaxSettings::from_toml_str(
			r#"
			js_namespace = "App"
			delegation_enabled = false
			default_request_timeout_ms = 1500
			"#,
		)
		.unwrap();

		assert_eq!(settings.js_namespace, "App");
		assert!(!settings.delegation_enabled);
		assert_eq!(settings.default_request_timeout_ms, Some(1500));
		assert_eq!(settings.listener_param, "_listener");
	}

	#[rstest]
	fn test_invalid_document() {
		let result = AjaxSettings::from_toml_str("delegation_enabled = \"maybe\"");
		assert!(result.is_err());
	}

	#[rstest]
	fn test_builder_chain() {
		let settings = AjaxSettings::new()
			.js_namespace("Site")
			.callback_path("/ajax")
			.delegation(false)
			.default_request_timeout_ms(250);

		assert_eq!(settings.js_namespace, "Site");
		assert_eq!(settings.callback_path, "/ajax");
		assert!(!settings.delegation_enabled);
		assert_eq!(settings.default_request_timeout_ms, Some(250));
	}
}
