//! Error types shared by the eventwire crates.

use thiserror::Error;

/// Errors raised while building pages, rendering behaviors, or dispatching
/// listener requests.
#[derive(Debug, Error)]
pub enum EventwireError {
	/// An argument was empty or rejected by a validation hook.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// A sibling component already uses the same id.
	#[error("Duplicate component id '{id}' under '{parent}'")]
	DuplicateComponent {
		/// Path of the parent component (empty for the page).
		parent: String,
		/// The conflicting component id.
		id: String,
	},

	/// Another component already renders with the given markup id.
	#[error("Markup id '{0}' is already in use")]
	DuplicateMarkupId(String),

	/// No component exists at the given path.
	#[error("Component not found: {0}")]
	ComponentNotFound(String),

	/// The component has no behavior at the given index.
	#[error("Behavior {index} not found on component '{path}'")]
	BehaviorNotFound {
		/// Path of the component.
		path: String,
		/// Requested behavior index.
		index: usize,
	},

	/// The behavior at the given index does not listen for events.
	#[error("Behavior {index} on component '{path}' is not an event listener")]
	NotAnEventListener {
		/// Path of the component.
		path: String,
		/// Behavior index.
		index: usize,
	},

	/// The listener exists but may not be invoked.
	#[error("Listener on '{path}' rejected: {reason}")]
	ListenerRejected {
		/// Path of the component.
		path: String,
		/// Why the invocation was refused.
		reason: String,
	},

	/// The listener query parameter is missing or malformed.
	#[error("Invalid listener: {0}")]
	InvalidListener(String),

	/// Settings could not be parsed.
	#[error("Settings error: {0}")]
	Settings(#[from] toml::de::Error),

	/// I/O failure while reading settings.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// A query string could not be decoded.
	#[error("Query error: {0}")]
	Query(#[from] serde_urlencoded::de::Error),

	/// A query string could not be encoded.
	#[error("Query encoding error: {0}")]
	QueryEncode(#[from] serde_urlencoded::ser::Error),
}

impl EventwireError {
	/// Shorthand for [`EventwireError::InvalidArgument`].
	pub fn invalid_argument(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}
}

/// Result type alias for eventwire operations.
pub type Result<T> = std::result::Result<T, EventwireError>;
