//! Behaviors attached to components.
//!
//! A component carries any number of behaviors. Two kinds take part in
//! client-side event wiring:
//!
//! - [`AjaxEventBehavior`] binds a server callback to one DOM event of its
//!   component.
//! - [`EventDelegatingBehavior`] sits on a container and binds a single
//!   listener for all descendants that listen for the same event.

use eventwire_core::{EventwireError, Result};

pub use crate::delegate::{Contribution, EventDelegatingBehavior};
pub use crate::event::{AjaxEventBehavior, EventHandler};

/// Discriminant of [`Behavior`], used to filter a component's behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
	/// [`AjaxEventBehavior`]
	Event,
	/// [`EventDelegatingBehavior`]
	Delegating,
}

/// A behavior attached to a component.
#[derive(Debug)]
pub enum Behavior {
	/// Binds a server callback to a DOM event.
	Event(AjaxEventBehavior),
	/// Binds one listener for descendants sharing an event.
	Delegating(EventDelegatingBehavior),
}

impl Behavior {
	/// Returns the kind of this behavior.
	pub fn kind(&self) -> BehaviorKind {
		match self {
			Self::Event(_) => BehaviorKind::Event,
			Self::Delegating(_) => BehaviorKind::Delegating,
		}
	}

	/// Returns the normalized event name.
	pub fn event(&self) -> &str {
		match self {
			Self::Event(behavior) => behavior.event(),
			Self::Delegating(behavior) => behavior.event(),
		}
	}

	/// Returns true if the behavior does not need server-side page state.
	pub fn is_stateless(&self) -> bool {
		match self {
			Self::Event(behavior) => behavior.is_stateless(),
			Self::Delegating(_) => true,
		}
	}

	/// Returns the event behavior, if this is one.
	pub fn as_event(&self) -> Option<&AjaxEventBehavior> {
		match self {
			Self::Event(behavior) => Some(behavior),
			Self::Delegating(_) => None,
		}
	}

	/// Returns the delegating behavior, if this is one.
	pub fn as_delegating(&self) -> Option<&EventDelegatingBehavior> {
		match self {
			Self::Delegating(behavior) => Some(behavior),
			Self::Event(_) => None,
		}
	}
}

impl From<AjaxEventBehavior> for Behavior {
	fn from(behavior: AjaxEventBehavior) -> Self {
		Self::Event(behavior)
	}
}

impl From<EventDelegatingBehavior> for Behavior {
	fn from(behavior: EventDelegatingBehavior) -> Self {
		Self::Delegating(behavior)
	}
}

/// Normalizes a DOM event name.
///
/// The name is lower-cased and a leading `on` is removed once, so `onClick`,
/// `ONCLICK` and `click` all yield `click`.
///
/// # Errors
///
/// Returns [`EventwireError::InvalidArgument`] if the name is empty before or
/// after normalization.
pub fn normalize_event(event: &str) -> Result<String> {
	if event.is_empty() {
		return Err(EventwireError::invalid_argument("event must not be empty"));
	}

	let lower = event.to_lowercase();
	let normalized = lower.strip_prefix("on").unwrap_or(lower.as_str());
	if normalized.is_empty() {
		return Err(EventwireError::invalid_argument(format!(
			"event '{}' has no name after its 'on' prefix",
			event
		)));
	}

	Ok(normalized.to_string())
}
