//! AJAX request attributes.
//!
//! The attributes describe one client-side listener: where to send the
//! request, which element and event trigger it, and how the client library
//! should treat the browser event. They are serialized to JSON with short
//! keys, and values equal to their defaults are left out of the payload.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use eventwire_core::Result;

/// HTTP method of the AJAX request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Method {
	/// GET request (default, omitted from the payload).
	#[default]
	#[serde(rename = "GET")]
	Get,
	/// POST request.
	#[serde(rename = "POST")]
	Post,
}

impl Method {
	fn is_get(&self) -> bool {
		matches!(self, Self::Get)
	}
}

/// What happens to the browser event after the listener ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EventPropagation {
	/// Let the event bubble (default, omitted from the payload).
	#[default]
	#[serde(rename = "bubble")]
	Bubble,
	/// Stop propagation to ancestors.
	#[serde(rename = "stop")]
	Stop,
	/// Stop propagation and any other listeners on the same element.
	#[serde(rename = "stopImmediate")]
	StopImmediate,
}

impl EventPropagation {
	fn is_bubble(&self) -> bool {
		matches!(self, Self::Bubble)
	}
}

/// Client-side throttling of repeated events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Throttling {
	/// Throttle identifier shared by listeners that throttle together.
	#[serde(rename = "id")]
	pub id: String,
	/// Delay in milliseconds.
	#[serde(rename = "d")]
	pub delay_ms: u64,
	/// Restart the delay whenever a new event arrives.
	#[serde(rename = "p", skip_serializing_if = "is_false")]
	pub postpone_on_update: bool,
}

impl Throttling {
	/// Creates throttling settings.
	pub fn new(id: impl Into<String>, delay_ms: u64) -> Self {
		Self {
			id: id.into(),
			delay_ms,
			postpone_on_update: false,
		}
	}
}

/// Listener configuration serialized into generated scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AjaxRequestAttributes {
	/// Callback URL.
	#[serde(rename = "u")]
	pub url: String,
	/// Markup id of the element the listener is bound to.
	#[serde(rename = "c")]
	pub markup_id: String,
	/// DOM event names, serialized space-separated.
	#[serde(rename = "e", serialize_with = "join_events")]
	pub event_names: Vec<String>,
	/// HTTP method.
	#[serde(rename = "m", skip_serializing_if = "Method::is_get")]
	pub method: Method,
	/// Request channel used to queue requests client-side.
	#[serde(rename = "ch", skip_serializing_if = "Option::is_none")]
	pub channel: Option<String>,
	/// Prevent the browser's default action.
	#[serde(rename = "pd", skip_serializing_if = "is_false")]
	pub prevent_default: bool,
	/// Event propagation after the listener ran.
	#[serde(rename = "sp", skip_serializing_if = "EventPropagation::is_bubble")]
	pub event_propagation: EventPropagation,
	/// Request timeout in milliseconds.
	#[serde(rename = "rt", skip_serializing_if = "Option::is_none")]
	pub request_timeout_ms: Option<u64>,
	/// Throttling of repeated events.
	#[serde(rename = "tr", skip_serializing_if = "Option::is_none")]
	pub throttling: Option<Throttling>,
	/// Markup id of a busy indicator shown while the request runs.
	#[serde(rename = "i", skip_serializing_if = "Option::is_none")]
	pub indicator_id: Option<String>,
	/// Let the default action run in addition to the request.
	#[serde(rename = "ad", skip_serializing_if = "is_false")]
	pub allow_default: bool,
	/// Additional static request parameters.
	#[serde(rename = "ep", skip_serializing_if = "BTreeMap::is_empty")]
	pub extra_parameters: BTreeMap<String, String>,
	/// Send the request asynchronously.
	#[serde(rename = "async", skip_serializing_if = "is_true")]
	pub asynchronous: bool,
	/// Expected response data type.
	#[serde(rename = "dt", skip_serializing_if = "Option::is_none")]
	pub data_type: Option<String>,
}

impl Default for AjaxRequestAttributes {
	fn default() -> Self {
		Self {
			url: String::new(),
			markup_id: String::new(),
			event_names: Vec::new(),
			method: Method::Get,
			channel: None,
			prevent_default: false,
			event_propagation: EventPropagation::Bubble,
			request_timeout_ms: None,
			throttling: None,
			indicator_id: None,
			allow_default: false,
			extra_parameters: BTreeMap::new(),
			asynchronous: true,
			data_type: None,
		}
	}
}

impl AjaxRequestAttributes {
	/// Creates attributes for a listener on `markup_id` calling `url`.
	pub fn new(url: impl Into<String>, markup_id: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			markup_id: markup_id.into(),
			..Self::default()
		}
	}

	/// Replaces the event names with a single event.
	pub fn set_event_names(&mut self, event: impl Into<String>) -> &mut Self {
		self.event_names = vec![event.into()];
		self
	}

	/// Adds an extra request parameter.
	pub fn extra_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.extra_parameters.insert(key.into(), value.into());
		self
	}

	/// Serializes the attributes to their JSON payload.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}

fn is_false(value: &bool) -> bool {
	!*value
}

fn is_true(value: &bool) -> bool {
	*value
}

fn join_events<S: Serializer>(events: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.serialize_str(&events.join(" "))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_are_omitted() {
		let mut attributes = AjaxRequestAttributes::new("./?l=1", "link1");
		attributes.set_event_names("click");

		assert_eq!(
			attributes.to_json().unwrap(),
			r#"{"u":"./?l=1","c":"link1","e":"click"}"#
		);
	}

	#[rstest]
	fn test_non_default_values_are_serialized() {
		let mut attributes = AjaxRequestAttributes::new("/cb", "btn");
		attributes.set_event_names("submit");
		attributes.method = Method::Post;
		attributes.prevent_default = true;
		attributes.event_propagation = EventPropagation::StopImmediate;
		attributes.request_timeout_ms = Some(500);
		attributes.asynchronous = false;
		attributes.extra_parameter("x", "1");

		let json: serde_json::Value = serde_json::from_str(&attributes.to_json().unwrap()).unwrap();

		assert_eq!(json["m"], "POST");
		assert_eq!(json["pd"], true);
		assert_eq!(json["sp"], "stopImmediate");
		assert_eq!(json["rt"], 500);
		assert_eq!(json["async"], false);
		assert_eq!(json["ep"]["x"], "1");
		assert!(json.get("ch").is_none());
		assert!(json.get("ad").is_none());
	}

	#[rstest]
	fn test_multiple_events_are_space_separated() {
		let mut attributes = AjaxRequestAttributes::new("/cb", "field");
		attributes.event_names = vec!["keyup".to_string(), "change".to_string()];

		let json: serde_json::Value = serde_json::from_str(&attributes.to_json().unwrap()).unwrap();
		assert_eq!(json["e"], "keyup change");
	}

	#[rstest]
	fn test_throttling_payload() {
		let mut attributes = AjaxRequestAttributes::new("/cb", "search");
		attributes.throttling = Some(Throttling {
			postpone_on_update: true,
			..Throttling::new("search", 300)
		});

		let json: serde_json::Value = serde_json::from_str(&attributes.to_json().unwrap()).unwrap();
		assert_eq!(json["tr"]["id"], "search");
		assert_eq!(json["tr"]["d"], 300);
		assert_eq!(json["tr"]["p"], true);
	}
}
