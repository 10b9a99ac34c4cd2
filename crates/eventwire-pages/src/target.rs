//! AJAX request target and response.

use serde::Serialize;

use eventwire_core::{PageParameters, Result};

use crate::component::ComponentId;

/// Collects the effects of one AJAX listener invocation.
///
/// Event handlers add the components that must be re-rendered, append
/// scripts for the client to evaluate, and may update the page parameters
/// that stateless links carry forward.
#[derive(Debug, Default)]
pub struct AjaxRequestTarget {
	components: Vec<ComponentId>,
	scripts: Vec<String>,
	parameters: PageParameters,
}

impl AjaxRequestTarget {
	/// Creates a target starting from the request's page parameters.
	pub fn new(parameters: PageParameters) -> Self {
		Self {
			components: Vec::new(),
			scripts: Vec::new(),
			parameters,
		}
	}

	/// Marks a component for re-rendering. Adding it twice has no effect.
	pub fn add(&mut self, component: ComponentId) -> &mut Self {
		if !self.components.contains(&component) {
			self.components.push(component);
		}
		self
	}

	/// Marks several components for re-rendering.
	pub fn add_all(&mut self, components: impl IntoIterator<Item = ComponentId>) -> &mut Self {
		for component in components {
			self.add(component);
		}
		self
	}

	/// Appends a script evaluated after the components were replaced.
	pub fn append_javascript(&mut self, script: impl Into<String>) -> &mut Self {
		self.scripts.push(script.into());
		self
	}

	/// Components marked for re-rendering, in order.
	pub fn components(&self) -> &[ComponentId] {
		&self.components
	}

	/// Appended scripts, in order.
	pub fn scripts(&self) -> &[String] {
		&self.scripts
	}

	/// The page parameters.
	pub fn parameters(&self) -> &PageParameters {
		&self.parameters
	}

	/// The page parameters, mutably.
	pub fn parameters_mut(&mut self) -> &mut PageParameters {
		&mut self.parameters
	}

	pub(crate) fn into_parts(self) -> (Vec<ComponentId>, Vec<String>, PageParameters) {
		(self.components, self.scripts, self.parameters)
	}
}

/// Result of a dispatched listener, ready to be encoded for the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AjaxResponse {
	/// Markup ids of the components to re-render.
	pub components: Vec<String>,
	/// Scripts to evaluate.
	pub scripts: Vec<String>,
	/// Page parameters after the listener ran.
	#[serde(serialize_with = "serialize_parameters")]
	pub parameters: PageParameters,
}

impl AjaxResponse {
	/// Serializes the response to JSON.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}

fn serialize_parameters<S: serde::Serializer>(
	parameters: &PageParameters,
	serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
	use serde::ser::SerializeSeq;

	let mut seq = serializer.serialize_seq(Some(parameters.len()))?;
	for pair in parameters.iter() {
		seq.serialize_element(&pair)?;
	}
	seq.end()
}
