//! # Eventwire
//!
//! Server-side component trees whose behaviors wire browser events to AJAX
//! callbacks, with event delegation for large lists and forms.
//!
//! ## Crates
//!
//! - [`core`]: errors, [`AjaxSettings`], page metadata, page parameters and
//!   header contributions
//! - [`pages`]: component trees, event and delegating behaviors, head
//!   rendering and listener dispatch (feature `pages`, on by default)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eventwire::prelude::*;
//!
//! let settings = AjaxSettings::from_file("eventwire.toml")?;
//!
//! let mut page = Page::new();
//! let list = page.add(ComponentId::PAGE, "list")?;
//! page.add_behavior(list, EventDelegatingBehavior::new("click")?)?;
//!
//! let row = page.add(list, "row")?;
//! page.add_behavior(row, AjaxEventBehavior::new("click", move |target| {
//!     target.add(row);
//! })?)?;
//!
//! // One consolidated listener on the list instead of one per row
//! let head = render_head(&page, &settings)?;
//! println!("{}", head.to_html(&settings));
//!
//! // Later, when the browser calls back
//! let query = format!("_listener=list%3Arow%3A0&_page={}", page.id());
//! let response = dispatch(&mut page, &query, &settings)?;
//! println!("{}", response.to_json()?);
//! ```

pub mod core;
#[cfg(feature = "pages")]
pub mod pages;

pub use eventwire_core::{AjaxSettings, EventwireError, Result};

#[cfg(feature = "pages")]
pub use eventwire_pages::{Page, SharedPage, dispatch, render_head};

pub mod prelude {
	pub use eventwire_core::{
		AjaxSettings, EventwireError, HeaderItem, HeaderResponse, MetaDataKey, PageParameters,
		Result,
	};

	#[cfg(feature = "pages")]
	pub use eventwire_pages::{
		AjaxEventBehavior, AjaxRequestAttributes, AjaxRequestTarget, AjaxResponse, ComponentId,
		EventDelegatingBehavior, EventPropagation, Method, Page, Resolution, SharedPage, Throttling,
		callback_url, dispatch, render_head,
	};
}
