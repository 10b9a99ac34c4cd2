//! Component trees with AJAX event behaviors
//!
//! See [`eventwire_pages`] for the delegation model.
//!
//! ## Example
//!
//! ```rust,ignore
//! use eventwire::pages::{AjaxEventBehavior, ComponentId, Page};
//!
//! let mut page = Page::new();
//! let select = page.add(ComponentId::PAGE, "select")?;
//! page.add_behavior(
//!     select,
//!     AjaxEventBehavior::new("onchange", |target| {
//!         let value = target.parameters().get("select").unwrap_or_default().to_string();
//!         target.append_javascript(format!("selected({:?});", value));
//!     })?
//!     .stateless(true),
//! )?;
//! ```

// Re-export all eventwire-pages functionality
pub use eventwire_pages::*;
