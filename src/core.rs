//! Settings, errors and per-page data shared by all eventwire crates
//!
//! ## Example
//!
//! ```rust,ignore
//! use eventwire::core::{AjaxSettings, MetaDataKey, PageParameters};
//!
//! let settings = AjaxSettings::new().js_namespace("Shop").delegation(false);
//! let parameters = PageParameters::from_query_str("counter=2")?;
//! assert_eq!(parameters.get_parsed::<u32>("counter"), Some(2));
//! ```

pub use eventwire_core::*;
