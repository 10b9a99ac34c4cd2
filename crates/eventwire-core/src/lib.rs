//! # Eventwire Core
//!
//! Infrastructure shared by the eventwire component model:
//!
//! - [`error`]: the [`EventwireError`] type and [`Result`] alias
//! - [`settings`]: [`AjaxSettings`], loadable from TOML
//! - [`metadata`]: typed per-page metadata ([`MetaDataKey`], [`MetaDataMap`])
//! - [`parameters`]: [`PageParameters`] carried in stateless URLs
//! - [`header`]: [`HeaderResponse`] collecting head scripts for one response

pub mod error;
pub mod header;
pub mod metadata;
pub mod parameters;
pub mod settings;

pub use error::{EventwireError, Result};
pub use header::{HeaderItem, HeaderResponse, escape_script};
pub use metadata::{MetaDataKey, MetaDataMap};
pub use parameters::PageParameters;
pub use settings::AjaxSettings;
