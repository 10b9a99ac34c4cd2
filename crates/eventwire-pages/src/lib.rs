//! # Eventwire Pages
//!
//! Server-side component trees whose behaviors wire client events to AJAX
//! callbacks.
//!
//! ## Modules
//!
//! - [`page`]: [`Page`], the component arena and its per-page state
//! - [`component`]: [`Component`] nodes and [`ComponentId`] handles
//! - [`behavior`]: [`AjaxEventBehavior`] and [`EventDelegatingBehavior`]
//! - [`attributes`]: [`AjaxRequestAttributes`] sent to the client library
//! - [`resolver`]: direct versus delegated listener resolution
//! - [`render`]: head rendering for a whole page
//! - [`listener`]: callback URLs and dispatch of fired events
//! - [`target`]: [`AjaxRequestTarget`] and the encoded [`AjaxResponse`]
//! - [`shared`]: [`SharedPage`] for concurrent request handlers
//!
//! ## Event delegation
//!
//! A list with hundreds of clickable rows does not need hundreds of
//! listeners. Attach an [`EventDelegatingBehavior`] to the list, and every
//! descendant [`AjaxEventBehavior`] for the same event hands its listener
//! configuration to the list instead of rendering its own script:
//!
//! ```ignore
//! use eventwire_core::AjaxSettings;
//! use eventwire_pages::{AjaxEventBehavior, ComponentId, EventDelegatingBehavior, Page, render_head};
//!
//! let mut page = Page::new();
//! let list = page.add(ComponentId::PAGE, "list")?;
//! page.add_behavior(list, EventDelegatingBehavior::new("click")?)?;
//!
//! for row in 0..100 {
//!     let item = page.add(list, format!("row{}", row))?;
//!     page.add_behavior(item, AjaxEventBehavior::new("click", move |target| {
//!         target.append_javascript(format!("selected({});", row));
//!     })?)?;
//! }
//!
//! let head = render_head(&page, &AjaxSettings::default())?;
//! assert_eq!(head.response.len(), 1);
//! ```

pub mod attributes;
pub mod behavior;
pub mod component;
mod delegate;
mod event;
pub mod listener;
pub mod page;
pub mod render;
pub mod resolver;
pub mod shared;
pub mod target;

pub use attributes::{AjaxRequestAttributes, EventPropagation, Method, Throttling};
pub use behavior::{
	AjaxEventBehavior, Behavior, BehaviorKind, Contribution, EventDelegatingBehavior, EventHandler,
	normalize_event,
};
pub use component::{Component, ComponentId};
pub use delegate::{Contributions, DelegationTarget};
pub use listener::{ListenerPath, callback_url, dispatch};
pub use page::{Ancestors, DelegatedEvents, PATH_SEPARATOR, Page};
pub use render::{RenderedHead, ResolvedListener, render_head};
pub use resolver::{RenderContext, Resolution, find_delegating_ancestor, resolve_and_render};
pub use shared::SharedPage;
pub use target::{AjaxRequestTarget, AjaxResponse};
