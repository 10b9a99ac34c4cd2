//! A page shared between request handlers.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use eventwire_core::{AjaxSettings, Result};

use crate::listener::dispatch;
use crate::page::Page;
use crate::render::{RenderedHead, render_head};
use crate::target::AjaxResponse;

/// Thread-safe handle to a [`Page`].
///
/// Renders take a read lock and may run concurrently; tree changes and
/// listener dispatch take the write lock.
#[derive(Debug, Clone)]
pub struct SharedPage {
	inner: Arc<RwLock<Page>>,
}

impl SharedPage {
	/// Wraps a page.
	pub fn new(page: Page) -> Self {
		Self {
			inner: Arc::new(RwLock::new(page)),
		}
	}

	/// Locks the page for reading.
	pub fn read(&self) -> RwLockReadGuard<'_, Page> {
		self.inner.read()
	}

	/// Locks the page for writing.
	pub fn write(&self) -> RwLockWriteGuard<'_, Page> {
		self.inner.write()
	}

	/// Runs `f` with exclusive access, e.g. to add components or behaviors.
	pub fn register<R, F>(&self, f: F) -> Result<R>
	where
		F: FnOnce(&mut Page) -> Result<R>,
	{
		let mut page = self.inner.write();
		f(&mut page)
	}

	/// Renders the page head under a read lock.
	pub fn render_head(&self, settings: &AjaxSettings) -> Result<RenderedHead> {
		render_head(&self.inner.read(), settings)
	}

	/// Dispatches a listener request under the write lock.
	pub fn dispatch(&self, query: &str, settings: &AjaxSettings) -> Result<AjaxResponse> {
		dispatch(&mut self.inner.write(), query, settings)
	}
}

impl From<Page> for SharedPage {
	fn from(page: Page) -> Self {
		Self::new(page)
	}
}
