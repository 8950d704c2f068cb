//! The display environment a classifier listens to.

use std::rc::Rc;

use crate::breakpoints::BreakpointTable;
use crate::query::MediaQuery;

#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("no browser window is available")]
    NoWindow,
    #[error("media query `{query}` was rejected: {reason}")]
    MediaQuery { query: String, reason: String },
}

/// Called with the new viewport width after every resize.
pub type ResizeListener = Rc<dyn Fn(f64)>;
/// Called with the new match state whenever a media query flips.
pub type MediaListener = Rc<dyn Fn(bool)>;

/// A registered listener. Dropping it (or calling [`Subscription::release`])
/// removes the listener from the host, exactly once.
#[must_use = "dropping a Subscription removes its listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Result of subscribing to a media query: the state at subscription time and
/// the handle keeping the `change` listener alive.
#[derive(Debug)]
pub struct MediaMatch {
    pub matches: bool,
    pub subscription: Subscription,
}

pub trait ViewportHost {
    /// Current viewport width in CSS pixels.
    fn width(&self) -> f64;

    fn listen_resize(&self, listener: ResizeListener) -> Subscription;

    fn match_media(
        &self,
        query: MediaQuery,
        table: &BreakpointTable,
        listener: MediaListener,
    ) -> Result<MediaMatch, ViewportError>;
}

impl<H: ViewportHost + ?Sized> ViewportHost for Rc<H> {
    fn width(&self) -> f64 {
        (**self).width()
    }

    fn listen_resize(&self, listener: ResizeListener) -> Subscription {
        (**self).listen_resize(listener)
    }

    fn match_media(
        &self,
        query: MediaQuery,
        table: &BreakpointTable,
        listener: MediaListener,
    ) -> Result<MediaMatch, ViewportError> {
        (**self).match_media(query, table, listener)
    }
}
