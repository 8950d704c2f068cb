//! Hooks for use inside Leptos components.
//!
//! Each hook mounts a [`ViewportClassifier`] and removes its listener when the
//! current reactive owner is cleaned up, e.g. when the component unmounts.
//!
//! Called outside any reactive owner there is nothing to tie the listener to,
//! so it stays registered for the life of the page. Code running outside a
//! component should use [`ViewportClassifier::mount`] and keep the returned
//! classifier, which removes its listener when dropped.

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use crate::breakpoints::BreakpointTable;
use crate::classifier::{Strategy, ViewportClassifier};
use crate::host::ViewportHost;
use crate::query::MediaQuery;

/// Mount a classifier for `query` and return its live value.
///
/// The listener is removed on cleanup of the current reactive owner. Without
/// an owner it is never removed; see the module docs.
pub fn use_viewport_query(
    host: &dyn ViewportHost,
    table: BreakpointTable,
    query: MediaQuery,
    strategy: Strategy,
) -> ReadSignal<bool> {
    let classifier = ViewportClassifier::mount(host, table, query, strategy);
    let matches = classifier.signal();

    if Owner::current().is_some() {
        let classifier = SendWrapper::new(classifier);
        on_cleanup(move || classifier.take().unmount());
    } else {
        log::warn!("{query:?} hook used outside a reactive owner, its listener will never be removed");
        std::mem::forget(classifier);
    }

    matches
}

/// `true` while the viewport is narrower than `sm`, driven by resize events.
///
/// Reads `false` until the first resize, whatever the width at mount.
pub fn use_is_mobile_by_tracking_resize(
    host: &dyn ViewportHost,
    table: BreakpointTable,
) -> ReadSignal<bool> {
    use_viewport_query(host, table, MediaQuery::MOBILE, Strategy::TrackResize)
}

/// `true` while the viewport is narrower than `sm`, driven by `matchMedia`.
pub fn use_is_mobile_by_media_query(
    host: &dyn ViewportHost,
    table: BreakpointTable,
) -> ReadSignal<bool> {
    use_viewport_query(host, table, MediaQuery::MOBILE, Strategy::MediaQuery)
}

/// `true` while the viewport is at least `md` wide.
pub fn use_is_wide_screen(host: &dyn ViewportHost, table: BreakpointTable) -> ReadSignal<bool> {
    use_viewport_query(host, table, MediaQuery::WIDE_SCREEN, Strategy::MediaQuery)
}

pub use self::use_is_mobile_by_media_query as use_is_mobile;
