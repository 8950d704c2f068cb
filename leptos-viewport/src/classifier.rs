//! A live boolean view of a [`MediaQuery`] over a [`ViewportHost`].

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::breakpoints::BreakpointTable;
use crate::host::{Subscription, ViewportHost};
use crate::query::{Classify, MediaQuery};

/// How a classifier keeps itself up to date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Recompute on every resize notification. Starts out `false` and stays
    /// so until the first resize, even if the viewport already matches.
    TrackResize,
    /// Like [`Strategy::TrackResize`], but classifies the current width at mount.
    TrackResizeEager,
    /// Subscribe to the host's media query change notification.
    #[default]
    MediaQuery,
}

/// Owns the listener that keeps `matches` current. The listener is removed
/// when the classifier is dropped or [`unmount`](Self::unmount)ed.
#[derive(Debug)]
pub struct ViewportClassifier {
    query: MediaQuery,
    strategy: Strategy,
    matches: RwSignal<bool>,
    changes: Rc<Cell<usize>>,
    subscription: Subscription,
}

impl ViewportClassifier {
    pub fn mount(
        host: &dyn ViewportHost,
        table: BreakpointTable,
        query: MediaQuery,
        strategy: Strategy,
    ) -> Self {
        let changes = Rc::new(Cell::new(0));
        let (matches, subscription) = match strategy {
            Strategy::TrackResize => track_resize(host, table, query, false, changes.clone()),
            Strategy::TrackResizeEager => {
                track_resize(host, table, query, true, changes.clone())
            }
            Strategy::MediaQuery => {
                let matches = RwSignal::new(false);
                let listener = {
                    let changes = changes.clone();
                    Rc::new(move |now: bool| publish(matches, query, now, &changes))
                };
                match host.match_media(query, &table, listener) {
                    Ok(media) => {
                        matches.set(media.matches);
                        (matches, media.subscription)
                    }
                    Err(e) => {
                        log::warn!("{e}; falling back to resize tracking for {query:?}");
                        matches.dispose();
                        track_resize(host, table, query, true, changes.clone())
                    }
                }
            }
        };

        log::debug!(
            "mounted {strategy:?} classifier for {query:?}, matches={}",
            matches.get_untracked()
        );

        Self {
            query,
            strategy,
            matches,
            changes,
            subscription,
        }
    }

    /// Tracked read, for use inside reactive closures.
    pub fn get(&self) -> bool {
        self.matches.get()
    }

    pub fn get_untracked(&self) -> bool {
        self.matches.get_untracked()
    }

    pub fn signal(&self) -> ReadSignal<bool> {
        self.matches.read_only()
    }

    /// How many times the published value has changed since mount.
    pub fn changes(&self) -> usize {
        self.changes.get()
    }

    pub fn query(&self) -> MediaQuery {
        self.query
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Remove the listener now. The last published value stays readable
    /// through signals handed out earlier.
    pub fn unmount(self) {
        log::debug!("unmounting {:?} classifier for {:?}", self.strategy, self.query);
        self.subscription.release();
    }
}

fn track_resize(
    host: &dyn ViewportHost,
    table: BreakpointTable,
    query: MediaQuery,
    eager: bool,
    changes: Rc<Cell<usize>>,
) -> (RwSignal<bool>, Subscription) {
    let initial = eager && query.classify(host.width(), &table);
    let matches = RwSignal::new(initial);
    let subscription = host.listen_resize(Rc::new(move |width: f64| {
        publish(matches, query, query.classify(width, &table), &changes);
    }));
    (matches, subscription)
}

// Only writes on change so subscribers see one update per flip.
fn publish(matches: RwSignal<bool>, query: MediaQuery, now: bool, changes: &Cell<usize>) {
    match matches.try_get_untracked() {
        Some(prev) if prev != now => {
            log::debug!("{query:?} now {now}");
            changes.set(changes.get() + 1);
            matches.set(now);
        }
        Some(_) => {}
        None => log::debug!("{query:?} changed after its signal was disposed"),
    }
}
