//! In-memory viewport that is resized by calling [`SimulatedViewport::resize`].
//!
//! Media queries are evaluated with [`Classify`], so this host always agrees
//! with the pure classification rules. Clones share the same state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::breakpoints::BreakpointTable;
use crate::host::{MediaListener, MediaMatch, ResizeListener, Subscription, ViewportError, ViewportHost};
use crate::query::{Classify, MediaQuery};

new_key_type! {
    struct ListenerKey;
}

enum Listener {
    Resize(ResizeListener),
    Media {
        query: MediaQuery,
        table: BreakpointTable,
        matches: Rc<Cell<bool>>,
        callback: MediaListener,
    },
}

struct State {
    width: f64,
    listeners: SlotMap<ListenerKey, Listener>,
    registered: usize,
    removed: usize,
    reject_media_queries: bool,
}

#[derive(Clone)]
pub struct SimulatedViewport {
    state: Rc<RefCell<State>>,
}

impl SimulatedViewport {
    pub fn new(width: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                width,
                listeners: SlotMap::with_key(),
                registered: 0,
                removed: 0,
                reject_media_queries: false,
            })),
        }
    }

    /// A host without `matchMedia` support; every media query is rejected.
    pub fn without_media_queries(width: f64) -> Self {
        let viewport = Self::new(width);
        viewport.state.borrow_mut().reject_media_queries = true;
        viewport
    }

    /// Set the width and notify listeners. Resize listeners fire on every call,
    /// media listeners only when their match state flips.
    pub fn resize(&self, width: f64) {
        let mut resize = Vec::new();
        let mut flipped = Vec::new();
        {
            let mut state = self.state.borrow_mut();
            state.width = width;
            for listener in state.listeners.values() {
                match listener {
                    Listener::Resize(callback) => resize.push(callback.clone()),
                    Listener::Media {
                        query,
                        table,
                        matches,
                        callback,
                    } => {
                        let now = query.classify(width, table);
                        if matches.replace(now) != now {
                            flipped.push((callback.clone(), now));
                        }
                    }
                }
            }
        }

        // Callbacks may subscribe or unsubscribe, so the state is not borrowed here.
        for callback in resize {
            callback(width);
        }
        for (callback, now) in flipped {
            callback(now);
        }
    }

    /// Listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Total registrations since creation.
    pub fn registered(&self) -> usize {
        self.state.borrow().registered
    }

    /// Total removals since creation.
    pub fn removed(&self) -> usize {
        self.state.borrow().removed
    }

    fn register(&self, listener: Listener) -> Subscription {
        let key = {
            let mut state = self.state.borrow_mut();
            state.registered += 1;
            state.listeners.insert(listener)
        };
        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                let mut state = state.borrow_mut();
                if state.listeners.remove(key).is_some() {
                    state.removed += 1;
                }
            }
        })
    }
}

impl ViewportHost for SimulatedViewport {
    fn width(&self) -> f64 {
        self.state.borrow().width
    }

    fn listen_resize(&self, listener: ResizeListener) -> Subscription {
        self.register(Listener::Resize(listener))
    }

    fn match_media(
        &self,
        query: MediaQuery,
        table: &BreakpointTable,
        listener: MediaListener,
    ) -> Result<MediaMatch, ViewportError> {
        if self.state.borrow().reject_media_queries {
            return Err(ViewportError::MediaQuery {
                query: query.to_css(table),
                reason: "media queries are not supported by this viewport".to_string(),
            });
        }

        let matches = query.classify(self.width(), table);
        let subscription = self.register(Listener::Media {
            query,
            table: *table,
            matches: Rc::new(Cell::new(matches)),
            callback: listener,
        });
        Ok(MediaMatch {
            matches,
            subscription,
        })
    }
}
