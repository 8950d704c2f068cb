//! `window`-backed viewport for wasm builds.

use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::MediaQueryListEvent;

use crate::breakpoints::BreakpointTable;
use crate::host::{MediaListener, MediaMatch, ResizeListener, Subscription, ViewportError, ViewportHost};
use crate::query::MediaQuery;

#[derive(Clone, Debug)]
pub struct BrowserViewport {
    window: web_sys::Window,
}

impl BrowserViewport {
    pub fn new() -> Result<Self, ViewportError> {
        web_sys::window()
            .map(|window| Self { window })
            .ok_or(ViewportError::NoWindow)
    }
}

fn inner_width(window: &web_sys::Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

impl ViewportHost for BrowserViewport {
    fn width(&self) -> f64 {
        inner_width(&self.window)
    }

    fn listen_resize(&self, listener: ResizeListener) -> Subscription {
        let window = self.window.clone();
        let handle = window_event_listener(leptos::ev::resize, move |_| {
            listener(inner_width(&window));
        });
        Subscription::new(move || handle.remove())
    }

    fn match_media(
        &self,
        query: MediaQuery,
        table: &BreakpointTable,
        listener: MediaListener,
    ) -> Result<MediaMatch, ViewportError> {
        let css = query.to_css(table);
        let rejected = |reason: String| ViewportError::MediaQuery {
            query: css.clone(),
            reason,
        };

        let list = self
            .window
            .match_media(&css)
            .map_err(|e| rejected(format!("{e:?}")))?
            .ok_or_else(|| rejected("matchMedia returned null".to_string()))?;

        let on_change = Closure::<dyn Fn(MediaQueryListEvent)>::new(move |ev: MediaQueryListEvent| {
            listener(ev.matches());
        });
        list.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
            .map_err(|e| rejected(format!("{e:?}")))?;

        let matches = list.matches();
        let subscription = Subscription::new(move || {
            if let Err(e) =
                list.remove_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove media query listener: {e:?}");
            }
        });

        Ok(MediaMatch {
            matches,
            subscription,
        })
    }
}
