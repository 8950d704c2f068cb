//! Leptos Viewport Utilities
//!
//! Tells whether the viewport is mobile-sized or wide-screen-sized, given an
//! explicit breakpoint table. Two strategies keep the answer current: a
//! `resize` listener, or a `matchMedia` subscription (the default).
//!
//! ```ignore
//! let viewport = BrowserViewport::new()?;
//! let is_mobile = use_is_mobile(&viewport, BreakpointTable::default());
//! view! { <Show when=move || !is_mobile.get()><Sidebar/></Show> }
//! ```

pub mod breakpoints;
pub mod browser;
pub mod classifier;
pub mod hooks;
pub mod host;
pub mod query;
pub mod simulated;

pub use breakpoints::{Breakpoint, BreakpointError, BreakpointTable};
pub use browser::BrowserViewport;
pub use classifier::{Strategy, ViewportClassifier};
pub use hooks::{
    use_is_mobile, use_is_mobile_by_media_query, use_is_mobile_by_tracking_resize,
    use_is_wide_screen, use_viewport_query,
};
pub use host::{MediaMatch, Subscription, ViewportError, ViewportHost};
pub use query::{Classify, MediaQuery};
pub use simulated::SimulatedViewport;
