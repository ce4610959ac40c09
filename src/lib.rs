//! Courseview - sidebar course navigation and episode player
//!
//! Core modules:
//! - `viewer`: Pure viewer state (catalog, episode cursor, progress flags, sidebar layout)
//! - `markup`: HTML fragments injected into the main content panel
//!
//! The course page itself is pre-rendered; this crate only wires its events
//! and toggles its classes. All decision logic stays in `viewer` so it can
//! be tested natively, and the wasm binary (`src/main.rs`) is a thin layer
//! of `web-sys` listeners and class writes on top of it.

pub mod markup;
pub mod viewer;

pub use viewer::{Chapter, ContentKind, Episode, SidebarDrag, ViewerState};

/// Layout configuration constants
pub mod consts {
    /// Widest viewport (CSS px) treated as mobile. Both the mobile and the
    /// resizer checks are inclusive, so a viewport of exactly this width
    /// gets the overlay sidebar *and* a live drag handle.
    pub const MOBILE_BREAKPOINT_PX: i32 = 768;
    /// Narrowest the sidebar can be dragged
    pub const SIDEBAR_MIN_WIDTH_PX: i32 = 180;
    /// Widest the sidebar can be dragged
    pub const SIDEBAR_MAX_WIDTH_PX: i32 = 600;
}
