//! Pure viewer state module
//!
//! All navigation and layout decisions live here. This module must stay
//! platform-free:
//! - No DOM types or wasm imports
//! - Plain integer pixel math
//! - Fully testable on the host
//!
//! The wasm glue in `main.rs` feeds events in and mirrors the state back
//! onto the page's classes and styles.

pub mod layout;
pub mod state;

pub use layout::{SidebarDrag, clamp_sidebar_width, is_mobile, resizer_enabled};
pub use state::{Chapter, ContentKind, Episode, SidebarState, ViewerState};
