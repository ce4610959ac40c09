//! Responsive layout rules
//!
//! The page has a single breakpoint. At and below it the sidebar is an
//! overlay toggled by the hamburger button; at and above it the sidebar is
//! a column with a drag handle. Both comparisons are inclusive, so a
//! viewport of exactly the breakpoint width is mobile *and* resizable.

use crate::consts::{MOBILE_BREAKPOINT_PX, SIDEBAR_MAX_WIDTH_PX, SIDEBAR_MIN_WIDTH_PX};

/// Overlay-sidebar viewports: hamburger shown, close button shown, sidebar
/// auto-closes after an episode is chosen
#[inline]
pub fn is_mobile(viewport_width: i32) -> bool {
    viewport_width <= MOBILE_BREAKPOINT_PX
}

/// Viewports where the drag handle is visible and drags are honored
#[inline]
pub fn resizer_enabled(viewport_width: i32) -> bool {
    viewport_width >= MOBILE_BREAKPOINT_PX
}

/// Clamp a candidate sidebar width to the drag bounds
#[inline]
pub fn clamp_sidebar_width(width: i32) -> i32 {
    width.clamp(SIDEBAR_MIN_WIDTH_PX, SIDEBAR_MAX_WIDTH_PX)
}

/// An in-flight sidebar drag, armed on resizer mousedown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarDrag {
    /// Pointer X at mousedown (clientX)
    pub start_x: i32,
    /// Rendered sidebar width at mousedown (offsetWidth)
    pub start_width: i32,
}

impl SidebarDrag {
    /// Width the sidebar should take with the pointer at `x`
    pub fn width_at(&self, x: i32) -> i32 {
        clamp_sidebar_width(self.start_width + (x - self.start_x))
    }
}
