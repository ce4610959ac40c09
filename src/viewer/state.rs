//! Viewer state and course catalog types
//!
//! Everything the page tracks between events lives here: the episode
//! cursor, per-episode progress flags, chapter collapse flags, and the
//! sidebar's open/width/drag state. All of it is ephemeral - a reload
//! starts over from whatever the pre-rendered document carries.

use super::layout::{self, SidebarDrag};

/// How an episode's main-panel content is sourced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Embedded player iframe (`data-content-src`)
    Video,
    /// Inline template HTML copied into the panel (`data-content-id`)
    Text,
    /// Unrecognized `data-content-type`; renders an empty panel
    Other,
}

impl ContentKind {
    /// Parse a `data-content-type` attribute value
    pub fn parse(raw: &str) -> Self {
        match raw {
            "video" => Self::Video,
            "text" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// One sidebar entry, read off a `.episode` node at startup
#[derive(Debug, Clone)]
pub struct Episode {
    /// Title from the entry's `<h3>`, empty when the node has none
    pub title: String,
    pub kind: ContentKind,
    /// Embed URL for video episodes (`data-content-src`)
    pub content_src: Option<String>,
    /// Id of the inline template for text episodes (`data-content-id`)
    pub content_id: Option<String>,
    /// Id of the notes template shown under a video (`data-notes-id`)
    pub notes_id: Option<String>,
    /// Blurb shown under the video title (`data-description`)
    pub description: String,
    /// Target for the download button (`data-resource-url`)
    pub resource_url: Option<String>,
    /// Mirrors the node's `completed` class
    pub completed: bool,
    /// Mirrors the node's `bookmarked` class
    pub bookmarked: bool,
}

impl Episode {
    /// Video episode with no extras; handy for tests and the native run
    pub fn video(title: &str, content_src: &str) -> Self {
        Self {
            title: title.to_string(),
            kind: ContentKind::Video,
            content_src: Some(content_src.to_string()),
            content_id: None,
            notes_id: None,
            description: String::new(),
            resource_url: None,
            completed: false,
            bookmarked: false,
        }
    }

    /// Text episode backed by an inline template
    pub fn text(title: &str, content_id: &str) -> Self {
        Self {
            title: title.to_string(),
            kind: ContentKind::Text,
            content_src: None,
            content_id: Some(content_id.to_string()),
            notes_id: None,
            description: String::new(),
            resource_url: None,
            completed: false,
            bookmarked: false,
        }
    }
}

/// One collapsible sidebar section, read off a `.chapter` node at startup
#[derive(Debug, Clone)]
pub struct Chapter {
    /// Header text, kept for logging
    pub title: String,
    /// Mirrors the node's `open` class
    pub open: bool,
}

/// Sidebar open/width/drag state
#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    /// Mirrors the sidebar's `open` class
    pub open: bool,
    /// Inline width override from drag-resizing; `None` defers to the
    /// stylesheet
    pub width: Option<i32>,
    /// Active drag, armed on resizer mousedown and cleared on mouseup
    pub drag: Option<SidebarDrag>,
}

/// Complete viewer state
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub chapters: Vec<Chapter>,
    pub episodes: Vec<Episode>,
    /// Cursor into `episodes`; meaningful only while episodes exist
    pub current: usize,
    /// Last observed viewport width (CSS px)
    pub viewport_width: i32,
    pub sidebar: SidebarState,
}

impl ViewerState {
    /// Build the state for a freshly loaded page. The sidebar starts open
    /// or closed according to the viewport, like every later resize.
    pub fn new(chapters: Vec<Chapter>, episodes: Vec<Episode>, viewport_width: i32) -> Self {
        let mut state = Self {
            chapters,
            episodes,
            current: 0,
            viewport_width,
            sidebar: SidebarState::default(),
        };
        state.apply_viewport(viewport_width);
        state
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Episode under the cursor
    pub fn current_episode(&self) -> Option<&Episode> {
        self.episodes.get(self.current)
    }

    /// Move the cursor. Returns `false` when `index` is out of range.
    /// Re-selecting the current episode is allowed and reloads the panel.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.episodes.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Cursor sits on the first episode (the Previous button disables)
    pub fn at_first(&self) -> bool {
        self.current == 0
    }

    /// Cursor sits on the last episode (the Next button disables)
    pub fn at_last(&self) -> bool {
        self.episodes.is_empty() || self.current == self.episodes.len() - 1
    }

    /// Step the cursor back; returns whether it moved
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Step the cursor forward; returns whether it moved
    pub fn next(&mut self) -> bool {
        if self.at_last() {
            false
        } else {
            self.current += 1;
            true
        }
    }

    /// Flip the current episode's completion flag
    pub fn toggle_completed(&mut self) {
        if let Some(episode) = self.episodes.get_mut(self.current) {
            episode.completed = !episode.completed;
        }
    }

    /// Flip the current episode's bookmark flag
    pub fn toggle_bookmarked(&mut self) {
        self.toggle_bookmark_at(self.current);
    }

    /// Flip any episode's bookmark flag (sidebar icon clicks land here)
    pub fn toggle_bookmark_at(&mut self, index: usize) {
        if let Some(episode) = self.episodes.get_mut(index) {
            episode.bookmarked = !episode.bookmarked;
        }
    }

    /// Flip a chapter's collapse flag
    pub fn toggle_chapter(&mut self, index: usize) {
        if let Some(chapter) = self.chapters.get_mut(index) {
            chapter.open = !chapter.open;
        }
    }

    pub fn is_mobile(&self) -> bool {
        layout::is_mobile(self.viewport_width)
    }

    pub fn resizer_enabled(&self) -> bool {
        layout::resizer_enabled(self.viewport_width)
    }

    /// Record a new viewport width and re-derive the responsive defaults:
    /// the sidebar is forced closed on mobile and open on desktop, and the
    /// drag width override is dropped once the resizer is disabled. An
    /// armed drag survives; its movement is just ignored until mouseup.
    pub fn apply_viewport(&mut self, width: i32) {
        self.viewport_width = width;
        self.sidebar.open = !self.is_mobile();
        if !self.resizer_enabled() {
            self.sidebar.width = None;
        }
    }

    /// Hamburger button
    pub fn open_sidebar(&mut self) {
        self.sidebar.open = true;
    }

    /// Close button
    pub fn close_sidebar(&mut self) {
        self.sidebar.open = false;
    }

    /// After choosing an episode the sidebar gets out of the way on mobile
    pub fn close_sidebar_if_mobile(&mut self) {
        if self.is_mobile() {
            self.sidebar.open = false;
        }
    }

    /// Arm a drag from the resizer handle. `start_width` is the sidebar's
    /// rendered width at mousedown. Returns `false` (and arms nothing)
    /// while the resizer is disabled.
    pub fn begin_resize(&mut self, start_x: i32, start_width: i32) -> bool {
        if !self.resizer_enabled() {
            return false;
        }
        self.sidebar.drag = Some(SidebarDrag {
            start_x,
            start_width,
        });
        true
    }

    /// Apply a mousemove at pointer position `x`. Returns the new clamped
    /// width when a drag is armed and the resizer still enabled; `None`
    /// otherwise.
    pub fn resize_to(&mut self, x: i32) -> Option<i32> {
        if !self.resizer_enabled() {
            return None;
        }
        let drag = self.sidebar.drag?;
        let width = drag.width_at(x);
        self.sidebar.width = Some(width);
        Some(width)
    }

    /// Disarm the drag on mouseup. Returns whether one was active, so the
    /// caller knows to restore the document cursor.
    pub fn end_resize(&mut self) -> bool {
        self.sidebar.drag.take().is_some()
    }

    pub fn resizing(&self) -> bool {
        self.sidebar.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_episodes() -> ViewerState {
        ViewerState::new(
            vec![Chapter {
                title: "Basics".to_string(),
                open: true,
            }],
            vec![
                Episode::video("Intro", "https://player.example/embed/1"),
                Episode::text("Reading", "reading-content"),
                Episode::video("Outro", "https://player.example/embed/2"),
            ],
            1280,
        )
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = three_episodes();
        assert!(state.at_first());
        assert!(!state.prev());
        assert_eq!(state.current, 0);

        assert!(state.next());
        assert!(state.next());
        assert!(state.at_last());
        assert!(!state.next());
        assert_eq!(state.current, 2);

        assert!(state.prev());
        assert_eq!(state.current, 1);
        assert!(!state.at_first());
        assert!(!state.at_last());
    }

    #[test]
    fn test_select_rejects_out_of_range() {
        let mut state = three_episodes();
        assert!(!state.select(3));
        assert_eq!(state.current, 0);

        assert!(state.select(2));
        assert_eq!(state.current, 2);

        // Re-selecting the current episode succeeds (panel reload)
        assert!(state.select(2));
    }

    #[test]
    fn test_empty_catalog_is_inert() {
        let mut state = ViewerState::new(Vec::new(), Vec::new(), 1280);
        assert!(state.is_empty());
        assert!(state.current_episode().is_none());
        assert!(state.at_first());
        assert!(state.at_last());
        assert!(!state.next());
        assert!(!state.prev());
        assert!(!state.select(0));
        // Flag toggles must not panic with nothing under the cursor
        state.toggle_completed();
        state.toggle_bookmarked();
    }

    #[test]
    fn test_completion_and_bookmark_toggles() {
        let mut state = three_episodes();
        state.toggle_completed();
        assert!(state.current_episode().is_some_and(|ep| ep.completed));
        state.toggle_completed();
        assert!(state.current_episode().is_some_and(|ep| !ep.completed));

        state.toggle_bookmarked();
        assert!(state.current_episode().is_some_and(|ep| ep.bookmarked));

        // Bookmarking another entry leaves the current one alone
        state.toggle_bookmark_at(2);
        assert!(state.episodes[2].bookmarked);
        assert!(state.episodes[0].bookmarked);
        assert!(!state.episodes[1].bookmarked);
    }

    #[test]
    fn test_chapter_toggle() {
        let mut state = three_episodes();
        assert!(state.chapters[0].open);
        state.toggle_chapter(0);
        assert!(!state.chapters[0].open);
        state.toggle_chapter(0);
        assert!(state.chapters[0].open);
        // Out-of-range chapter index is ignored
        state.toggle_chapter(5);
    }

    #[test]
    fn test_viewport_drives_sidebar_default() {
        let mut state = three_episodes();
        assert!(state.sidebar.open, "desktop starts with the sidebar open");

        state.apply_viewport(480);
        assert!(!state.sidebar.open, "mobile starts with the sidebar closed");
        assert!(state.is_mobile());
        assert!(!state.resizer_enabled());

        state.apply_viewport(1024);
        assert!(state.sidebar.open);
    }

    #[test]
    fn test_mobile_start_is_closed() {
        let state = ViewerState::new(Vec::new(), vec![Episode::text("A", "a")], 375);
        assert!(!state.sidebar.open);
    }

    #[test]
    fn test_hamburger_open_survives_until_next_resize() {
        let mut state = three_episodes();
        state.apply_viewport(480);
        state.open_sidebar();
        assert!(state.sidebar.open);

        // Any resize re-derives the default and closes it again
        state.apply_viewport(481);
        assert!(!state.sidebar.open);
    }

    #[test]
    fn test_close_sidebar_only_on_mobile_after_selection() {
        let mut state = three_episodes();
        state.select(1);
        state.close_sidebar_if_mobile();
        assert!(state.sidebar.open, "desktop keeps the sidebar open");

        state.apply_viewport(480);
        state.open_sidebar();
        state.select(2);
        state.close_sidebar_if_mobile();
        assert!(!state.sidebar.open);
    }

    #[test]
    fn test_resize_drag_flow() {
        let mut state = three_episodes();
        assert!(state.begin_resize(400, 300));
        assert!(state.resizing());

        assert_eq!(state.resize_to(500), Some(400));
        assert_eq!(state.sidebar.width, Some(400));
        assert_eq!(state.resize_to(-1000), Some(180));

        assert!(state.end_resize());
        assert!(!state.resizing());
        assert!(!state.end_resize(), "second mouseup is a no-op");
        // The dragged width sticks after the drag ends
        assert_eq!(state.sidebar.width, Some(180));
    }

    #[test]
    fn test_drag_ignored_on_mobile() {
        let mut state = three_episodes();
        state.apply_viewport(500);
        assert!(!state.begin_resize(400, 300));
        assert_eq!(state.resize_to(500), None);
        assert!(!state.end_resize());
    }

    #[test]
    fn test_armed_drag_survives_shrinking_viewport() {
        let mut state = three_episodes();
        assert!(state.begin_resize(400, 300));
        assert_eq!(state.resize_to(450), Some(350));

        // Window shrinks below the breakpoint mid-drag: movement is
        // ignored and the override dropped, but mouseup still disarms
        state.apply_viewport(500);
        assert_eq!(state.sidebar.width, None);
        assert_eq!(state.resize_to(460), None);
        assert!(state.end_resize());
    }

    #[test]
    fn test_width_override_kept_across_desktop_resizes() {
        let mut state = three_episodes();
        state.begin_resize(400, 300);
        state.resize_to(500);
        state.end_resize();

        state.apply_viewport(1400);
        assert_eq!(state.sidebar.width, Some(400));

        state.apply_viewport(700);
        assert_eq!(state.sidebar.width, None);
    }

    #[test]
    fn test_content_kind_parse() {
        assert_eq!(ContentKind::parse("video"), ContentKind::Video);
        assert_eq!(ContentKind::parse("text"), ContentKind::Text);
        assert_eq!(ContentKind::parse("quiz"), ContentKind::Other);
        assert_eq!(ContentKind::parse(""), ContentKind::Other);
    }
}
