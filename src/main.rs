//! Courseview entry point
//!
//! Binds the pure viewer state to the pre-rendered course page in the
//! browser build; the native build runs a short state walkthrough.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, DomTokenList, Element, HtmlAnchorElement, HtmlButtonElement, HtmlElement,
        MouseEvent, Window,
    };

    use courseview::markup;
    use courseview::viewer::{Chapter, ContentKind, Episode, ViewerState};

    // The page pulls highlight.js in from a CDN. Binding through `catch`
    // keeps a missing or blocked script from aborting the render path.
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = hljs, js_name = highlightAll)]
        fn highlight_all() -> Result<(), JsValue>;
    }

    /// Handles for one `.episode` row in the sidebar
    struct EpisodeRow {
        root: Element,
        bookmark_icon: Option<Element>,
    }

    /// Handles for one `.chapter` section in the sidebar
    struct ChapterRow {
        root: Element,
        header: Option<Element>,
        chevron: Option<Element>,
    }

    /// Fixed page chrome the viewer drives
    struct Page {
        document: Document,
        content_display: Element,
        prev_btn: HtmlButtonElement,
        next_btn: HtmlButtonElement,
        complete_btn: Element,
        bookmark_btn: Element,
        download_btn: HtmlAnchorElement,
        sidebar: HtmlElement,
        resizer: Element,
        sidebar_close_btn: HtmlElement,
        hamburger_btn: Element,
        episode_rows: Vec<EpisodeRow>,
        chapter_rows: Vec<ChapterRow>,
    }

    impl Page {
        fn new(document: &Document) -> Result<Self, JsValue> {
            let episode_rows = elements(&document.query_selector_all(".episode")?)
                .into_iter()
                .map(|root| {
                    let bookmark_icon = root.query_selector(".fa-bookmark").ok().flatten();
                    EpisodeRow {
                        root,
                        bookmark_icon,
                    }
                })
                .collect();
            let chapter_rows = elements(&document.query_selector_all(".chapter")?)
                .into_iter()
                .map(|root| {
                    let header = root.query_selector(".chapter-header").ok().flatten();
                    let chevron = header
                        .as_ref()
                        .and_then(|h| h.query_selector("i").ok().flatten());
                    ChapterRow {
                        root,
                        header,
                        chevron,
                    }
                })
                .collect();

            Ok(Self {
                document: document.clone(),
                content_display: require(document, "content-display")?,
                prev_btn: require_cast(document, "prev-btn")?,
                next_btn: require_cast(document, "next-btn")?,
                complete_btn: require(document, "complete-btn")?,
                bookmark_btn: require(document, "bookmark-btn")?,
                download_btn: require_cast(document, "download-btn")?,
                sidebar: require_cast(document, "sidebar")?,
                resizer: require(document, "sidebar-resizer")?,
                sidebar_close_btn: require_cast(document, "sidebar-close-btn")?,
                hamburger_btn: require(document, "hamburger-btn")?,
                episode_rows,
                chapter_rows,
            })
        }

        /// Inner HTML of a hidden template block, by id
        fn template_html(&self, id: &str) -> Option<String> {
            self.document.get_element_by_id(id).map(|el| el.inner_html())
        }
    }

    fn require(document: &Document, id: &str) -> Result<Element, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
    }

    fn require_cast<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        require(document, id)?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
    }

    /// Collect a NodeList into element handles
    fn elements(nodes: &web_sys::NodeList) -> Vec<Element> {
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Read one episode's metadata off its sidebar row
    fn read_episode(row: &EpisodeRow) -> Episode {
        let root = &row.root;
        let title = match root
            .query_selector("h3")
            .ok()
            .flatten()
            .and_then(|h| h.text_content())
        {
            Some(text) => text.trim().to_string(),
            None => {
                log::debug!("Episode row without an <h3> title");
                String::new()
            }
        };
        let kind = root
            .get_attribute("data-content-type")
            .map(|raw| ContentKind::parse(&raw))
            .unwrap_or(ContentKind::Other);
        let classes = root.class_list();
        Episode {
            title,
            kind,
            content_src: root.get_attribute("data-content-src"),
            content_id: root.get_attribute("data-content-id"),
            notes_id: root.get_attribute("data-notes-id"),
            description: root.get_attribute("data-description").unwrap_or_default(),
            resource_url: root.get_attribute("data-resource-url"),
            completed: classes.contains("completed"),
            bookmarked: classes.contains("bookmarked"),
        }
    }

    /// Read a chapter's header text and collapse flag off its section node
    fn read_chapter(row: &ChapterRow) -> Chapter {
        let title = row
            .header
            .as_ref()
            .and_then(|h| h.text_content())
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        Chapter {
            title,
            open: row.root.class_list().contains("open"),
        }
    }

    /// Viewer instance: pure state plus the page handles it drives
    struct App {
        state: ViewerState,
        page: Page,
    }

    impl App {
        /// Render the episode under the cursor and refresh everything that
        /// depends on it: panel, download link, sidebar rows, controls.
        fn load_current(&mut self) {
            self.render_content();
            self.sync_download();
            self.sync_episode_rows();
            self.sync_controls();
        }

        /// Fill the main panel for the current episode. The panel decision
        /// itself is pure (`markup::panel_content`); this only looks the
        /// template up and applies the result.
        fn render_content(&self) {
            let Some(episode) = self.state.current_episode() else {
                self.page
                    .content_display
                    .set_inner_html(markup::missing_content());
                return;
            };

            let template = match episode.kind {
                ContentKind::Video => episode.notes_id.as_deref(),
                ContentKind::Text => episode.content_id.as_deref(),
                ContentKind::Other => None,
            }
            .and_then(|id| self.page.template_html(id));

            let content = markup::panel_content(episode, template.as_deref());
            match &content {
                markup::PanelContent::Placeholder => log::warn!(
                    "Content template {:?} not found for \"{}\"",
                    episode.content_id,
                    episode.title
                ),
                markup::PanelContent::Empty => log::warn!(
                    "Episode \"{}\" has an unrecognized content type; panel cleared",
                    episode.title
                ),
                markup::PanelContent::Html(_) => {}
            }

            self.page.content_display.set_inner_html(content.html());
            if content.wants_highlight() {
                highlight_code_blocks();
            }
        }

        /// Point the download button at the current episode's resource, or
        /// disarm it when the episode has none
        fn sync_download(&self) {
            match self
                .state
                .current_episode()
                .and_then(|ep| ep.resource_url.as_deref())
            {
                Some(url) => self.page.download_btn.set_href(url),
                None => {
                    let _ = self.page.download_btn.remove_attribute("href");
                }
            }
        }

        /// Mirror the cursor and per-episode flags onto the sidebar rows
        fn sync_episode_rows(&self) {
            for (index, (row, episode)) in self
                .page
                .episode_rows
                .iter()
                .zip(&self.state.episodes)
                .enumerate()
            {
                let classes = row.root.class_list();
                set_class(&classes, "active", index == self.state.current);
                set_class(&classes, "completed", episode.completed);
                set_class(&classes, "bookmarked", episode.bookmarked);
                if let Some(icon) = &row.bookmark_icon {
                    sync_bookmark_icon(icon, episode.bookmarked);
                }
            }
        }

        /// Mirror the cursor position and current-episode flags onto the
        /// transport and progress controls
        fn sync_controls(&self) {
            self.page.prev_btn.set_disabled(self.state.at_first());
            self.page.next_btn.set_disabled(self.state.at_last());

            let Some(episode) = self.state.current_episode() else {
                return;
            };

            self.page
                .complete_btn
                .set_inner_html(markup::complete_button(episode.completed));
            let classes = self.page.complete_btn.class_list();
            for name in ["bg-green-100", "text-green-700"] {
                set_class(&classes, name, episode.completed);
            }
            for name in ["border-green-500", "text-green-600", "hover:bg-green-50"] {
                set_class(&classes, name, !episode.completed);
            }

            if let Some(icon) = self.page.bookmark_btn.query_selector("i").ok().flatten() {
                sync_bookmark_icon(&icon, episode.bookmarked);
            }
        }

        /// Mirror chapter collapse flags onto the sections and chevrons
        fn sync_chapters(&self) {
            for (row, chapter) in self.page.chapter_rows.iter().zip(&self.state.chapters) {
                set_class(&row.root.class_list(), "open", chapter.open);
                if let Some(chevron) = &row.chevron {
                    let classes = chevron.class_list();
                    set_class(&classes, "fa-chevron-down", chapter.open);
                    set_class(&classes, "fa-chevron-up", !chapter.open);
                }
            }
        }

        /// Mirror the sidebar open/width state and the responsive chrome
        fn sync_sidebar(&self) {
            set_class(
                &self.page.sidebar.class_list(),
                "open",
                self.state.sidebar.open,
            );

            // A drag width override is inline style; clearing it falls
            // back to the stylesheet
            let style = self.page.sidebar.style();
            match self.state.sidebar.width {
                Some(width) => {
                    let _ = style.set_property("width", &format!("{width}px"));
                    let _ = style.set_property("flex", "none");
                }
                None => {
                    let _ = style.remove_property("width");
                    let _ = style.remove_property("flex");
                }
            }

            set_class(
                &self.page.resizer.class_list(),
                "hidden",
                !self.state.resizer_enabled(),
            );

            let display = if self.state.is_mobile() { "block" } else { "none" };
            let _ = self
                .page
                .sidebar_close_btn
                .style()
                .set_property("display", display);
        }
    }

    /// classList.toggle with an explicit target state
    fn set_class(classes: &DomTokenList, name: &str, on: bool) {
        let _ = classes.toggle_with_force(name, on);
    }

    /// Swap a Font Awesome bookmark glyph between its outline (far) and
    /// solid (fas) faces
    fn sync_bookmark_icon(icon: &Element, bookmarked: bool) {
        let classes = icon.class_list();
        set_class(&classes, "fas", bookmarked);
        set_class(&classes, "far", !bookmarked);
        set_class(&classes, "text-blue-600", bookmarked);
    }

    /// Run highlight.js over freshly injected panel content
    fn highlight_code_blocks() {
        if highlight_all().is_err() {
            log::debug!("highlight.js not available; code blocks stay plain");
        }
    }

    /// Current viewport width in CSS px
    fn viewport_width(window: &Window) -> i32 {
        window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .map(|width| width as i32)
            .unwrap_or(0)
    }

    /// Body-wide cursor and selection lock while a drag is active
    fn set_body_drag_style(dragging: bool) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            return;
        };
        let style = body.style();
        if dragging {
            let _ = style.set_property("cursor", "col-resize");
            let _ = style.set_property("user-select", "none");
        } else {
            let _ = style.remove_property("cursor");
            let _ = style.remove_property("user-select");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Courseview starting...");

        if let Err(err) = boot() {
            log::error!("Courseview failed to start: {err:?}");
            // Leave the reader a message instead of a dead page
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("content-display"))
            {
                el.set_inner_html(markup::missing_content());
            }
        }
    }

    fn boot() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let page = Page::new(&document)?;
        let chapters: Vec<Chapter> = page.chapter_rows.iter().map(read_chapter).collect();
        let episodes: Vec<Episode> = page.episode_rows.iter().map(read_episode).collect();

        log::info!(
            "Catalog: {} chapters, {} episodes",
            chapters.len(),
            episodes.len()
        );

        let state = ViewerState::new(chapters, episodes, viewport_width(&window));
        let app = Rc::new(RefCell::new(App { state, page }));

        setup_episode_rows(app.clone());
        setup_chapter_headers(app.clone());
        setup_nav_buttons(app.clone());
        setup_progress_buttons(app.clone());
        setup_sidebar_toggles(app.clone());
        setup_resizer(app.clone(), &document);
        setup_resize_watcher(app.clone(), &window);

        {
            let mut app = app.borrow_mut();
            app.sync_chapters();
            app.sync_sidebar();
            if app.state.is_empty() {
                log::warn!("No .episode entries in the sidebar; nothing to show");
            } else {
                app.state.select(0);
                app.load_current();
            }
        }

        log::info!("Courseview running!");
        Ok(())
    }

    fn setup_episode_rows(app: Rc<RefCell<App>>) {
        let rows: Vec<(Element, Option<Element>)> = app
            .borrow()
            .page
            .episode_rows
            .iter()
            .map(|row| (row.root.clone(), row.bookmark_icon.clone()))
            .collect();

        for (index, (root, bookmark_icon)) in rows.into_iter().enumerate() {
            // Row body click selects; clicks landing on the bookmark glyph
            // belong to the icon handler below
            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    let clicked_bookmark = event
                        .target()
                        .and_then(|t| t.dyn_into::<Element>().ok())
                        .and_then(|el| el.closest(".fa-bookmark").ok().flatten())
                        .is_some();
                    if clicked_bookmark {
                        return;
                    }
                    let mut app = app.borrow_mut();
                    if app.state.select(index) {
                        app.load_current();
                        app.state.close_sidebar_if_mobile();
                        app.sync_sidebar();
                    }
                });
                let _ = root
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Bookmark toggle without selecting the episode
            if let Some(icon) = bookmark_icon {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.stop_propagation();
                    let mut app = app.borrow_mut();
                    app.state.toggle_bookmark_at(index);
                    app.sync_episode_rows();
                    if index == app.state.current {
                        app.sync_controls();
                    }
                });
                let _ = icon
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            } else {
                log::debug!("Episode {index} has no bookmark icon; toggle disabled");
            }
        }
    }

    fn setup_chapter_headers(app: Rc<RefCell<App>>) {
        let headers: Vec<Option<Element>> = app
            .borrow()
            .page
            .chapter_rows
            .iter()
            .map(|row| row.header.clone())
            .collect();

        for (index, header) in headers.into_iter().enumerate() {
            let Some(header) = header else {
                log::warn!("Chapter {index} has no .chapter-header; collapse disabled");
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.state.toggle_chapter(index);
                app.sync_chapters();
            });
            let _ =
                header.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_nav_buttons(app: Rc<RefCell<App>>) {
        let (prev_btn, next_btn) = {
            let app = app.borrow();
            (app.page.prev_btn.clone(), app.page.next_btn.clone())
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                if app.state.prev() {
                    app.load_current();
                }
            });
            let _ = prev_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                if app.state.next() {
                    app.load_current();
                }
            });
            let _ = next_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_progress_buttons(app: Rc<RefCell<App>>) {
        let (complete_btn, bookmark_btn) = {
            let app = app.borrow();
            (app.page.complete_btn.clone(), app.page.bookmark_btn.clone())
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.state.toggle_completed();
                app.sync_episode_rows();
                app.sync_controls();
            });
            let _ = complete_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.state.toggle_bookmarked();
                app.sync_episode_rows();
                app.sync_controls();
            });
            let _ = bookmark_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_sidebar_toggles(app: Rc<RefCell<App>>) {
        let (hamburger_btn, close_btn) = {
            let app = app.borrow();
            (
                app.page.hamburger_btn.clone(),
                app.page.sidebar_close_btn.clone(),
            )
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.state.open_sidebar();
                app.sync_sidebar();
            });
            let _ = hamburger_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.state.close_sidebar();
                app.sync_sidebar();
            });
            let _ = close_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resizer(app: Rc<RefCell<App>>, document: &Document) {
        let (resizer, sidebar) = {
            let app = app.borrow();
            (app.page.resizer.clone(), app.page.sidebar.clone())
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app.borrow_mut();
                if app
                    .state
                    .begin_resize(event.client_x(), sidebar.offset_width())
                {
                    set_body_drag_style(true);
                }
            });
            let _ = resizer
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move and release land on the document so fast drags that slip
        // off the handle keep working
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app.borrow_mut();
                if app.state.resize_to(event.client_x()).is_some() {
                    app.sync_sidebar();
                }
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                if app.state.end_resize() {
                    set_body_drag_style(false);
                }
            });
            let _ = document
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_watcher(app: Rc<RefCell<App>>, window: &Window) {
        let window_handle = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let width = viewport_width(&window_handle);
            let mut app = app.borrow_mut();
            app.state.apply_viewport(width);
            app.sync_sidebar();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Courseview (native) starting...");
    log::info!("Native mode has no DOM - run with `trunk serve` for the web viewer");

    // Run walkthrough
    println!("\nRunning viewer state walkthrough...");
    state_walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn state_walkthrough() {
    use courseview::viewer::{Chapter, Episode, ViewerState};

    let chapters = vec![Chapter {
        title: "Getting Started".to_string(),
        open: true,
    }];
    let episodes = vec![
        Episode::video("Welcome", "https://player.example/embed/1"),
        Episode::text("Setup Notes", "setup-notes"),
    ];
    let mut state = ViewerState::new(chapters, episodes, 1280);

    assert!(state.sidebar.open, "desktop should start with the sidebar open");
    assert!(state.next(), "second episode should be reachable");
    state.toggle_completed();
    assert!(state.current_episode().is_some_and(|ep| ep.completed));
    assert!(state.at_last());

    state.apply_viewport(480);
    assert!(!state.sidebar.open, "mobile should hide the sidebar");

    println!("✓ Viewer state walkthrough passed!");
}
