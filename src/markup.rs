//! HTML fragments for the main content panel
//!
//! Builders are plain string assembly so the panel structure stays testable
//! without a DOM. Text and attribute insertions are escaped; HTML lifted
//! from the page's own hidden template blocks passes through verbatim.

use crate::viewer::{ContentKind, Episode};

/// Escape text for insertion into element content or a quoted attribute
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Panel fragment for a video episode: player iframe, title, description,
/// then the episode's notes. `notes_html` is the inner HTML of the notes
/// template, empty when the episode has none.
pub fn video_panel(episode: &Episode, notes_html: &str) -> String {
    let src = episode.content_src.as_deref().unwrap_or("");
    format!(
        r#"<div>
    <div class="video-container bg-black rounded-lg overflow-hidden shadow-lg">
        <iframe src="{src}" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>
    </div>
    <h2 class="text-2xl font-bold mt-6 mb-2 px-4 md:px-8">{title}</h2>
    <div class="text-gray-600 text-base px-4 md:px-8 mb-6" id="video-description">{description}</div>
    <div class="video-notes-section px-4 md:px-8 mb-8">
        {notes_html}
    </div>
</div>"#,
        src = escape_html(src),
        title = escape_html(&episode.title),
        description = escape_html(&episode.description),
    )
}

/// Placeholder shown when an episode's content cannot be produced, either
/// because its template is missing or because startup itself failed
pub fn missing_content() -> &'static str {
    r#"<p class="p-8">Content not found.</p>"#
}

/// Inner HTML for the complete button in either of its two looks
pub fn complete_button(completed: bool) -> &'static str {
    if completed {
        r#"<i class="fas fa-check-circle mr-2"></i>Completed"#
    } else {
        r#"<i class="far fa-check-circle mr-2"></i>Mark as Completed"#
    }
}

/// What the main panel shows for an episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    /// Markup to inject, followed by a highlighter pass
    Html(String),
    /// The missing-template placeholder
    Placeholder,
    /// Empty panel for an unrecognized content kind
    Empty,
}

impl PanelContent {
    /// Inner HTML to write into the panel
    pub fn html(&self) -> &str {
        match self {
            Self::Html(html) => html,
            Self::Placeholder => missing_content(),
            Self::Empty => "",
        }
    }

    /// Only freshly injected lesson markup gets a highlighter pass
    pub fn wants_highlight(&self) -> bool {
        matches!(self, Self::Html(_))
    }
}

/// Decide the panel content for an episode. `template` is the inner HTML
/// of the episode's looked-up template block: the notes template for a
/// video (missing notes leave the notes section empty), the content
/// template for text (missing content renders the placeholder).
pub fn panel_content(episode: &Episode, template: Option<&str>) -> PanelContent {
    match episode.kind {
        ContentKind::Video => {
            PanelContent::Html(video_panel(episode, template.unwrap_or_default()))
        }
        ContentKind::Text => match template {
            Some(html) => PanelContent::Html(html.to_string()),
            None => PanelContent::Placeholder,
        },
        ContentKind::Other => PanelContent::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_video_panel_embeds_escaped_fields() {
        let mut episode = Episode::video("Loops & Iterators", "https://player.example/embed/7");
        episode.description = "What <code> really does".to_string();

        let html = video_panel(&episode, "");
        assert!(html.contains(r#"<iframe src="https://player.example/embed/7""#));
        assert!(html.contains("<h2 class=\"text-2xl font-bold mt-6 mb-2 px-4 md:px-8\">Loops &amp; Iterators</h2>"));
        assert!(html.contains("What &lt;code&gt; really does"));
        assert!(html.contains(r#"id="video-description""#));
    }

    #[test]
    fn test_video_panel_passes_notes_through_verbatim() {
        let episode = Episode::video("Intro", "https://player.example/embed/1");
        let notes = r#"<pre><code class="language-rust">fn main() {}</code></pre>"#;
        let html = video_panel(&episode, notes);
        assert!(html.contains(notes));
    }

    #[test]
    fn test_video_panel_tolerates_missing_src() {
        let mut episode = Episode::video("Broken", "x");
        episode.content_src = None;
        let html = video_panel(&episode, "");
        assert!(html.contains(r#"<iframe src="""#));
    }

    #[test]
    fn test_complete_button_variants() {
        assert!(complete_button(true).contains("fas fa-check-circle"));
        assert!(complete_button(true).ends_with("Completed"));
        assert!(complete_button(false).contains("far fa-check-circle"));
        assert!(complete_button(false).ends_with("Mark as Completed"));
    }

    #[test]
    fn test_missing_content_placeholder() {
        assert_eq!(missing_content(), r#"<p class="p-8">Content not found.</p>"#);
    }

    #[test]
    fn test_unknown_kind_renders_an_empty_panel() {
        let mut episode = Episode::text("Pop Quiz", "quiz-1");
        episode.kind = ContentKind::Other;

        let content = panel_content(&episode, None);
        assert_eq!(content, PanelContent::Empty);
        assert_eq!(content.html(), "");
        assert!(!content.wants_highlight());
    }

    #[test]
    fn test_text_panel_uses_template_or_placeholder() {
        let episode = Episode::text("Reading", "reading-1");

        let found = panel_content(&episode, Some("<p>Lesson body</p>"));
        assert_eq!(found.html(), "<p>Lesson body</p>");
        assert!(found.wants_highlight());

        let missing = panel_content(&episode, None);
        assert_eq!(missing, PanelContent::Placeholder);
        assert_eq!(missing.html(), missing_content());
        assert!(!missing.wants_highlight());
    }

    #[test]
    fn test_video_panel_content_tolerates_missing_notes() {
        let episode = Episode::video("Intro", "https://player.example/embed/1");

        let content = panel_content(&episode, None);
        assert!(content.html().contains("video-container"));
        assert!(content.wants_highlight());
    }
}
