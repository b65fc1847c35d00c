//! Markdown to HTML rendering.
//!
//! Rendering itself is delegated to `pulldown-cmark`. The only addition is
//! anchor ids: every heading that appears in the page outline gets
//! `id="<slug without #>"`, so outline links land on the rendered heading.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, html};

use crate::headings::{anchor_id, parse_heading_line};

/// Renderer options.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { gfm: true }
    }
}

impl RenderOptions {
    /// Parser options for this configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

/// Render markdown to HTML with outline anchor ids on headings.
///
/// # Examples
///
/// ```
/// use docnav_site::{RenderOptions, render_html};
///
/// let html = render_html("## Log Rotation", RenderOptions::default());
/// assert_eq!(html, "<h2 id=\"log-rotation\">Log Rotation</h2>\n");
/// ```
#[must_use]
pub fn render_html(markdown: &str, options: RenderOptions) -> String {
    let parser = Parser::new_ext(markdown, options.parser_options()).into_offset_iter();
    let events = parser.map(|(event, range)| match event {
        Event::Start(Tag::Heading {
            level: level @ (HeadingLevel::H2 | HeadingLevel::H3),
            id: None,
            classes,
            attrs,
        }) => {
            let id = markdown[range]
                .lines()
                .next()
                .and_then(parse_heading_line)
                .map(|heading| CowStr::from(anchor_id(&heading.slug).to_owned()));
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            })
        }
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}
