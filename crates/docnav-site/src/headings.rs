//! Heading outline extraction.
//!
//! Builds the "on this page" outline from raw markdown text. Only level 2
//! and level 3 ATX headings are collected, in source order. Each entry
//! carries a slug that in-page links use as their fragment:
//!
//! ```text
//! slug = "#" + lowercase(text with ' ' replaced by '-')
//! ```
//!
//! No other normalization is applied, so punctuation survives and two
//! headings that differ only in case share a slug. An optional closing `#`
//! sequence is not part of the text: `## Rotate ##` slugs to `#rotate`, the
//! same as the rendered heading. Headings containing an inline code
//! delimiter (a backtick) are skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches a level 2 or 3 ATX heading line (without line terminator).
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,3})[ \t]+(.*)$").unwrap());

/// One entry of a page outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Literal inline content of the heading.
    pub text: String,
    /// Heading level (2 or 3).
    pub level: u8,
    /// Anchor fragment including the leading `#`.
    pub slug: String,
}

/// Extract the level 2 and 3 headings of a markdown document.
///
/// Lines inside fenced code blocks are ignored. Never fails: input without
/// headings yields an empty outline.
///
/// # Examples
///
/// ```
/// use docnav_site::extract_headings;
///
/// let headings = extract_headings("## Installing\n### Step `one`\n## Usage");
/// let slugs: Vec<_> = headings.iter().map(|h| h.slug.as_str()).collect();
/// assert_eq!(slugs, ["#installing", "#usage"]);
/// ```
#[must_use]
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut fence: Option<Fence> = None;

    for line in markdown.lines() {
        if let Some(open) = fence {
            if open.is_closed_by(line) {
                fence = None;
            }
            continue;
        }

        if let Some(open) = Fence::open(line) {
            fence = Some(open);
            continue;
        }

        if let Some(heading) = parse_heading_line(line) {
            headings.push(heading);
        }
    }

    headings
}

/// Parse a single line as an outline heading.
///
/// Returns `None` for lines that are not level 2/3 headings, for empty
/// headings and for headings containing a backtick.
pub(crate) fn parse_heading_line(line: &str) -> Option<Heading> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = HEADING_RE.captures(line)?;

    let level = u8::try_from(caps[1].len()).ok()?;
    let text = strip_closing_sequence(caps[2].trim_end());

    if text.is_empty() || text.contains('`') {
        return None;
    }

    Some(Heading {
        text: text.to_owned(),
        level,
        slug: slugify(text),
    })
}

/// Derive the anchor slug for heading text.
///
/// # Examples
///
/// ```
/// use docnav_site::slugify;
///
/// assert_eq!(slugify("Log Rotation"), "#log-rotation");
/// assert_eq!(slugify("What's new?"), "#what's-new?");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    format!("#{}", text.replace(' ', "-").to_lowercase())
}

/// HTML `id` for a slug (the slug without its leading `#`).
#[must_use]
pub fn anchor_id(slug: &str) -> &str {
    slug.strip_prefix('#').unwrap_or(slug)
}

/// Remove an optional closing `#` sequence (`## Title ##`).
fn strip_closing_sequence(text: &str) -> &str {
    let stripped = text.trim_end_matches('#');
    if stripped.len() == text.len() {
        return text;
    }
    if stripped.is_empty() || stripped.ends_with([' ', '\t']) {
        stripped.trim_end()
    } else {
        text
    }
}

/// An open fenced code block.
#[derive(Clone, Copy, Debug)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    /// Parse a fence delimiter: up to three spaces of indentation followed
    /// by at least three backticks or tildes.
    fn parse(line: &str) -> Option<(Self, &str)> {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > 3 {
            return None;
        }
        let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = trimmed.chars().take_while(|&c| c == marker).count();
        (len >= 3).then(|| (Self { marker, len }, &trimmed[len..]))
    }

    /// An opening fence; a backtick fence's info string may not contain a
    /// backtick.
    fn open(line: &str) -> Option<Self> {
        Self::parse(line)
            .filter(|(fence, info)| fence.marker != '`' || !info.contains('`'))
            .map(|(fence, _)| fence)
    }

    fn is_closed_by(self, line: &str) -> bool {
        Self::parse(line).is_some_and(|(fence, rest)| {
            fence.marker == self.marker && fence.len >= self.len && rest.trim().is_empty()
        })
    }
}
