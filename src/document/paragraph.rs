//! Text blocks and the heading predicate.

use regex::Regex;
use smallvec::SmallVec;

/// A minimal styled text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Text as written in the run, without surrounding whitespace changes
    pub text: String,
    /// Whether the run is bold
    pub bold: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
        }
    }
}

/// One paragraph: ordered runs plus the style flags validation looks at.
///
/// Paragraphs are extracted in document order, including those inside
/// table cells, and carry the preorder position of their source element so
/// they can be ordered against tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    runs: SmallVec<[Run; 4]>,
    style_id: Option<String>,
    numbering: Option<String>,
    position: usize,
}

impl TextBlock {
    pub fn new(runs: impl IntoIterator<Item = Run>, style_id: Option<String>, numbering: Option<String>, position: usize) -> Self {
        Self {
            runs: runs.into_iter().collect(),
            style_id,
            numbering,
            position,
        }
    }

    /// Runs in order.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Paragraph style id (`w:pStyle/@w:val`), if any.
    #[inline]
    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    /// List numbering reference (`numId:ilvl`), if the paragraph is numbered.
    #[inline]
    pub fn numbering(&self) -> Option<&str> {
        self.numbering.as_deref()
    }

    /// Preorder position of the source element.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Non-empty run texts joined with single spaces, trimmed.
    pub fn text(&self) -> String {
        join_texts(self.runs.iter().map(|r| r.text.as_str()))
    }

    /// Whether any run is bold.
    pub fn has_bold_run(&self) -> bool {
        self.runs.iter().any(|r| r.bold)
    }

    /// Heading-or-bold classification; see [`is_section_heading`].
    pub fn is_heading(&self, heading_style: &Regex) -> bool {
        is_section_heading(self.style_id(), self.runs.iter().map(|r| r.bold), heading_style)
    }
}

/// A paragraph counts as a section heading when its style id matches the
/// heading-style pattern or when any of its runs is bold.
pub fn is_section_heading(style_id: Option<&str>, run_bold: impl IntoIterator<Item = bool>, heading_style: &Regex) -> bool {
    style_id.is_some_and(|s| heading_style.is_match(s)) || run_bold.into_iter().any(|b| b)
}

/// Join non-empty fragments with a single space and trim the result.
pub(crate) fn join_texts<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out.trim().to_string()
}
