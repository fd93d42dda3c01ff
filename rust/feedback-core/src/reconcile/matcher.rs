//! FragmentMatcher: exact, case-sensitive substring search
//!
//! The fragment is escaped before compilation so arbitrary selected text
//! (parentheses, dots, `$`...) is matched literally.

use regex::Regex;

/// One piece of a split text node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Plain(&'t str),
    Marked(&'t str),
}

impl<'t> Segment<'t> {
    pub fn text(&self) -> &'t str {
        match self {
            Segment::Plain(s) | Segment::Marked(s) => s,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Segment::Marked(_))
    }
}

#[derive(Debug, Clone)]
pub struct FragmentMatcher {
    pattern: Regex,
}

impl FragmentMatcher {
    pub fn new(fragment: &str) -> Result<Self, String> {
        if fragment.is_empty() {
            return Err("Cannot match an empty fragment".to_string());
        }
        let pattern = Regex::new(&regex::escape(fragment))
            .map_err(|e| format!("Failed to compile fragment pattern: {}", e))?;
        Ok(Self { pattern })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Split `text` around every leftmost, non-overlapping occurrence.
    ///
    /// Returns `None` when the fragment does not occur. Plain segments are
    /// never empty, and no plain segment contains a further occurrence.
    pub fn segments<'t>(&self, text: &'t str) -> Option<Vec<Segment<'t>>> {
        let mut segments = Vec::new();
        let mut last = 0;

        for m in self.pattern.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::Plain(&text[last..m.start()]));
            }
            segments.push(Segment::Marked(m.as_str()));
            last = m.end();
        }

        if segments.is_empty() {
            return None;
        }
        if last < text.len() {
            segments.push(Segment::Plain(&text[last..]));
        }
        Some(segments)
    }
}
