//! Marker metadata and the subtrees a scan must never enter

use crate::comment::{Comment, CommentGroup};

pub const MARKER_CLASS: &str = "feedback-highlight";
pub const IDS_ATTR: &str = "data-comment-ids";
pub const FRAGMENT_ATTR: &str = "data-selected-text";

pub const POPUP_CLASS: &str = "feedback-comment-popup";
pub const TOOLTIP_CLASS: &str = "feedback-tooltip";
pub const CONTAINER_ID: &str = "docs-feedback-widget";

/// An element scope excluded from scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Class(&'static str),
    Id(&'static str),
    Tag(&'static str),
}

/// Existing markers, the widget's own overlays, and non-rendered text.
pub const EXCLUDED_SCOPES: &[Scope] = &[
    Scope::Class(MARKER_CLASS),
    Scope::Class(POPUP_CLASS),
    Scope::Class(TOOLTIP_CLASS),
    Scope::Id(CONTAINER_ID),
    Scope::Tag("script"),
    Scope::Tag("style"),
    Scope::Tag("textarea"),
    Scope::Tag("noscript"),
];

impl Scope {
    pub fn selector(&self) -> String {
        match self {
            Scope::Class(c) => format!(".{}", c),
            Scope::Id(id) => format!("#{}", id),
            Scope::Tag(t) => t.to_string(),
        }
    }

    /// Test an element described by its tag, id and class list.
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &str) -> bool {
        match self {
            Scope::Class(c) => classes.split_whitespace().any(|cls| cls == *c),
            Scope::Id(want) => id == Some(*want),
            Scope::Tag(t) => tag.eq_ignore_ascii_case(t),
        }
    }
}

/// Comma-joined selector list for `Element::closest`
pub fn excluded_selector() -> String {
    EXCLUDED_SCOPES
        .iter()
        .map(Scope::selector)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn is_excluded(tag: &str, id: Option<&str>, classes: &str) -> bool {
    EXCLUDED_SCOPES.iter().any(|s| s.matches(tag, id, classes))
}

// =============================================================================
// MarkerSpec
// =============================================================================

/// What a marker element carries: the group's ids and its fragment text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpec {
    pub ids: Vec<String>,
    pub fragment: String,
}

impl From<&CommentGroup> for MarkerSpec {
    fn from(group: &CommentGroup) -> Self {
        Self {
            ids: group.ids.clone(),
            fragment: group.fragment.clone(),
        }
    }
}

impl MarkerSpec {
    /// Rebuild from the attributes of a rendered marker
    pub fn from_attributes(ids_attr: &str, fragment: &str) -> Self {
        Self {
            ids: ids_attr
                .split(',')
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
            fragment: fragment.to_string(),
        }
    }

    pub fn ids_attr(&self) -> String {
        self.ids.join(",")
    }

    /// Comments belonging to this marker, in store order.
    ///
    /// Both the id and the fragment must agree, so a marker never shows
    /// comments from another fragment group.
    pub fn select<'c>(&self, comments: &'c [Comment]) -> Vec<&'c Comment> {
        comments
            .iter()
            .filter(|c| self.ids.iter().any(|id| *id == c.id) && c.selected_text == self.fragment)
            .collect()
    }
}
