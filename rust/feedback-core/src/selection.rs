//! Selection Capture: decide what a pointer release means
//!
//! The browser glue reads the live selection and its bounding rectangle; this
//! module turns that into an open/close/ignore decision and a popup anchor.

use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

use crate::comment::AnchorPoint;

/// Selections must be longer than this (after trimming) to open the composer.
pub const MIN_SELECTION_EXCLUSIVE: usize = 3;

/// Popups sit this many pixels above the selection.
pub const ANCHOR_LIFT: f64 = 10.0;

/// Composer preview length, in grapheme clusters
pub const PREVIEW_LIMIT: usize = 100;

/// Bounding rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Horizontal center, slightly above the top edge.
    pub fn anchor(&self) -> AnchorPoint {
        AnchorPoint {
            x: self.left + self.width / 2.0,
            y: self.top - ANCHOR_LIFT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// Record the (trimmed) text and open the composer
    Open(String),
    /// Nothing is selected any more
    Close,
    /// Too short to mean anything, or the release happened inside the popup
    Ignore,
}

/// Classify a pointer/touch release.
///
/// `inside_popup` must be true when the event target lies inside the composer,
/// otherwise clicking "Submit" would clear the selection and close it.
pub fn classify(raw_selection: &str, inside_popup: bool) -> SelectionAction {
    if inside_popup {
        return SelectionAction::Ignore;
    }

    let text = raw_selection.trim();
    if text.is_empty() {
        SelectionAction::Close
    } else if text.chars().count() > MIN_SELECTION_EXCLUSIVE {
        SelectionAction::Open(text.to_string())
    } else {
        SelectionAction::Ignore
    }
}

/// Shorten long selections for display in the composer.
pub fn preview(text: &str) -> Cow<'_, str> {
    match text.grapheme_indices(true).nth(PREVIEW_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}
