//! Annotation Reconciler: re-derive highlights from text
//!
//! Highlights are never persisted as DOM ranges. Every time the comment list
//! changes, the page text is re-scanned and each occurrence of a commented
//! fragment is wrapped in a marker.
//!
//! # Pass
//! 1. Group comments by exact `selected_text` (first-appearance order)
//! 2. Relabel markers left by earlier passes with their group's current ids
//! 3. For each group, ask the surface for eligible text nodes; the surface
//!    skips existing markers and the widget's own overlays
//! 4. Split every node containing the fragment and replace it with plain
//!    text plus marker elements
//! 5. Let the surface finish the pass (the DOM surface wires hover handlers)
//!
//! Re-running on unchanged input is a no-op: marker text is never offered
//! again and the plain remainder of a split never contains the fragment.

pub mod marker;
pub mod matcher;

pub use marker::*;
pub use matcher::*;

use serde::Serialize;
use std::collections::HashMap;

use crate::comment::{group_by_fragment, Comment};

/// A tree of text that markers can be inserted into
pub trait AnnotationSurface {
    type Node;
    type Marker;
    type Error;

    /// Markers already present, with the metadata they carry
    fn markers(&self) -> Result<Vec<(Self::Marker, MarkerSpec)>, Self::Error>;

    /// Overwrite the metadata of an existing marker
    fn relabel(&mut self, marker: &Self::Marker, spec: &MarkerSpec) -> Result<(), Self::Error>;

    /// Text nodes eligible for highlighting, in document order.
    ///
    /// Must exclude nodes inside any of [`EXCLUDED_SCOPES`].
    fn text_nodes(&self) -> Result<Vec<Self::Node>, Self::Error>;

    fn text(&self, node: &Self::Node) -> String;

    /// Replace `node` with `segments`, wrapping each marked segment in a
    /// marker carrying `marker`. Returns the number of markers inserted.
    fn wrap(
        &mut self,
        node: &Self::Node,
        segments: &[Segment<'_>],
        marker: &MarkerSpec,
    ) -> Result<usize, Self::Error>;

    /// Called once after every group has been processed
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub groups: usize,
    pub nodes_split: usize,
    pub markers_created: usize,
    pub markers_relabelled: usize,
    /// Fragments that could not be compiled into a matcher
    pub skipped: Vec<String>,
}

/// Run one full reconciliation pass.
pub fn reconcile<S: AnnotationSurface>(
    surface: &mut S,
    comments: &[Comment],
) -> Result<ReconcileReport, S::Error> {
    let groups = group_by_fragment(comments);
    let mut report = ReconcileReport {
        groups: groups.len(),
        ..Default::default()
    };

    // Text inside an existing marker is never re-wrapped, so a comment added
    // to an already highlighted fragment only reaches the page through here.
    let by_fragment: HashMap<&str, MarkerSpec> = groups
        .iter()
        .map(|g| (g.fragment.as_str(), MarkerSpec::from(g)))
        .collect();
    for (marker, current) in surface.markers()? {
        if let Some(spec) = by_fragment.get(current.fragment.as_str()) {
            if spec.ids != current.ids {
                surface.relabel(&marker, spec)?;
                report.markers_relabelled += 1;
            }
        }
    }

    for group in &groups {
        let matcher = match FragmentMatcher::new(&group.fragment) {
            Ok(m) => m,
            Err(_) => {
                report.skipped.push(group.fragment.clone());
                continue;
            }
        };
        let spec = MarkerSpec::from(group);

        for node in surface.text_nodes()? {
            let text = surface.text(&node);
            if let Some(segments) = matcher.segments(&text) {
                report.markers_created += surface.wrap(&node, &segments, &spec)?;
                report.nodes_split += 1;
            }
        }
    }

    surface.finish()?;
    Ok(report)
}

#[cfg(test)]
mod tests;
