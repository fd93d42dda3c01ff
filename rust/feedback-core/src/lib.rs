//! Feedback Core: text-anchored comments for documentation pages
//!
//! Target-independent logic behind the `docs-feedback` widget. Nothing here
//! touches the browser, so the whole crate runs under plain `cargo test`.
//!
//! # Architecture
//! - `comment.rs` - Comment records, fragment grouping, date display
//! - `selection.rs` - Selection Capture decisions and popup anchoring
//! - `identity.rs` - Display-name validation and the identity gate
//! - `config.rs` - Store configuration and endpoint building
//! - `error.rs` - Store error taxonomy
//! - `reconcile/` - Annotation Reconciler over an abstract `AnnotationSurface`
//! - `shell.rs` - UI state machine (`UiState::apply(event) -> (state, effects)`)
//!
//! # Usage
//! ```rust,ignore
//! use feedback_core::{reconcile, UiEvent, UiState};
//!
//! let (state, effects) = state.apply(UiEvent::CommentsLoaded { generation, comments });
//! // for Effect::Reconcile:
//! let report = reconcile(&mut surface, &state.comments)?;
//! ```

pub mod comment;
pub mod config;
pub mod error;
pub mod identity;
pub mod reconcile;
pub mod selection;
pub mod shell;

pub use comment::*;
pub use config::*;
pub use error::*;
pub use identity::*;
pub use reconcile::*;
pub use selection::*;
pub use shell::*;

/// Get version information
pub fn version() -> String {
    format!("feedback-core v{}", env!("CARGO_PKG_VERSION"))
}
