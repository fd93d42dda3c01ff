//! Presentation Shell: the widget's UI state machine
//!
//! Each surface is its own tagged union. The identity modal, composer and
//! tooltip change independently; the badge is derived from the comment list.
//! Transitions are pure: `UiState::apply` consumes the state and an event and
//! returns the next state plus the side effects the runtime must perform.
//!
//! ```text
//! Composer:  Closed --SelectionMade--> Open{draft: ""}
//!            Open   --SelectionMade--> Open{new selection, same draft}
//!            Open   --SubmitRequested--> Open{in_flight}      => Insert
//!            Open{in_flight} --SubmitSucceeded--> Closed      => ClearSelection, Load
//!            Open{in_flight} --SubmitFailed--> Open{draft}    => Alert
//!            Open   --Cancelled | SelectionCleared--> Closed
//! ```

use crate::comment::{AnchorPoint, Comment, NewComment};
use crate::error::StoreError;
use crate::identity::{DisplayName, Identity};
use crate::reconcile::MarkerSpec;

// =============================================================================
// Surfaces
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub text: String,
    pub anchor: AnchorPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposerState {
    pub selection: Selection,
    pub draft: String,
    /// An insert is pending; further submits are ignored until it settles
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Composer {
    #[default]
    Closed,
    Open(ComposerState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub anchor: AnchorPoint,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tooltip {
    #[default]
    Hidden,
    Shown(TooltipState),
}

// =============================================================================
// Events & Effects
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    NameSubmitted(String),
    SelectionMade(Selection),
    SelectionCleared,
    DraftChanged(String),
    SubmitRequested,
    SubmitSucceeded,
    SubmitFailed(StoreError),
    Cancelled,
    ReloadRequested,
    CommentsLoaded { generation: u64, comments: Vec<Comment> },
    MarkerEntered { marker: MarkerSpec, anchor: AnchorPoint },
    MarkerLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistName(DisplayName),
    Insert(NewComment),
    /// Fetch the page's comments; the result is tagged with `generation`
    Load { generation: u64 },
    ClearSelection,
    Alert(String),
    Reconcile,
}

// =============================================================================
// UiState
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub page_url: String,
    pub identity: Identity,
    pub composer: Composer,
    pub tooltip: Tooltip,
    /// Page-scoped read cache, replaced wholesale on every load
    pub comments: Vec<Comment>,
    generation: u64,
}

impl UiState {
    pub fn new(page_url: impl Into<String>, identity: Identity) -> Self {
        Self {
            page_url: page_url.into(),
            identity,
            ..Default::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn modal_visible(&self) -> bool {
        self.identity.needs_prompt()
    }

    /// The composer is only rendered once the author is known.
    pub fn visible_composer(&self) -> Option<&ComposerState> {
        match (&self.composer, &self.identity) {
            (Composer::Open(state), Identity::Known(_)) => Some(state),
            _ => None,
        }
    }

    pub fn visible_tooltip(&self) -> Option<&TooltipState> {
        match &self.tooltip {
            Tooltip::Shown(state) => Some(state),
            Tooltip::Hidden => None,
        }
    }

    pub fn badge_text(&self) -> Option<String> {
        match self.comments.len() {
            0 => None,
            n => Some(format!("{} comments on this page", n)),
        }
    }

    /// Apply one event.
    pub fn apply(mut self, event: UiEvent) -> (UiState, Vec<Effect>) {
        let mut effects = Vec::new();

        match event {
            UiEvent::NameSubmitted(raw) => {
                if self.identity.needs_prompt() {
                    if let Some(name) = DisplayName::parse(&raw) {
                        effects.push(Effect::PersistName(name.clone()));
                        self.identity = Identity::Known(name);
                    }
                }
            }

            UiEvent::SelectionMade(selection) => {
                self.composer = match self.composer {
                    Composer::Open(mut state) => {
                        state.selection = selection;
                        Composer::Open(state)
                    }
                    Composer::Closed => Composer::Open(ComposerState {
                        selection,
                        draft: String::new(),
                        in_flight: false,
                    }),
                };
            }

            UiEvent::SelectionCleared => {
                // A pending submit keeps its draft until it settles.
                if !matches!(&self.composer, Composer::Open(state) if state.in_flight) {
                    self.composer = Composer::Closed;
                }
            }

            UiEvent::DraftChanged(draft) => {
                if let Composer::Open(state) = &mut self.composer {
                    state.draft = draft;
                }
            }

            UiEvent::SubmitRequested => {
                if let Some(insert) = self.begin_submit() {
                    effects.push(Effect::Insert(insert));
                }
            }

            UiEvent::SubmitSucceeded => {
                self.composer = Composer::Closed;
                effects.push(Effect::ClearSelection);
                effects.push(self.next_load());
            }

            UiEvent::SubmitFailed(error) => {
                if let Composer::Open(state) = &mut self.composer {
                    state.in_flight = false;
                }
                effects.push(Effect::Alert(error.user_message().to_string()));
            }

            UiEvent::Cancelled => {
                self.composer = Composer::Closed;
                effects.push(Effect::ClearSelection);
            }

            UiEvent::ReloadRequested => {
                effects.push(self.next_load());
            }

            UiEvent::CommentsLoaded { generation, comments } => {
                // A newer load has been issued since; its result will follow.
                if generation == self.generation {
                    self.comments = comments;
                    effects.push(Effect::Reconcile);
                }
            }

            UiEvent::MarkerEntered { marker, anchor } => {
                let comments: Vec<Comment> = marker.select(&self.comments).into_iter().cloned().collect();
                self.tooltip = if comments.is_empty() {
                    Tooltip::Hidden
                } else {
                    Tooltip::Shown(TooltipState { anchor, comments })
                };
            }

            UiEvent::MarkerLeft => {
                self.tooltip = Tooltip::Hidden;
            }
        }

        (self, effects)
    }

    fn begin_submit(&mut self) -> Option<NewComment> {
        let author = self.identity.name()?.as_str().to_string();
        let Composer::Open(state) = &mut self.composer else {
            return None;
        };
        if state.in_flight || state.draft.trim().is_empty() {
            return None;
        }
        state.in_flight = true;
        Some(NewComment {
            author_name: author,
            page_url: self.page_url.clone(),
            selected_text: state.selection.text.clone(),
            comment_body: state.draft.clone(),
            anchor_position: state.selection.anchor,
        })
    }

    fn next_load(&mut self) -> Effect {
        self.generation += 1;
        Effect::Load { generation: self.generation }
    }
}

// =============================================================================
// Tests
// =============================================================================
