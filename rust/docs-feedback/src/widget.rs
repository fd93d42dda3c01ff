//! Widget runtime
//!
//! Owns the `UiState`, feeds it events, re-renders the view and carries out
//! the effects the state machine asks for. State is taken out of its cell
//! for the duration of `apply`, so no borrow is held while effects run or
//! across an await.

use std::cell::RefCell;
use std::rc::Rc;

use feedback_core::{reconcile, Effect, Identity, NameStore, StoreConfig, UiEvent, UiState};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Window};

use crate::capture;
use crate::dom::{DomSurface, HoverHandlers};
use crate::storage::LocalNameStore;
use crate::store::CommentStoreClient;
use crate::styles;
use crate::view::View;

/// Event sink handed to every listener
pub type Dispatch = Rc<dyn Fn(UiEvent)>;

thread_local! {
    static WIDGET: RefCell<Option<Rc<Widget>>> = const { RefCell::new(None) };
}

pub struct Widget {
    document: Document,
    window: Window,
    state: RefCell<UiState>,
    store: CommentStoreClient,
    names: LocalNameStore,
    view: RefCell<Option<View>>,
    hover: RefCell<Option<HoverHandlers>>,
}

/// Mount the widget on the current page. A second call is a no-op.
pub fn mount(config: StoreConfig) -> Result<(), JsValue> {
    if WIDGET.with(|w| w.borrow().is_some()) {
        web_sys::console::warn_1(&"[DocsFeedback] Already mounted".into());
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    styles::inject(&document)?;
    let container = styles::container(&document)?;

    let page_url = window.location().href()?;
    let names = LocalNameStore::open(&window);
    let identity = Identity::resolve(&names);
    let store = CommentStoreClient::new(config);
    if !store.is_configured() {
        web_sys::console::warn_1(
            &"[DocsFeedback] Store credentials missing; comments will not be loaded or saved".into(),
        );
    }

    let widget = Rc::new(Widget {
        document: document.clone(),
        window: window.clone(),
        state: RefCell::new(UiState::new(page_url.clone(), identity)),
        store,
        names,
        view: RefCell::new(None),
        hover: RefCell::new(None),
    });

    let dispatch = widget.dispatcher();
    *widget.view.borrow_mut() = Some(View::new(&document, &container, dispatch.clone())?);

    let (enter, leave) = (dispatch.clone(), dispatch.clone());
    *widget.hover.borrow_mut() = Some(HoverHandlers::new(
        move |marker, anchor| enter(UiEvent::MarkerEntered { marker, anchor }),
        move || leave(UiEvent::MarkerLeft),
    ));

    capture::listen(&document, window, dispatch)?;

    WIDGET.with(|w| *w.borrow_mut() = Some(widget.clone()));
    widget.render();
    widget.dispatch(UiEvent::ReloadRequested);

    web_sys::console::log_1(&format!("[DocsFeedback] Mounted on {}", page_url).into());
    Ok(())
}

/// Re-fetch and re-highlight, for hosts that swap page content in place.
pub fn reload() -> Result<(), JsValue> {
    let widget = WIDGET
        .with(|w| w.borrow().clone())
        .ok_or_else(|| JsValue::from_str("Widget not mounted"))?;
    widget.dispatch(UiEvent::ReloadRequested);
    Ok(())
}

impl Widget {
    /// Listeners hold a weak handle; the thread-local keeps the widget alive.
    fn dispatcher(self: &Rc<Self>) -> Dispatch {
        let weak = Rc::downgrade(self);
        Rc::new(move |event| {
            if let Some(widget) = weak.upgrade() {
                widget.dispatch(event);
            }
        })
    }

    pub fn dispatch(self: &Rc<Self>, event: UiEvent) {
        let state = std::mem::take(&mut *self.state.borrow_mut());
        let (state, effects) = state.apply(event);
        *self.state.borrow_mut() = state;

        self.render();
        for effect in effects {
            self.run(effect);
        }
    }

    fn render(&self) {
        let view = self.view.borrow();
        let Some(view) = view.as_ref() else {
            return;
        };
        if let Err(e) = view.update(&self.state.borrow()) {
            web_sys::console::error_1(&format!("[DocsFeedback] Render failed: {:?}", e).into());
        }
    }

    fn run(self: &Rc<Self>, effect: Effect) {
        match effect {
            Effect::PersistName(name) => {
                if let Err(e) = self.names.save(&name) {
                    web_sys::console::warn_1(&format!("[DocsFeedback] {}", e).into());
                }
            }

            Effect::Insert(comment) => {
                let widget = Rc::clone(self);
                spawn_local(async move {
                    let event = match widget.store.insert(&comment).await {
                        Ok(()) => UiEvent::SubmitSucceeded,
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("[FeedbackStore] Error submitting comment: {}", e).into(),
                            );
                            UiEvent::SubmitFailed(e)
                        }
                    };
                    widget.dispatch(event);
                });
            }

            Effect::Load { generation } => {
                let widget = Rc::clone(self);
                let page_url = self.state.borrow().page_url.clone();
                spawn_local(async move {
                    let comments = widget.store.list(&page_url).await;
                    widget.dispatch(UiEvent::CommentsLoaded { generation, comments });
                });
            }

            Effect::ClearSelection => {
                if let Ok(Some(selection)) = self.window.get_selection() {
                    if let Err(e) = selection.remove_all_ranges() {
                        web_sys::console::warn_1(
                            &format!("[DocsFeedback] Failed to clear selection: {:?}", e).into(),
                        );
                    }
                }
            }

            Effect::Alert(message) => {
                if let Err(e) = self.window.alert_with_message(&message) {
                    web_sys::console::warn_1(
                        &format!("[DocsFeedback] Alert failed ({:?}): {}", e, message).into(),
                    );
                }
            }

            Effect::Reconcile => {
                if let Err(e) = self.reconcile() {
                    web_sys::console::error_1(&format!("[Reconciler] Pass failed: {:?}", e).into());
                }
            }
        }
    }

    fn reconcile(&self) -> Result<(), JsValue> {
        let comments = self.state.borrow().comments.clone();
        let hover = self.hover.borrow();
        let mut surface = DomSurface::new(&self.document, hover.as_ref())?;
        let report = reconcile(&mut surface, &comments)?;

        let summary = serde_json::to_string(&report).unwrap_or_default();
        web_sys::console::log_1(
            &format!("[Reconciler] {} comments reconciled: {}", comments.len(), summary).into(),
        );
        for fragment in &report.skipped {
            web_sys::console::warn_1(&format!("[Reconciler] Skipped fragment {:?}", fragment).into());
        }
        Ok(())
    }
}
