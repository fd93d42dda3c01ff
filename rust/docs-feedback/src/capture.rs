//! Selection Capture listeners
//!
//! Reads `window.getSelection()` on every pointer/touch release and feeds the
//! classified result into the widget.

use feedback_core::{classify, Rect, Selection, SelectionAction, UiEvent, POPUP_CLASS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Window};

use crate::widget::Dispatch;

const RELEASE_EVENTS: [&str; 2] = ["mouseup", "touchend"];

/// Register the release listeners. They live as long as the page.
pub fn listen(document: &Document, window: Window, dispatch: Dispatch) -> Result<(), JsValue> {
    let popup_selector = format!(".{}", POPUP_CLASS);
    let handler = Closure::wrap(Box::new(move |event: Event| {
        let inside_popup = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&popup_selector).ok().flatten())
            .is_some();

        if let Some(ui_event) = read_selection(&window, inside_popup) {
            dispatch(ui_event);
        }
    }) as Box<dyn FnMut(Event)>);

    for name in RELEASE_EVENTS {
        document.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
    }
    handler.forget();
    Ok(())
}

fn read_selection(window: &Window, inside_popup: bool) -> Option<UiEvent> {
    let selection = window.get_selection().ok().flatten();
    let raw: String = selection
        .as_ref()
        .map(|s| s.to_string().into())
        .unwrap_or_default();

    match classify(&raw, inside_popup) {
        SelectionAction::Open(text) => {
            let range = selection?.get_range_at(0).ok()?;
            let r = range.get_bounding_client_rect();
            let rect = Rect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            };
            Some(UiEvent::SelectionMade(Selection {
                text,
                anchor: rect.anchor(),
            }))
        }
        SelectionAction::Close => Some(UiEvent::SelectionCleared),
        SelectionAction::Ignore => None,
    }
}
