//! Marker hover wiring
//!
//! One pair of closures is shared by every marker. Handlers are installed
//! through the `onmouseenter`/`onmouseleave` properties, so re-attaching after
//! each reconciliation replaces rather than stacks them.

use feedback_core::{AnchorPoint, MarkerSpec, Rect, FRAGMENT_ATTR, IDS_ATTR, MARKER_CLASS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

pub struct HoverHandlers {
    enter: Closure<dyn FnMut(MouseEvent)>,
    leave: Closure<dyn FnMut(MouseEvent)>,
}

impl HoverHandlers {
    pub fn new(
        mut on_enter: impl FnMut(MarkerSpec, AnchorPoint) + 'static,
        mut on_leave: impl FnMut() + 'static,
    ) -> Self {
        let enter = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(marker) = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let (Some(ids), Some(fragment)) = (
                marker.get_attribute(IDS_ATTR),
                marker.get_attribute(FRAGMENT_ATTR),
            ) else {
                return;
            };
            let r = marker.get_bounding_client_rect();
            let rect = Rect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            };
            on_enter(MarkerSpec::from_attributes(&ids, &fragment), rect.anchor());
        }) as Box<dyn FnMut(MouseEvent)>);

        let leave = Closure::wrap(Box::new(move |_: MouseEvent| {
            on_leave();
        }) as Box<dyn FnMut(MouseEvent)>);

        Self { enter, leave }
    }

    /// Install the handlers on every marker under `root`.
    pub fn attach(&self, root: &Element) -> Result<u32, JsValue> {
        let list = root.query_selector_all(&format!(".{}", MARKER_CLASS))?;
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                el.set_onmouseenter(Some(self.enter.as_ref().unchecked_ref()));
                el.set_onmouseleave(Some(self.leave.as_ref().unchecked_ref()));
            }
        }
        Ok(list.length())
    }
}
