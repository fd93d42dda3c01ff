//! Overlay rendering
//!
//! Every surface is built once at mount and then updated in place from
//! `UiState`. Rebuilding on each event would reset the composer's caret.

use std::cell::{Cell, RefCell};

use feedback_core::{format_date, preview, AnchorPoint, TooltipState, UiEvent, UiState, POPUP_CLASS, TOOLTIP_CLASS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::widget::Dispatch;

pub struct View {
    document: Document,
    modal: HtmlElement,
    name_input: HtmlInputElement,
    composer: HtmlElement,
    composer_preview: HtmlElement,
    draft: HtmlTextAreaElement,
    submit: HtmlButtonElement,
    tooltip: HtmlElement,
    badge: HtmlElement,
    composer_was_open: Cell<bool>,
    rendered_tooltip: RefCell<Option<TooltipState>>,
    _listeners: Vec<Closure<dyn FnMut(Event)>>,
}

fn element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

fn typed<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document.create_element(tag)?.dyn_into::<T>().map_err(JsValue::from)
}

fn set_visible(el: &HtmlElement, visible: bool) -> Result<(), JsValue> {
    if visible {
        el.style().remove_property("display").map(|_| ())
    } else {
        el.style().set_property("display", "none")
    }
}

fn place(el: &HtmlElement, at: AnchorPoint) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &format!("{}px", at.x))?;
    style.set_property("top", &format!("{}px", at.y))
}

impl View {
    pub fn new(document: &Document, container: &Element, dispatch: Dispatch) -> Result<Self, JsValue> {
        let mut listeners: Vec<Closure<dyn FnMut(Event)>> = Vec::new();

        // Identity modal
        let modal = element(document, "div", "feedback-overlay")?;
        let dialog = element(document, "div", "feedback-auth-modal")?;
        let heading = element(document, "h3", "")?;
        heading.set_text_content(Some("Welcome! Please enter your Telegram username to continue"));
        let form: web_sys::HtmlFormElement = typed(document, "form")?;
        let name_input: HtmlInputElement = typed(document, "input")?;
        name_input.set_type("text");
        name_input.set_name("telegram_name");
        name_input.set_placeholder("@username");
        name_input.set_required(true);
        let continue_button: HtmlButtonElement = typed(document, "button")?;
        continue_button.set_type("submit");
        continue_button.set_text_content(Some("Continue"));
        form.append_child(&name_input)?;
        form.append_child(&continue_button)?;
        dialog.append_child(&heading)?;
        dialog.append_child(&form)?;
        modal.append_child(&dialog)?;

        {
            let dispatch = dispatch.clone();
            let input = name_input.clone();
            let on_submit = Closure::wrap(Box::new(move |event: Event| {
                event.prevent_default();
                dispatch(UiEvent::NameSubmitted(input.value()));
            }) as Box<dyn FnMut(Event)>);
            form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
            listeners.push(on_submit);
        }

        // Composer popup
        let composer = element(document, "div", POPUP_CLASS)?;
        let composer_preview = element(document, "div", "feedback-selected-text")?;
        let draft: HtmlTextAreaElement = typed(document, "textarea")?;
        draft.set_placeholder("Add your comment...");
        let actions = element(document, "div", "feedback-actions")?;
        let cancel: HtmlButtonElement = typed(document, "button")?;
        cancel.set_type("button");
        cancel.set_text_content(Some("Cancel"));
        let submit: HtmlButtonElement = typed(document, "button")?;
        submit.set_type("button");
        submit.set_class_name("primary");
        submit.set_text_content(Some("Submit"));
        actions.append_child(&cancel)?;
        actions.append_child(&submit)?;
        composer.append_child(&composer_preview)?;
        composer.append_child(&draft)?;
        composer.append_child(&actions)?;

        {
            let dispatch = dispatch.clone();
            let textarea = draft.clone();
            let on_input = Closure::wrap(Box::new(move |_: Event| {
                dispatch(UiEvent::DraftChanged(textarea.value()));
            }) as Box<dyn FnMut(Event)>);
            draft.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
            listeners.push(on_input);
        }
        for (button, event) in [(&cancel, UiEvent::Cancelled), (&submit, UiEvent::SubmitRequested)] {
            let dispatch = dispatch.clone();
            let on_click = Closure::wrap(Box::new(move |_: Event| {
                dispatch(event.clone());
            }) as Box<dyn FnMut(Event)>);
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            listeners.push(on_click);
        }

        // Tooltip and badge
        let tooltip = element(document, "div", TOOLTIP_CLASS)?;
        let badge = element(document, "div", "feedback-indicator")?;

        for surface in [&modal, &composer, &tooltip, &badge] {
            set_visible(surface, false)?;
            container.append_child(surface)?;
        }

        Ok(Self {
            document: document.clone(),
            modal,
            name_input,
            composer,
            composer_preview,
            draft,
            submit,
            tooltip,
            badge,
            composer_was_open: Cell::new(false),
            rendered_tooltip: RefCell::new(None),
            _listeners: listeners,
        })
    }

    /// Bring every surface in line with `state`.
    pub fn update(&self, state: &UiState) -> Result<(), JsValue> {
        // Identity modal
        let modal_was_visible = self.modal.style().get_property_value("display")? != "none";
        set_visible(&self.modal, state.modal_visible())?;
        if state.modal_visible() && !modal_was_visible {
            self.name_input.focus()?;
        }

        // Composer
        match state.visible_composer() {
            Some(composer) => {
                set_visible(&self.composer, true)?;
                place(&self.composer, composer.selection.anchor)?;
                self.composer_preview
                    .set_text_content(Some(&preview(&composer.selection.text)));
                if self.draft.value() != composer.draft {
                    self.draft.set_value(&composer.draft);
                }
                self.submit.set_disabled(composer.in_flight);
                if !self.composer_was_open.replace(true) {
                    self.draft.focus()?;
                }
            }
            None => {
                set_visible(&self.composer, false)?;
                self.composer_was_open.set(false);
            }
        }

        // Tooltip
        let next = state.visible_tooltip();
        if self.rendered_tooltip.borrow().as_ref() != next {
            match next {
                Some(tooltip) => {
                    self.fill_tooltip(tooltip)?;
                    place(&self.tooltip, tooltip.anchor)?;
                    set_visible(&self.tooltip, true)?;
                }
                None => set_visible(&self.tooltip, false)?,
            }
            *self.rendered_tooltip.borrow_mut() = next.cloned();
        }

        // Badge
        match state.badge_text() {
            Some(text) => {
                self.badge.set_text_content(Some(&text));
                set_visible(&self.badge, true)?;
            }
            None => set_visible(&self.badge, false)?,
        }

        Ok(())
    }

    fn fill_tooltip(&self, tooltip: &TooltipState) -> Result<(), JsValue> {
        self.tooltip.set_text_content(None);

        let header = element(&self.document, "div", "feedback-tooltip-header")?;
        header.set_text_content(Some(&format!("Comments ({})", tooltip.comments.len())));
        self.tooltip.append_child(&header)?;

        for comment in &tooltip.comments {
            let entry = element(&self.document, "div", "feedback-tooltip-comment")?;
            for (class, text) in [
                ("feedback-tooltip-author", comment.author_name.clone()),
                ("feedback-tooltip-text", comment.comment_body.clone()),
                ("feedback-tooltip-time", format_date(&comment.created_at)),
            ] {
                let line = element(&self.document, "div", class)?;
                line.set_text_content(Some(&text));
                entry.append_child(&line)?;
            }
            self.tooltip.append_child(&entry)?;
        }
        Ok(())
    }
}
