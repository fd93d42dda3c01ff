//! Injected stylesheet

use feedback_core::CONTAINER_ID;
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub const STYLE_ID: &str = "docs-feedback-styles";

const STYLES: &str = r#"
#docs-feedback-widget {
  position: fixed;
  z-index: 9999;
}

.feedback-overlay {
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  bottom: 0;
  background: rgba(0, 0, 0, 0.5);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 10000;
}

.feedback-auth-modal {
  background: white;
  padding: 2rem;
  border-radius: 8px;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
  max-width: 400px;
  width: 90%;
}

.feedback-auth-modal h3 {
  margin: 0 0 1.5rem 0;
  font-size: 1.2rem;
  color: #333;
}

.feedback-auth-modal input {
  width: 100%;
  padding: 0.75rem;
  border: 1px solid #ddd;
  border-radius: 4px;
  font-size: 1rem;
  margin-bottom: 1rem;
  box-sizing: border-box;
}

.feedback-auth-modal button {
  width: 100%;
  padding: 0.75rem;
  background: #0066cc;
  color: white;
  border: none;
  border-radius: 4px;
  font-size: 1rem;
  cursor: pointer;
}

.feedback-auth-modal button:hover {
  background: #0052a3;
}

.feedback-comment-popup {
  position: fixed;
  background: white;
  border: 1px solid #ddd;
  border-radius: 8px;
  padding: 1rem;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
  min-width: 300px;
  z-index: 10001;
  transform: translateX(-50%) translateY(-100%);
}

.feedback-selected-text {
  font-size: 0.85rem;
  color: #666;
  margin-bottom: 0.75rem;
  padding: 0.5rem;
  background: #f5f5f5;
  border-radius: 4px;
  max-height: 60px;
  overflow-y: auto;
  line-height: 1.4;
  word-break: break-word;
}

.feedback-comment-popup textarea {
  width: 100%;
  min-height: 80px;
  padding: 0.5rem;
  border: 1px solid #ddd;
  border-radius: 4px;
  font-size: 0.9rem;
  resize: vertical;
  font-family: inherit;
  box-sizing: border-box;
}

.feedback-actions {
  display: flex;
  gap: 0.5rem;
  margin-top: 0.75rem;
  justify-content: flex-end;
}

.feedback-actions button {
  padding: 0.5rem 1rem;
  border: 1px solid #ddd;
  border-radius: 4px;
  background: white;
  cursor: pointer;
  font-size: 0.9rem;
}

.feedback-actions button.primary {
  background: #0066cc;
  color: white;
  border-color: #0066cc;
}

.feedback-actions button:disabled {
  opacity: 0.6;
  cursor: wait;
}

.feedback-highlight {
  background: #fff3cd;
  padding: 2px 0;
  border-bottom: 2px solid #ffc107;
  cursor: pointer;
}

.feedback-indicator {
  position: fixed;
  bottom: 20px;
  right: 20px;
  background: #333;
  color: white;
  padding: 0.5rem 1rem;
  border-radius: 20px;
  font-size: 0.85rem;
  opacity: 0.8;
}

.feedback-tooltip {
  position: fixed;
  background: white;
  border: 1px solid #ddd;
  border-radius: 8px;
  padding: 0.75rem;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
  max-width: 350px;
  z-index: 10002;
  transform: translateX(-50%) translateY(-100%);
}

.feedback-tooltip-header {
  font-weight: 600;
  color: #333;
  margin-bottom: 0.5rem;
  font-size: 0.9rem;
}

.feedback-tooltip-comment {
  padding: 0.5rem 0;
  border-bottom: 1px solid #eee;
}

.feedback-tooltip-comment:last-child {
  border-bottom: none;
}

.feedback-tooltip-author {
  font-weight: 500;
  color: #0066cc;
  font-size: 0.85rem;
  margin-bottom: 0.25rem;
}

.feedback-tooltip-text {
  color: #333;
  font-size: 0.9rem;
  margin-bottom: 0.25rem;
}

.feedback-tooltip-time {
  color: #999;
  font-size: 0.75rem;
}
"#;

/// Add the stylesheet to `<head>` unless a previous mount already did.
pub fn inject(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(STYLES));
    head.append_child(&style)?;
    Ok(())
}

/// The widget container, created on first mount.
pub fn container(document: &Document) -> Result<web_sys::Element, JsValue> {
    if let Some(existing) = document.get_element_by_id(CONTAINER_ID) {
        return Ok(existing);
    }
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let container = document.create_element("div")?;
    container.set_id(CONTAINER_ID);
    body.append_child(&container)?;
    Ok(container)
}
