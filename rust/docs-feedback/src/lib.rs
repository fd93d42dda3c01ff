//! Docs Feedback: text-selection comments for documentation pages
//!
//! The Rust/WASM widget around `feedback-core`. Readers select text, leave a
//! comment, and every commented fragment is highlighted for later visitors.
//!
//! # Architecture
//! - `store.rs` - Comment Store Client (PostgREST over `gloo-net`)
//! - `storage.rs` - Display-name persistence in `localStorage`
//! - `dom/` - `DomSurface` for the reconciler, marker hover wiring
//! - `capture.rs` - Selection Capture listeners
//! - `view.rs` - Identity modal, composer, tooltip and badge
//! - `styles.rs` - Injected stylesheet and widget container
//! - `widget.rs` - Runtime: state, dispatch, effects
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! // Default build: mounts itself with the build-time store configuration.
//! import init from 'docs-feedback';
//! await init();
//!
//! // Built without `auto-mount`:
//! import init, { mount } from 'docs-feedback';
//! await init();
//! mount({ storeUrl: 'https://xyz.supabase.co', anonKey: '...' });
//! ```

pub mod capture;
pub mod dom;
pub mod storage;
pub mod store;
pub mod styles;
pub mod view;
pub mod widget;

use feedback_core::StoreConfig;
use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Install the panic hook and, with `auto-mount`, start the widget
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "auto-mount")]
    boot(StoreConfig::from_build_env());
}

/// Mount now, or once `DOMContentLoaded` fires if the page is still loading.
#[cfg(feature = "auto-mount")]
fn boot(config: StoreConfig) {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        web_sys::console::error_1(&"[DocsFeedback] No document; widget disabled".into());
        return;
    };

    if document.ready_state() == "loading" {
        let start = Closure::once_into_js(move || mount_logged(config));
        if let Err(e) = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            start.unchecked_ref::<js_sys::Function>(),
        ) {
            web_sys::console::error_1(&format!("[DocsFeedback] Failed to defer mount: {:?}", e).into());
        }
    } else {
        mount_logged(config);
    }
}

#[cfg(feature = "auto-mount")]
fn mount_logged(config: StoreConfig) {
    if let Err(e) = widget::mount(config) {
        web_sys::console::error_1(&format!("[DocsFeedback] Failed to initialize: {:?}", e).into());
    }
}

/// Mount with an explicit `{ storeUrl, anonKey, table }` object.
/// Missing fields (or no argument) fall back to the build-time values.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        StoreConfig::from_build_env()
    } else {
        serde_wasm_bindgen::from_value::<StoreConfig>(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
    };
    widget::mount(config)
}

/// Re-fetch comments and re-highlight the page
#[wasm_bindgen]
pub fn reload() -> Result<(), JsValue> {
    widget::reload()
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("docs-feedback v{} ({})", env!("CARGO_PKG_VERSION"), feedback_core::version())
}
