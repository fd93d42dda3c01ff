//! Display-name persistence in `localStorage`

use feedback_core::{DisplayName, NameStore, NAME_STORAGE_KEY};
use web_sys::{Storage, Window};

pub struct LocalNameStore {
    storage: Option<Storage>,
}

impl LocalNameStore {
    /// Storage can be missing (privacy modes, sandboxed iframes); the widget
    /// then asks for a name on every visit.
    pub fn open(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl NameStore for LocalNameStore {
    fn load(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(NAME_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, name: &DisplayName) -> Result<(), String> {
        let storage = self.storage.as_ref().ok_or("localStorage is unavailable")?;
        storage
            .set_item(NAME_STORAGE_KEY, name.as_str())
            .map_err(|e| format!("Failed to store display name: {:?}", e))
    }
}
