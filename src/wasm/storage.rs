use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

use crate::error::{Result, StudioError};
use crate::handoff::HandoffStore;

/// `localStorage` as a hand-off store.
pub struct LocalStore(Storage);

impl LocalStore {
    pub fn open() -> std::result::Result<Self, JsValue> {
        let storage = window()
            .ok_or("no window")?
            .local_storage()?
            .ok_or("localStorage unavailable")?;
        Ok(Self(storage))
    }
}

impl HandoffStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Quota errors surface here for large stills.
        self.0
            .set_item(key, value)
            .map_err(|e| StudioError::Store(format!("{e:?}")))
    }
}
