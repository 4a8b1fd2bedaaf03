//! Settings-store seam
//!
//! The core only persists two things, and it does neither itself: the
//! last-connected printer address and the selected paper profile. The host
//! application supplies an opaque key-value store; an in-memory impl is
//! provided for hosts without persistence and for tests.

use std::collections::HashMap;
use std::sync::Mutex;

/// Key for the last successfully connected printer address
pub const KEY_LAST_DEVICE_ADDR: &str = "printer.last_device_addr";
/// Key for the selected paper width ("58" / "80")
pub const KEY_PAPER_WIDTH: &str = "printer.paper_width";

/// Opaque key-value store owned by the host application.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory settings store.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("settings lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("settings lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}
