//! Navigation handle passed to the unauthorized hook.
//!
//! The client never reads or changes the location itself; it only hands it
//! to the configured hook (typically to redirect to a login route).

use std::sync::Mutex;

pub trait Location: Send + Sync {
    /// Current route path.
    fn path(&self) -> String;
    /// Navigate to `path`.
    fn set_path(&self, path: &str);
}

/// In-process location holding the current path.
#[derive(Debug)]
pub struct MemoryLocation {
    path: Mutex<String>,
}

impl MemoryLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Mutex::new(path.into()),
        }
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> String {
        self.path.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_path(&self, path: &str) {
        let mut current = self.path.lock().unwrap_or_else(|e| e.into_inner());
        tracing::debug!(from = %current, to = %path, "location change");
        *current = path.to_string();
    }
}
