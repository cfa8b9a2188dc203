use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use super::{Settings, SettingsLoader};

static SETTINGS: Lazy<RwLock<Option<Arc<Settings>>>> = Lazy::new(|| RwLock::new(None));

/// Loads settings and stores them as the process-wide snapshot, replacing
/// any previous one.
pub fn initialize(loader: &SettingsLoader) -> Arc<Settings> {
    let settings = Arc::new(loader.load());
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&settings));
    settings
}

pub fn current() -> Option<Arc<Settings>> {
    SETTINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

pub fn reset() {
    debug!("Clearing process-wide settings");
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = None;
}
