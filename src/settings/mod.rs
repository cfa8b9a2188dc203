//! Dotenv-backed settings.
//!
//! A [`SettingsLoader`] is built around an [`ExecutionContext`]:
//! [`HostContext`] reads the nearest `.env` into the process environment,
//! [`SandboxedContext`] serves an injected mapping. Every load produces an
//! immutable [`Settings`] snapshot holding the flat mapping together with
//! the [`NamespacedSettings`] derived from dotted keys.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, SettingsError};

mod context;
mod discovery;
mod global;
pub mod keys;
mod namespace;

pub use context::{ContextKind, ExecutionContext, HostContext, SandboxedContext};
pub use discovery::{
    find_nearest_env_file, find_nearest_env_file_from_cwd, find_nearest_with, ENV_FILE_NAME,
};
pub use global::{current, initialize, reset};
pub use namespace::{split_namespaced_key, NamespacedSettings, LEGACY_NAMESPACE_PREFIX};

use keys::{model_override_key, ModelTier, Provider};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    flat: BTreeMap<String, String>,
    namespaced: NamespacedSettings,
}

impl Settings {
    pub fn new(flat: BTreeMap<String, String>) -> Self {
        let namespaced = NamespacedSettings::from_flat(&flat);
        Self { flat, namespaced }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.flat.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.flat.contains_key(key)
    }

    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse::<T>()
                    .map_err(|e| SettingsError::InvalidValue {
                        key: key.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(SettingsError::InvalidValue {
                key: key.to_string(),
                reason: "expected a boolean".to_string(),
            }),
        }
    }

    pub fn model_override(&self, provider: Provider, tier: ModelTier) -> Option<&str> {
        self.get(&model_override_key(provider, tier))
    }

    pub fn flat(&self) -> &BTreeMap<String, String> {
        &self.flat
    }

    pub fn namespaced(&self) -> &NamespacedSettings {
        &self.namespaced
    }

    pub fn namespace(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.namespaced.get(name)
    }

    /// Flat mapping plus one `__namespaced_<namespace>` JSON entry per
    /// namespace. The snapshot itself never contains these keys.
    pub fn legacy_flat(&self) -> Result<BTreeMap<String, String>> {
        let mut flat = self.flat.clone();
        flat.extend(self.namespaced.to_legacy_entries()?);
        Ok(flat)
    }

    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

#[derive(Clone)]
pub struct SettingsLoader {
    context: Arc<dyn ExecutionContext>,
}

impl SettingsLoader {
    pub fn new(context: Arc<dyn ExecutionContext>) -> Self {
        Self { context }
    }

    pub fn host() -> Self {
        Self::new(Arc::new(HostContext::new()))
    }

    pub fn sandboxed(settings: BTreeMap<String, String>) -> Self {
        Self::new(Arc::new(SandboxedContext::new(settings)))
    }

    pub fn kind(&self) -> ContextKind {
        self.context.kind()
    }

    pub fn load(&self) -> Settings {
        let settings = Settings::new(self.context.load_raw());
        info!(
            "Settings loaded ({:?} context): {} keys, {} namespaces",
            self.context.kind(),
            settings.len(),
            settings.namespaced().len()
        );
        settings
    }

    /// Reads the live source, not a previous snapshot.
    pub fn get(&self, key: &str) -> Option<String> {
        self.context.lookup(key)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn has(&self, key: &str) -> bool {
        self.context.lookup(key).is_some()
    }

    pub fn configure(&self, settings: BTreeMap<String, String>) -> Result<()> {
        self.context.configure(settings)
    }
}

impl std::fmt::Debug for SettingsLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsLoader")
            .field("kind", &self.context.kind())
            .finish()
    }
}
