use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

use super::discovery::{find_nearest_env_file, find_nearest_env_file_from_cwd, ENV_FILE_NAME};
use crate::error::{Result, SettingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Host,
    Sandboxed,
}

/// Where settings come from. Chosen by the caller when building a
/// [`SettingsLoader`](super::SettingsLoader).
pub trait ExecutionContext: Send + Sync {
    fn kind(&self) -> ContextKind;

    /// Produces the flat key/value mapping for a load.
    fn load_raw(&self) -> BTreeMap<String, String>;

    fn lookup(&self, key: &str) -> Option<String>;

    /// Replaces the whole injected mapping.
    fn configure(&self, _settings: BTreeMap<String, String>) -> Result<()> {
        Err(SettingsError::InjectionUnsupported)
    }
}

/// File system and process environment are available.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    start_dir: Option<PathBuf>,
}

impl HostContext {
    /// Searches upward from the working directory at load time.
    pub fn new() -> Self {
        Self { start_dir: None }
    }

    pub fn with_start_dir(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: Some(start_dir.into()),
        }
    }

    pub fn env_file(&self) -> Option<PathBuf> {
        match &self.start_dir {
            Some(dir) => find_nearest_env_file(dir),
            None => find_nearest_env_file_from_cwd(),
        }
    }
}

impl ExecutionContext for HostContext {
    fn kind(&self) -> ContextKind {
        ContextKind::Host
    }

    fn load_raw(&self) -> BTreeMap<String, String> {
        match self.env_file() {
            Some(path) => {
                let applied = apply_env_file(&path);
                info!("✅ Loaded {} ({} new entries)", path.display(), applied);
            }
            None => debug!(
                "No {} file found, using process environment only",
                ENV_FILE_NAME
            ),
        }

        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Writes every parseable entry of `path` into the process environment.
/// Variables that are already set keep their value. Returns how many
/// entries were applied.
fn apply_env_file(path: &Path) -> usize {
    let entries = match dotenv::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return 0;
        }
    };

    let mut applied = 0;
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                if std::env::var_os(&key).is_none() {
                    std::env::set_var(&key, &value);
                    applied += 1;
                }
            }
            // The offending line is not logged, it may hold a secret.
            Err(dotenv::Error::LineParse(_, index)) => {
                warn!(
                    "Skipping malformed line in {} (error at column {})",
                    path.display(),
                    index
                );
            }
            // The undecodable line has already been consumed by the reader.
            Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::InvalidData => {
                warn!("Skipping line that is not valid UTF-8 in {}", path.display());
            }
            Err(dotenv::Error::Io(e)) => {
                warn!("Stopped reading {}: {}", path.display(), e);
                break;
            }
            Err(e) => warn!("Skipping entry in {}: {}", path.display(), e),
        }
    }

    applied
}

/// No file system access. Serves whatever was last injected.
#[derive(Debug, Default)]
pub struct SandboxedContext {
    injected: RwLock<BTreeMap<String, String>>,
}

impl SandboxedContext {
    pub fn new(settings: BTreeMap<String, String>) -> Self {
        Self {
            injected: RwLock::new(settings),
        }
    }
}

impl ExecutionContext for SandboxedContext {
    fn kind(&self) -> ContextKind {
        ContextKind::Sandboxed
    }

    fn load_raw(&self) -> BTreeMap<String, String> {
        self.injected
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.injected
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn configure(&self, settings: BTreeMap<String, String>) -> Result<()> {
        let mut injected = self
            .injected
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *injected = settings;
        debug!("Injected {} settings", injected.len());
        Ok(())
    }
}
