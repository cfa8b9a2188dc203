pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod settings;

pub use error::{Result, SettingsError};
pub use settings::{
    ContextKind, ExecutionContext, HostContext, NamespacedSettings, SandboxedContext, Settings,
    SettingsLoader,
};
