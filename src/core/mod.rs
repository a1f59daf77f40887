// Core infrastructure module
// Configuration layers, resolved run settings, and progress events

pub mod app_config;
pub mod events;
pub mod settings;
pub mod sync_config;

pub use app_config::{AppConfig, BootstrapSettings, MissingRemotePolicy, SyncDefaults};
pub use events::{EventSink, SyncEvent};
pub use settings::{Overrides, SyncSettings};
pub use sync_config::SyncConfig;
