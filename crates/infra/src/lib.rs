//! Infrastructure: configuration, tenant-isolated storage, in-memory repositories and
//! the command dispatcher.

pub mod command_dispatcher;
pub mod config;
pub mod repository;
pub mod store;

mod integration_tests;

pub use command_dispatcher::{CommandDispatcher, DispatchError};
pub use config::{ConfigError, WhippetConfig};
pub use repository::InMemoryRepository;
pub use store::{InMemoryTenantStore, TenantStore};

/// Load configuration from the environment and install tracing accordingly.
pub fn bootstrap() -> Result<WhippetConfig, ConfigError> {
    let config = WhippetConfig::from_env()?;
    whippet_observability::init(&config.log);
    tracing::info!(
        validate_on_write = config.validate_on_write,
        publish_changes = config.publish_changes,
        "whippet configured"
    );
    Ok(config)
}
