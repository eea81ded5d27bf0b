//! Command execution pipeline.
//!
//! ```text
//! Command
//!   ↓
//! 1. Handle (handler validates and writes through its repository)
//!   ↓
//! 2. Publish each EntityChanged on the bus, wrapped in an EventEnvelope
//! ```
//!
//! Repositories are the source of truth. When publication fails the write has already
//! happened; the error is still reported so callers can re-announce the change.

use thiserror::Error;

use whippet_core::DomainError;
use whippet_events::{Command, CommandHandler, EntityChanged, EventBus, EventEnvelope};

use crate::config::WhippetConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthorized")]
    Unauthorized,
    /// Publication failed after a successful write.
    #[error("publish failed: {0}")]
    Publish(String),
}

impl From<DomainError> for DispatchError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => DispatchError::Validation(msg),
            DomainError::InvariantViolation(msg) => DispatchError::InvariantViolation(msg),
            DomainError::InvalidId(msg) => DispatchError::InvalidId(msg),
            DomainError::NotFound => DispatchError::NotFound,
            DomainError::Conflict(msg) => DispatchError::Conflict(msg),
            DomainError::Unauthorized => DispatchError::Unauthorized,
        }
    }
}

/// Runs command handlers and announces the resulting changes.
#[derive(Debug)]
pub struct CommandDispatcher<B> {
    bus: B,
    publish_changes: bool,
}

impl<B> CommandDispatcher<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            publish_changes: true,
        }
    }

    pub fn from_config(bus: B, config: &WhippetConfig) -> Self {
        Self {
            bus,
            publish_changes: config.publish_changes,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }
}

impl<B> CommandDispatcher<B>
where
    B: EventBus<EventEnvelope<EntityChanged>>,
{
    /// Handle `command` with `handler`, then publish every produced change.
    ///
    /// Returns the changes in the order the handler reported them.
    pub fn dispatch<H>(&self, handler: &H, command: H::Cmd) -> Result<Vec<EntityChanged>, DispatchError>
    where
        H: CommandHandler<Ev = EntityChanged>,
        H::Error: Into<DispatchError>,
    {
        let command_type = command.command_type();
        let tenant_id = command.tenant_id();
        let span = tracing::info_span!("dispatch", command_type = %command_type, tenant_id = %tenant_id);
        let _entered = span.enter();

        let changes = handler.handle(command).map_err(|e| {
            let err: DispatchError = e.into();
            tracing::info!(error = %err, "command rejected");
            err
        })?;

        for change in &changes {
            if change.tenant_id != tenant_id {
                tracing::warn!(
                    change_tenant = %change.tenant_id,
                    "handler reported a change for another tenant"
                );
            }
        }

        if self.publish_changes {
            for change in &changes {
                let envelope = EventEnvelope::<EntityChanged>::wrap(change.clone());
                self.bus.publish(envelope).map_err(|e| {
                    tracing::warn!(
                        entity_type = %change.entity_type,
                        entity_id = %change.entity_id,
                        error = %e,
                        "failed to publish change"
                    );
                    DispatchError::Publish(e.to_string())
                })?;
            }
        }

        tracing::debug!(changes = changes.len(), "command handled");
        Ok(changes)
    }
}
