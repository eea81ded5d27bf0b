//! CQRS scaffolding shared by the Whippet entity modules.
//!
//! Commands are data-only requests; handlers perform the write and report
//! `EntityChanged` events, which infrastructure may publish on an [`EventBus`].

pub mod bus;
pub mod change;
pub mod command;
pub mod crud;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;
pub mod tenant;

pub use bus::{EventBus, Subscription};
pub use change::{ChangeKind, EntityChanged};
pub use command::Command;
pub use crud::{EntityAction, EntityCommand, RepositoryCommandHandler};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::CommandHandler;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use tenant::TenantScoped;
