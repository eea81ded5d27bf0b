//! Salesforce CRM entities (accounts and contacts) with explicit CQRS commands.

pub mod account;
pub mod commands;
pub mod contact;
pub mod id;
pub mod repository;

pub use account::{SalesforceAccount, SalesforceAccountRecord, ToSalesforceAccount};
pub use commands::{
    CreateSalesforceAccount, CreateSalesforceContact, DeleteSalesforceAccount,
    DeleteSalesforceContact, SalesforceAccountCommand, SalesforceAccountCommandHandler,
    SalesforceContactCommand, SalesforceContactCommandHandler, UpdateSalesforceAccount,
    UpdateSalesforceContact,
};
pub use contact::{SalesforceContact, SalesforceContactRecord, ToSalesforceContact};
pub use id::SalesforceId;
pub use repository::{SalesforceAccountRepository, SalesforceContactRepository};
