//! Explicit Salesforce commands and their handlers.
//!
//! Unlike the generic CRUD commands, these enforce cross-entity rules: Salesforce ids are
//! unique per tenant, and a contact may only point at an existing account.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use whippet_core::{DomainError, Entity, EntityId, TenantId, Validate};
use whippet_events::{ChangeKind, Command, CommandHandler, EntityChanged};

use crate::{
    SalesforceAccount, SalesforceAccountRepository, SalesforceContact,
    SalesforceContactRepository,
};

/// Command: CreateSalesforceAccount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSalesforceAccount {
    pub tenant_id: TenantId,
    pub account: SalesforceAccount,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateSalesforceAccount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSalesforceAccount {
    pub tenant_id: TenantId,
    pub account: SalesforceAccount,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteSalesforceAccount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSalesforceAccount {
    pub tenant_id: TenantId,
    pub account_id: EntityId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesforceAccountCommand {
    Create(CreateSalesforceAccount),
    Update(UpdateSalesforceAccount),
    Delete(DeleteSalesforceAccount),
}

impl Command for SalesforceAccountCommand {
    fn command_type(&self) -> String {
        match self {
            SalesforceAccountCommand::Create(_) => "salesforce.account.create",
            SalesforceAccountCommand::Update(_) => "salesforce.account.update",
            SalesforceAccountCommand::Delete(_) => "salesforce.account.delete",
        }
        .to_string()
    }

    fn tenant_id(&self) -> TenantId {
        match self {
            SalesforceAccountCommand::Create(cmd) => cmd.tenant_id,
            SalesforceAccountCommand::Update(cmd) => cmd.tenant_id,
            SalesforceAccountCommand::Delete(cmd) => cmd.tenant_id,
        }
    }
}

/// Command: CreateSalesforceContact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSalesforceContact {
    pub tenant_id: TenantId,
    pub contact: SalesforceContact,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateSalesforceContact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSalesforceContact {
    pub tenant_id: TenantId,
    pub contact: SalesforceContact,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteSalesforceContact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSalesforceContact {
    pub tenant_id: TenantId,
    pub contact_id: EntityId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesforceContactCommand {
    Create(CreateSalesforceContact),
    Update(UpdateSalesforceContact),
    Delete(DeleteSalesforceContact),
}

impl Command for SalesforceContactCommand {
    fn command_type(&self) -> String {
        match self {
            SalesforceContactCommand::Create(_) => "salesforce.contact.create",
            SalesforceContactCommand::Update(_) => "salesforce.contact.update",
            SalesforceContactCommand::Delete(_) => "salesforce.contact.delete",
        }
        .to_string()
    }

    fn tenant_id(&self) -> TenantId {
        match self {
            SalesforceContactCommand::Create(cmd) => cmd.tenant_id,
            SalesforceContactCommand::Update(cmd) => cmd.tenant_id,
            SalesforceContactCommand::Delete(cmd) => cmd.tenant_id,
        }
    }
}

/// Forwards account commands to a [`SalesforceAccountRepository`].
///
/// Creates and updates run the Salesforce-id check and the write under one lock, so
/// the id stays unique among writers sharing this handler. Other writers to the same
/// repository are not coordinated with.
#[derive(Debug)]
pub struct SalesforceAccountCommandHandler<R> {
    accounts: R,
    writes: Mutex<()>,
}

impl<R: SalesforceAccountRepository> SalesforceAccountCommandHandler<R> {
    pub fn new(accounts: R) -> Self {
        Self {
            accounts,
            writes: Mutex::new(()),
        }
    }

    fn ensure_salesforce_id_free(
        &self,
        tenant_id: TenantId,
        account: &SalesforceAccount,
    ) -> Result<(), DomainError> {
        if let Some(sf_id) = &account.salesforce_id {
            if let Some(existing) = self.accounts.find_by_salesforce_id(tenant_id, sf_id)? {
                if existing.id != account.id {
                    return Err(DomainError::conflict(format!(
                        "salesforce id {sf_id} already belongs to account {}",
                        existing.id
                    )));
                }
            }
        }
        Ok(())
    }

    fn handle_create(&self, cmd: CreateSalesforceAccount) -> Result<Vec<EntityChanged>, DomainError> {
        cmd.account.validate()?;
        let _write = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_salesforce_id_free(cmd.tenant_id, &cmd.account)?;
        let stored = self.accounts.create(cmd.tenant_id, cmd.account)?;
        Ok(vec![changed(cmd.tenant_id, &stored, ChangeKind::Created, cmd.occurred_at)])
    }

    fn handle_update(&self, cmd: UpdateSalesforceAccount) -> Result<Vec<EntityChanged>, DomainError> {
        cmd.account.validate()?;
        let _write = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_salesforce_id_free(cmd.tenant_id, &cmd.account)?;
        let stored = self.accounts.update(cmd.tenant_id, cmd.account)?;
        Ok(vec![changed(cmd.tenant_id, &stored, ChangeKind::Updated, cmd.occurred_at)])
    }

    fn handle_delete(&self, cmd: DeleteSalesforceAccount) -> Result<Vec<EntityChanged>, DomainError> {
        self.accounts.delete(cmd.tenant_id, &cmd.account_id)?;
        Ok(vec![EntityChanged::new::<SalesforceAccount>(
            cmd.tenant_id,
            &cmd.account_id,
            ChangeKind::Deleted,
            cmd.occurred_at,
        )])
    }
}

impl<R: SalesforceAccountRepository> CommandHandler for SalesforceAccountCommandHandler<R> {
    type Cmd = SalesforceAccountCommand;
    type Ev = EntityChanged;
    type Error = DomainError;

    fn handle(&self, command: Self::Cmd) -> Result<Vec<Self::Ev>, Self::Error> {
        match command {
            SalesforceAccountCommand::Create(cmd) => self.handle_create(cmd),
            SalesforceAccountCommand::Update(cmd) => self.handle_update(cmd),
            SalesforceAccountCommand::Delete(cmd) => self.handle_delete(cmd),
        }
    }
}

/// Forwards contact commands to a [`SalesforceContactRepository`], checking the referenced
/// account in a [`SalesforceAccountRepository`].
#[derive(Debug)]
pub struct SalesforceContactCommandHandler<R, A> {
    contacts: R,
    accounts: A,
}

impl<R, A> SalesforceContactCommandHandler<R, A>
where
    R: SalesforceContactRepository,
    A: SalesforceAccountRepository,
{
    pub fn new(contacts: R, accounts: A) -> Self {
        Self { contacts, accounts }
    }

    fn ensure_account_exists(
        &self,
        tenant_id: TenantId,
        contact: &SalesforceContact,
    ) -> Result<(), DomainError> {
        if let Some(account_id) = contact.account_id {
            if !self.accounts.exists(tenant_id, &account_id)? {
                tracing::debug!(
                    contact_id = %contact.id,
                    account_id = %account_id,
                    "contact references unknown account"
                );
                return Err(DomainError::not_found());
            }
        }
        Ok(())
    }

    fn handle_create(&self, cmd: CreateSalesforceContact) -> Result<Vec<EntityChanged>, DomainError> {
        cmd.contact.validate()?;
        self.ensure_account_exists(cmd.tenant_id, &cmd.contact)?;
        let stored = self.contacts.create(cmd.tenant_id, cmd.contact)?;
        Ok(vec![changed(cmd.tenant_id, &stored, ChangeKind::Created, cmd.occurred_at)])
    }

    fn handle_update(&self, cmd: UpdateSalesforceContact) -> Result<Vec<EntityChanged>, DomainError> {
        cmd.contact.validate()?;
        self.ensure_account_exists(cmd.tenant_id, &cmd.contact)?;
        let stored = self.contacts.update(cmd.tenant_id, cmd.contact)?;
        Ok(vec![changed(cmd.tenant_id, &stored, ChangeKind::Updated, cmd.occurred_at)])
    }

    fn handle_delete(&self, cmd: DeleteSalesforceContact) -> Result<Vec<EntityChanged>, DomainError> {
        self.contacts.delete(cmd.tenant_id, &cmd.contact_id)?;
        Ok(vec![EntityChanged::new::<SalesforceContact>(
            cmd.tenant_id,
            &cmd.contact_id,
            ChangeKind::Deleted,
            cmd.occurred_at,
        )])
    }
}

impl<R, A> CommandHandler for SalesforceContactCommandHandler<R, A>
where
    R: SalesforceContactRepository,
    A: SalesforceAccountRepository,
{
    type Cmd = SalesforceContactCommand;
    type Ev = EntityChanged;
    type Error = DomainError;

    fn handle(&self, command: Self::Cmd) -> Result<Vec<Self::Ev>, Self::Error> {
        match command {
            SalesforceContactCommand::Create(cmd) => self.handle_create(cmd),
            SalesforceContactCommand::Update(cmd) => self.handle_update(cmd),
            SalesforceContactCommand::Delete(cmd) => self.handle_delete(cmd),
        }
    }
}

fn changed<E: Entity>(
    tenant_id: TenantId,
    entity: &E,
    kind: ChangeKind,
    occurred_at: DateTime<Utc>,
) -> EntityChanged {
    EntityChanged::new::<E>(tenant_id, entity.id(), kind, occurred_at)
}
