//! Generic create/update/delete commands and the handler forwarding them to a repository.
//!
//! Most Whippet entities need nothing beyond "persist this record" commands. Instead of a
//! hand-written command triple per entity, `EntityCommand<E>` covers them all and
//! `RepositoryCommandHandler` performs the write. Modules with extra rules (Salesforce
//! contacts must reference an existing account) define their own commands.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};

use whippet_core::{DomainError, Entity, Repository, TenantId, UserId, Validate};

use crate::{ChangeKind, Command, CommandHandler, EntityChanged};

/// The write requested by an [`EntityCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityAction<E: Entity> {
    Create(E),
    Update(E),
    Delete(E::Id),
}

impl<E: Entity> EntityAction<E> {
    pub fn kind(&self) -> ChangeKind {
        match self {
            EntityAction::Create(_) => ChangeKind::Created,
            EntityAction::Update(_) => ChangeKind::Updated,
            EntityAction::Delete(_) => ChangeKind::Deleted,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            EntityAction::Create(_) => "create",
            EntityAction::Update(_) => "update",
            EntityAction::Delete(_) => "delete",
        }
    }
}

/// Command: create, update or delete one entity of type `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCommand<E: Entity> {
    pub tenant_id: TenantId,
    pub issued_by: Option<UserId>,
    pub action: EntityAction<E>,
    pub occurred_at: DateTime<Utc>,
}

impl<E: Entity> EntityCommand<E> {
    pub fn new(tenant_id: TenantId, action: EntityAction<E>) -> Self {
        Self {
            tenant_id,
            issued_by: None,
            action,
            occurred_at: Utc::now(),
        }
    }

    pub fn create(tenant_id: TenantId, entity: E) -> Self {
        Self::new(tenant_id, EntityAction::Create(entity))
    }

    pub fn update(tenant_id: TenantId, entity: E) -> Self {
        Self::new(tenant_id, EntityAction::Update(entity))
    }

    pub fn delete(tenant_id: TenantId, id: E::Id) -> Self {
        Self::new(tenant_id, EntityAction::Delete(id))
    }

    pub fn issued_by(mut self, user_id: UserId) -> Self {
        self.issued_by = Some(user_id);
        self
    }

    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Id of the targeted entity.
    pub fn target_id(&self) -> &E::Id {
        match &self.action {
            EntityAction::Create(e) | EntityAction::Update(e) => e.id(),
            EntityAction::Delete(id) => id,
        }
    }
}

impl<E> Command for EntityCommand<E>
where
    E: Entity + Clone + core::fmt::Debug + Send + Sync + 'static,
    E::Id: Send + Sync + 'static,
{
    fn command_type(&self) -> String {
        format!("{}.{}", E::ENTITY_TYPE, self.action.verb())
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Handler forwarding [`EntityCommand`]s to a repository.
///
/// Create and update validate the entity first (unless disabled); each successful write
/// yields exactly one [`EntityChanged`].
#[derive(Debug)]
pub struct RepositoryCommandHandler<E, R> {
    repository: R,
    validate: bool,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> RepositoryCommandHandler<E, R>
where
    E: Entity,
    R: Repository<E>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            validate: true,
            _entity: PhantomData,
        }
    }

    /// Skip `Validate` before writes (the repository may still validate on its own).
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<E, R> CommandHandler for RepositoryCommandHandler<E, R>
where
    E: Entity + Validate + Clone + core::fmt::Debug + Send + Sync + 'static,
    E::Id: Send + Sync + 'static,
    R: Repository<E>,
{
    type Cmd = EntityCommand<E>;
    type Ev = EntityChanged;
    type Error = DomainError;

    fn handle(&self, command: Self::Cmd) -> Result<Vec<Self::Ev>, Self::Error> {
        let EntityCommand {
            tenant_id,
            action,
            occurred_at,
            ..
        } = command;
        let kind = action.kind();

        let id = match action {
            EntityAction::Create(entity) => {
                if self.validate {
                    entity.validate()?;
                }
                self.repository.create(tenant_id, entity)?.id().clone()
            }
            EntityAction::Update(entity) => {
                if self.validate {
                    entity.validate()?;
                }
                self.repository.update(tenant_id, entity)?.id().clone()
            }
            EntityAction::Delete(id) => {
                self.repository.delete(tenant_id, &id)?;
                id
            }
        };

        tracing::debug!(
            entity_type = E::ENTITY_TYPE,
            entity_id = %id,
            change = %kind,
            "repository write completed"
        );

        Ok(vec![EntityChanged::new::<E>(tenant_id, &id, kind, occurred_at)])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use whippet_core::{DomainResult, EntityId};

    use super::*;
    use crate::Event;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Widget {
        id: EntityId,
        name: String,
    }

    impl Entity for Widget {
        type Id = EntityId;
        const ENTITY_TYPE: &'static str = "test.widget";

        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    impl Validate for Widget {
        fn validate(&self) -> DomainResult<()> {
            whippet_core::validate::require("name", &self.name)
        }
    }

    #[derive(Default)]
    struct MapRepo {
        rows: Mutex<HashMap<(TenantId, EntityId), Widget>>,
    }

    impl Repository<Widget> for MapRepo {
        fn get(&self, tenant_id: TenantId, id: &EntityId) -> DomainResult<Option<Widget>> {
            Ok(self.rows.lock().unwrap().get(&(tenant_id, *id)).cloned())
        }

        fn list(&self, tenant_id: TenantId) -> DomainResult<Vec<Widget>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|((t, _), _)| *t == tenant_id)
                .map(|(_, w)| w.clone())
                .collect())
        }

        fn create(&self, tenant_id: TenantId, entity: Widget) -> DomainResult<Widget> {
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&(tenant_id, entity.id)) {
                return Err(DomainError::conflict("exists"));
            }
            rows.insert((tenant_id, entity.id), entity.clone());
            Ok(entity)
        }

        fn update(&self, tenant_id: TenantId, entity: Widget) -> DomainResult<Widget> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&(tenant_id, entity.id)) {
                Some(row) => {
                    *row = entity.clone();
                    Ok(entity)
                }
                None => Err(DomainError::not_found()),
            }
        }

        fn delete(&self, tenant_id: TenantId, id: &EntityId) -> DomainResult<()> {
            self.rows
                .lock()
                .unwrap()
                .remove(&(tenant_id, *id))
                .map(|_| ())
                .ok_or(DomainError::NotFound)
        }
    }

    fn handler() -> RepositoryCommandHandler<Widget, MapRepo> {
        RepositoryCommandHandler::new(MapRepo::default())
    }

    fn widget(name: &str) -> Widget {
        Widget {
            id: EntityId::new(),
            name: name.to_string(),
        }
    }

    #[test]
    fn command_type_combines_entity_type_and_verb() {
        let tenant = TenantId::new();
        let w = widget("a");
        assert_eq!(EntityCommand::create(tenant, w.clone()).command_type(), "test.widget.create");
        assert_eq!(EntityCommand::update(tenant, w.clone()).command_type(), "test.widget.update");
        assert_eq!(EntityCommand::<Widget>::delete(tenant, w.id).command_type(), "test.widget.delete");
    }

    #[test]
    fn create_forwards_to_repository_and_emits_created() {
        let handler = handler();
        let tenant = TenantId::new();
        let w = widget("gear");

        let events = handler.handle(EntityCommand::create(tenant, w.clone())).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].change, ChangeKind::Created);
        assert_eq!(events[0].entity_id, w.id.to_string());
        assert_eq!(events[0].event_type(), "whippet.entity.created");
        assert!(events[0].is_for::<Widget>());
        assert_eq!(handler.repository().get(tenant, &w.id).unwrap(), Some(w));
    }

    #[test]
    fn invalid_entity_is_rejected_before_reaching_repository() {
        let handler = handler();
        let tenant = TenantId::new();

        let err = handler.handle(EntityCommand::create(tenant, widget(" "))).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(handler.repository().list(tenant).unwrap().is_empty());
    }

    #[test]
    fn without_validation_lets_repository_decide() {
        let handler = handler().without_validation();
        let tenant = TenantId::new();
        assert!(handler.handle(EntityCommand::create(tenant, widget(""))).is_ok());
    }

    #[test]
    fn update_and_delete_of_missing_entity_are_not_found() {
        let handler = handler();
        let tenant = TenantId::new();
        let w = widget("x");

        let err = handler.handle(EntityCommand::update(tenant, w.clone())).unwrap_err();
        assert_eq!(err, DomainError::NotFound);

        let err = handler.handle(EntityCommand::<Widget>::delete(tenant, w.id)).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn delete_emits_deleted_with_command_time() {
        let handler = handler();
        let tenant = TenantId::new();
        let w = widget("x");
        handler.handle(EntityCommand::create(tenant, w.clone())).unwrap();

        let at = Utc::now();
        let events = handler
            .handle(EntityCommand::<Widget>::delete(tenant, w.id).at(at))
            .unwrap();

        assert_eq!(events[0].change, ChangeKind::Deleted);
        assert_eq!(events[0].occurred_at, at);
        assert!(!handler.repository().exists(tenant, &w.id).unwrap());
    }
}
