//! Integration tests for the command pipeline across domains.
//!
//! Tests: Command → Handler → InMemoryRepository, then EventBus → change log.
//! Each test closes the bus and joins the subscriber before inspecting the log.
//!
//! Verifies:
//! - Handlers write through to repositories and the domain queries see the writes
//! - Every successful write is announced exactly once
//! - Tenant isolation is preserved end to end

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread::JoinHandle;
    use std::time::Duration;

    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use whippet_core::{Repository, TenantId};
    use whippet_events::{
        ChangeKind, EntityChanged, EntityCommand, EventBus, EventEnvelope, InMemoryEventBus,
        RepositoryCommandHandler,
    };
    use whippet_magento::{TaxRate, TaxRateRepository};
    use whippet_mom::{MomCustomer, MomCustomerRepository, MomOrder, MomOrderLine, MomOrderRepository};
    use whippet_salesforce::{
        CreateSalesforceAccount, CreateSalesforceContact, SalesforceAccount,
        SalesforceAccountCommand, SalesforceAccountCommandHandler, SalesforceContact,
        SalesforceContactCommand, SalesforceContactCommandHandler, SalesforceContactRepository,
    };

    use crate::command_dispatcher::{CommandDispatcher, DispatchError};
    use crate::repository::InMemoryRepository;
    use crate::store::{InMemoryTenantStore, TenantStore};

    type Bus = Arc<InMemoryEventBus<EventEnvelope<EntityChanged>>>;
    type ChangeLog = Arc<InMemoryTenantStore<Uuid, EventEnvelope<EntityChanged>>>;

    fn test_tenant_id() -> TenantId {
        TenantId::new()
    }

    fn setup() -> (CommandDispatcher<Bus>, ChangeLog, JoinHandle<()>) {
        let bus: Bus = Arc::new(InMemoryEventBus::new());
        let log: ChangeLog = Arc::new(InMemoryTenantStore::new());

        // Subscribe before anything is published.
        let log_clone = log.clone();
        let bus_clone = bus.clone();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<()>();
        let worker = std::thread::spawn(move || {
            let sub = bus_clone.subscribe();
            let _ = ready_tx.send(());
            while let Ok(env) = sub.recv() {
                log_clone.upsert(env.tenant_id(), env.event_id(), env);
            }
        });
        let _ = ready_rx.recv_timeout(Duration::from_secs(1));

        (CommandDispatcher::new(bus), log, worker)
    }

    /// Closes the bus and waits until the subscriber has applied everything published.
    fn finish(dispatcher: &CommandDispatcher<Bus>, worker: JoinHandle<()>) {
        dispatcher.bus().close();
        worker.join().unwrap();
    }

    fn kinds(log: &ChangeLog, tenant_id: TenantId) -> Vec<(String, ChangeKind)> {
        log.list(tenant_id)
            .into_iter()
            .map(|env| (env.entity_type().to_string(), env.payload().change))
            .collect()
    }

    #[test]
    fn mom_customer_and_order_flow() {
        let (dispatcher, log, worker) = setup();
        let tenant_id = test_tenant_id();
        let customers = Arc::new(InMemoryRepository::<MomCustomer>::new());
        let orders = Arc::new(InMemoryRepository::<MomOrder>::new());
        let customer_handler = RepositoryCommandHandler::new(customers.clone());
        let order_handler = RepositoryCommandHandler::new(orders.clone());

        let customer = MomCustomer::new(1001, "Jane", "Doe");
        dispatcher
            .dispatch(&customer_handler, EntityCommand::create(tenant_id, customer.clone()))
            .unwrap();

        let order = MomOrder::new(5001, 1001, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_line(MomOrderLine::new("WIDGET-1", 2, Decimal::new(1250, 2)));
        dispatcher
            .dispatch(&order_handler, EntityCommand::create(tenant_id, order.clone()))
            .unwrap();

        assert_eq!(
            customers.find_by_customer_number(tenant_id, 1001).unwrap(),
            Some(customer)
        );
        let listed = orders.list_for_customer(tenant_id, 1001).unwrap();
        assert_eq!(listed, vec![order.clone()]);
        assert_eq!(listed[0].order_total().unwrap(), Decimal::new(2500, 2));

        finish(&dispatcher, worker);
        assert_eq!(
            kinds(&log, tenant_id),
            vec![
                ("mom.customer".to_string(), ChangeKind::Created),
                ("mom.order".to_string(), ChangeKind::Created),
            ]
        );
    }

    #[test]
    fn update_and_delete_are_announced() {
        let (dispatcher, log, worker) = setup();
        let tenant_id = test_tenant_id();
        let orders = Arc::new(InMemoryRepository::<MomOrder>::new());
        let handler = RepositoryCommandHandler::new(orders.clone());

        let mut order = MomOrder::new(7, 1, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        dispatcher
            .dispatch(&handler, EntityCommand::create(tenant_id, order.clone()))
            .unwrap();
        order.ship_method = Some("UPS".into());
        dispatcher
            .dispatch(&handler, EntityCommand::update(tenant_id, order.clone()))
            .unwrap();
        assert_eq!(
            orders.find_by_order_number(tenant_id, 7).unwrap().unwrap().ship_method.as_deref(),
            Some("UPS")
        );
        dispatcher
            .dispatch(&handler, EntityCommand::<MomOrder>::delete(tenant_id, order.id))
            .unwrap();
        assert!(orders.list(tenant_id).unwrap().is_empty());

        finish(&dispatcher, worker);
        let changes: Vec<ChangeKind> = kinds(&log, tenant_id).into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            changes,
            vec![ChangeKind::Created, ChangeKind::Updated, ChangeKind::Deleted]
        );
    }

    #[test]
    fn salesforce_contact_requires_account() {
        let (dispatcher, log, worker) = setup();
        let tenant_id = test_tenant_id();
        let accounts = Arc::new(InMemoryRepository::<SalesforceAccount>::new());
        let contacts = Arc::new(InMemoryRepository::<SalesforceContact>::new());
        let account_handler = SalesforceAccountCommandHandler::new(accounts.clone());
        let contact_handler = SalesforceContactCommandHandler::new(contacts.clone(), accounts);
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let account = SalesforceAccount::new("Acme Corp");
        let contact = SalesforceContact::new("Doe")
            .with_email("john.doe@acme.example")
            .for_account(account.id);

        let err = dispatcher
            .dispatch(
                &contact_handler,
                SalesforceContactCommand::Create(CreateSalesforceContact {
                    tenant_id,
                    contact: contact.clone(),
                    occurred_at: at,
                }),
            )
            .unwrap_err();
        assert_eq!(err, DispatchError::NotFound);

        dispatcher
            .dispatch(
                &account_handler,
                SalesforceAccountCommand::Create(CreateSalesforceAccount {
                    tenant_id,
                    account: account.clone(),
                    occurred_at: at,
                }),
            )
            .unwrap();
        let changes = dispatcher
            .dispatch(
                &contact_handler,
                SalesforceContactCommand::Create(CreateSalesforceContact {
                    tenant_id,
                    contact: contact.clone(),
                    occurred_at: at,
                }),
            )
            .unwrap();
        assert_eq!(changes[0].occurred_at, at);

        assert_eq!(
            contacts.find_by_email(tenant_id, "JOHN.DOE@acme.example").unwrap(),
            Some(contact)
        );

        finish(&dispatcher, worker);
        assert_eq!(
            kinds(&log, tenant_id),
            vec![
                ("salesforce.account".to_string(), ChangeKind::Created),
                ("salesforce.contact".to_string(), ChangeKind::Created),
            ]
        );
    }

    #[test]
    fn tenant_isolation_is_preserved() {
        let (dispatcher, log, worker) = setup();
        let tenant_a = test_tenant_id();
        let tenant_b = test_tenant_id();
        let rates = Arc::new(InMemoryRepository::<TaxRate>::new());
        let handler = RepositoryCommandHandler::new(rates.clone());

        let rate = TaxRate::new("US-OH", "US", Decimal::new(575, 2)).with_region(47, "OH");
        dispatcher
            .dispatch(&handler, EntityCommand::create(tenant_a, rate.clone()))
            .unwrap();

        assert_eq!(rates.find_by_code(tenant_b, "US-OH").unwrap(), None);
        let err = dispatcher
            .dispatch(&handler, EntityCommand::update(tenant_b, rate.clone()))
            .unwrap_err();
        assert_eq!(err, DispatchError::NotFound);

        let stored = rates.find_by_code(tenant_a, "US-OH").unwrap().unwrap();
        assert_eq!(
            stored.to_magento_json_string().unwrap(),
            rate.to_magento_json_string().unwrap()
        );

        finish(&dispatcher, worker);
        assert_eq!(log.list(tenant_a).len(), 1);
        assert!(log.list(tenant_b).is_empty());
    }

    #[test]
    fn published_envelopes_serialize_for_transport() {
        let (dispatcher, log, worker) = setup();
        let tenant_id = test_tenant_id();
        let handler = RepositoryCommandHandler::new(Arc::new(InMemoryRepository::<MomCustomer>::new()));

        dispatcher
            .dispatch(&handler, EntityCommand::create(tenant_id, MomCustomer::new(9, "Al", "Smith")))
            .unwrap();

        finish(&dispatcher, worker);
        let envelope = log.list(tenant_id).into_iter().next().unwrap();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event_type"], "whippet.entity.created");
        assert_eq!(json["payload"]["change"], "created");
        assert_eq!(json["payload"]["entity_type"], "mom.customer");
    }
}
