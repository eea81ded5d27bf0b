use serde::{Deserialize, Serialize};
use uuid::Uuid;

use whippet_core::TenantId;

use crate::{EntityChanged, Event};

/// Envelope for a published event, carrying tenant + routing metadata.
///
/// This is the unit put on the bus. `entity_type`/`entity_id` are duplicated out of the
/// payload so subscribers can route without deserializing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    tenant_id: TenantId,
    event_type: String,

    entity_type: String,
    entity_id: String,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        tenant_id: TenantId,
        event_type: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            tenant_id,
            event_type: event_type.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl EventEnvelope<EntityChanged> {
    /// Wrap a change event with a fresh (time-ordered) event id.
    pub fn wrap(change: EntityChanged) -> Self {
        Self::new(
            Uuid::now_v7(),
            change.tenant_id,
            change.event_type(),
            change.entity_type.clone(),
            change.entity_id.clone(),
            change,
        )
    }
}
