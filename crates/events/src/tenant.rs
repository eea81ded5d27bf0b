use whippet_core::TenantId;

use crate::EventEnvelope;

/// Helper trait for tenant-scoped messages.
///
/// Lets infrastructure filter or reject messages by tenant without knowing their
/// concrete type (e.g. a sync worker pinned to one tenant dropping foreign envelopes).
pub trait TenantScoped {
    fn tenant_id(&self) -> TenantId;
}

impl<E> TenantScoped for EventEnvelope<E> {
    fn tenant_id(&self) -> TenantId {
        EventEnvelope::tenant_id(self)
    }
}

/// Keep only the messages belonging to `tenant_id`.
pub fn for_tenant<M: TenantScoped>(tenant_id: TenantId, messages: Vec<M>) -> Vec<M> {
    messages
        .into_iter()
        .filter(|m| m.tenant_id() == tenant_id)
        .collect()
}


#[cfg(test)]
mod tests {
    use chrono::Utc;
    use whippet_core::{Entity, EntityId};

    use super::*;
    use crate::{ChangeKind, EntityChanged};

    struct Marker;

    impl Entity for Marker {
        type Id = EntityId;
        const ENTITY_TYPE: &'static str = "test.marker";

        fn id(&self) -> &EntityId {
            unreachable!()
        }
    }

    fn envelope(tenant_id: TenantId) -> EventEnvelope<EntityChanged> {
        EventEnvelope::wrap(EntityChanged::new::<Marker>(
            tenant_id,
            &EntityId::new(),
            ChangeKind::Updated,
            Utc::now(),
        ))
    }

    #[test]
    fn for_tenant_drops_foreign_envelopes() {
        let mine = TenantId::new();
        let other = TenantId::new();
        let kept = for_tenant(mine, vec![envelope(mine), envelope(other), envelope(mine)]);

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| TenantScoped::tenant_id(e) == mine));
        assert_eq!(kept[0].event_type(), "whippet.entity.updated");
        assert_eq!(kept[0].entity_type(), "test.marker");
    }
}
