//! `EntityChanged`: the single event emitted by repository-forwarding command handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use whippet_core::{Entity, TenantId};

use crate::Event;

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl core::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event: an entity was created, updated or deleted in its repository.
///
/// Carries identity only, never the entity body; consumers re-read the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityChanged {
    pub tenant_id: TenantId,
    pub entity_type: String,
    pub entity_id: String,
    pub change: ChangeKind,
    pub occurred_at: DateTime<Utc>,
}

impl EntityChanged {
    pub fn new<E: Entity>(
        tenant_id: TenantId,
        id: &E::Id,
        change: ChangeKind,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tenant_id,
            entity_type: E::ENTITY_TYPE.to_string(),
            entity_id: id.to_string(),
            change,
            occurred_at,
        }
    }

    /// Whether this change concerns entities of type `E`.
    pub fn is_for<E: Entity>(&self) -> bool {
        self.entity_type == E::ENTITY_TYPE
    }
}

impl Event for EntityChanged {
    fn event_type(&self) -> &'static str {
        match self.change {
            ChangeKind::Created => "whippet.entity.created",
            ChangeKind::Updated => "whippet.entity.updated",
            ChangeKind::Deleted => "whippet.entity.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
