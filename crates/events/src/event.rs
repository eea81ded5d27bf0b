use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are immutable facts about something that already happened (a record was
/// written, a record was removed). They carry a stable type name and a schema version so
/// consumers can evolve independently of producers.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "whippet.entity.created").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
