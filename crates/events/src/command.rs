use whippet_core::TenantId;

/// A command: a data-only request to change state.
///
/// Commands carry intent and nothing else. The paired [`CommandHandler`](crate::CommandHandler)
/// performs the write (typically by forwarding to a repository) and reports what happened
/// as events. Commands are rejected with a domain error when invalid.
///
/// Commands must own their data and cross thread boundaries freely, hence the bounds.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable command name (e.g. "salesforce.account.create"), used for logging.
    fn command_type(&self) -> String;

    /// Tenant the command operates on.
    fn tenant_id(&self) -> TenantId;
}
