use crate::{Command, Event};

/// Handles a command and reports the resulting events.
///
/// Handlers own their collaborators (repositories) and make no transport assumptions;
/// publication of the returned events is the caller's business. The error type is
/// associated so each module keeps its own.
pub trait CommandHandler {
    type Cmd: Command;
    type Ev: Event;
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn handle(&self, command: Self::Cmd) -> Result<Vec<Self::Ev>, Self::Error>;
}

impl<H: CommandHandler + ?Sized> CommandHandler for &H {
    type Cmd = H::Cmd;
    type Ev = H::Ev;
    type Error = H::Error;

    fn handle(&self, command: Self::Cmd) -> Result<Vec<Self::Ev>, Self::Error> {
        (**self).handle(command)
    }
}
