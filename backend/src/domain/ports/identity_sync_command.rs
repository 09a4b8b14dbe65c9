//! Driving port for applying identity provider events to local users.

use async_trait::async_trait;

use crate::domain::{Error, IdentityEvent, UserId};

/// Effect an identity event had on the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Created(UserId),
    Updated(UserId),
    Deleted(UserId),
    /// The event type is not acted on; carries the type for logging.
    Ignored(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentitySyncCommand: Send + Sync {
    /// Apply exactly one effect for a verified event.
    async fn apply(&self, event: IdentityEvent) -> Result<SyncOutcome, Error>;
}

/// Fixture command that reports every event as ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentitySyncCommand;

#[async_trait]
impl IdentitySyncCommand for FixtureIdentitySyncCommand {
    async fn apply(&self, event: IdentityEvent) -> Result<SyncOutcome, Error> {
        Ok(SyncOutcome::Ignored(event.event_type().to_owned()))
    }
}
