//! Authentication collaborator interface
//!
//! Sign-in, role persistence and account management live outside the core;
//! this port is the only thing the core knows about them.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::support::errors::DomainResult;

use super::model::Actor;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Actor currently signed in, if any.
    async fn current_actor(&self) -> Option<Actor>;

    /// End the current session.
    async fn sign_out(&self) -> DomainResult<()>;

    /// Feed of actor changes (sign-in, sign-out, profile update).
    fn subscribe(&self) -> broadcast::Receiver<Option<Actor>>;
}
