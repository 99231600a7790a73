//! Handler trait and transport conversion traits.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse, user::User};
use crate::core::error::Result;

/// Transport user (e.g. teloxide's) → core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Transport message → core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One step of a [`crate::HandlerChain`]. All hooks default to no-ops, so a handler
/// usually overrides `handle` only.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Called for every update before any `handle`. `false` drops the update.
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    /// `Stop` or `Reply` ends the handle phase; `Continue` and `Ignore` pass to the next handler.
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    /// Called in reverse chain order with the final response.
    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
