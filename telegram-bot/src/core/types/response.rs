//! Handler chain result type.

/// Handler result for the chain. `Stop` and `Reply` end the handle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not this handler's kind of update; pass to the next handler.
    Continue,
    /// Handled, or deliberately dropped, without a text reply (sticker echo, media repost, unknown command).
    Stop,
    /// Looked at the update and chose not to act; the next handler still runs.
    Ignore,
    /// Handled; the text was sent to the chat.
    Reply(String),
}
