//! Telegram adapter (teloxide).
//!
//! Long-polling transport: routes inbound text messages into the core
//! pipeline and sends its replies back into the same chat.

pub mod handlers;
pub mod router;
