use std::sync::Arc;

use teloxide::prelude::*;
use tracing::warn;

use jib_core::domain::InboundMessage;

use crate::router::AppState;

pub async fn handle_text(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(body) = msg.text().map(|s| s.to_string()) else {
        return Ok(());
    };

    // Username when set, numeric id otherwise, so the ignore-list can
    // match either form.
    let sender = user
        .username
        .clone()
        .unwrap_or_else(|| user.id.0.to_string());

    let inbound = InboundMessage { sender, body };
    let Some(reply) = state.pipeline.handle_message(&inbound, &state.cfg).await else {
        return Ok(());
    };

    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
        warn!(error = %e, "failed to send issue reply");
    }

    Ok(())
}
