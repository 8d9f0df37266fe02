use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use jib_core::{config::Config, pipeline::MessagePipeline};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub pipeline: Arc<MessagePipeline>,
}

pub async fn run_polling(cfg: Arc<Config>, pipeline: Arc<MessagePipeline>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // The bot must never answer its own messages.
    match bot.get_me().await {
        Ok(me) => {
            pipeline.set_self_identity(me.username());
            tracing::info!(bot = me.username(), "jib started");
        }
        Err(e) => tracing::warn!(error = %e, "could not resolve own identity"),
    }

    let state = Arc::new(AppState { cfg, pipeline });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
