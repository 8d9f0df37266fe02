use std::sync::Arc;

use jib_core::{config::Config, pipeline::MessagePipeline};
use jib_jira::JiraClient;

#[tokio::main]
async fn main() -> Result<(), jib_core::Error> {
    jib_core::logging::init("jib")?;

    let cfg = Arc::new(Config::load()?);

    let tracker = Arc::new(JiraClient::new(&cfg)?);
    let pipeline = Arc::new(MessagePipeline::new(tracker));

    // One refresh attempt at startup; failure is non-fatal and the bot
    // runs with an empty project directory until `/jira update` succeeds.
    pipeline.load_projects_if_empty(&cfg).await;

    jib_telegram::router::run_polling(cfg, pipeline)
        .await
        .map_err(|e| jib_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
