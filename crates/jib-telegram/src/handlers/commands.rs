use std::sync::Arc;

use teloxide::prelude::*;
use tracing::warn;

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let (cmd, args) = parse_command(msg.text().unwrap_or(""));
    if cmd != "jira" {
        return Ok(());
    }

    let reply = match args.as_str() {
        "update" => match state.pipeline.refresh_projects(&state.cfg).await {
            Ok(count) => {
                format!("Successfully updated projects list. Found {count} projects.")
            }
            Err(e) => {
                warn!(error = %e, "manual project refresh failed");
                "Failed to update projects list. Check logs for details.".to_string()
            }
        },
        _ => "Usage: /jira update — refresh the list of known Jira projects.".to_string(),
    };

    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
        warn!(error = %e, "failed to send command reply");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_and_args() {
        assert_eq!(
            parse_command("/jira update"),
            ("jira".to_string(), "update".to_string())
        );
        assert_eq!(
            parse_command("/jira@jib_bot update"),
            ("jira".to_string(), "update".to_string())
        );
        assert_eq!(parse_command("/JIRA"), ("jira".to_string(), String::new()));
        assert_eq!(parse_command("/other x"), ("other".to_string(), "x".to_string()));
    }
}
