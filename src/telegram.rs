//! Telegram dispatch — sendMessage s HTML parse mode.

use anyhow::Result;
use tracing::warn;

/// Send the digest. No retry here: a failed daily post gets reported through
/// the exit code and the operator decides.
pub async fn send_message(
    client: &reqwest::Client,
    token: &str,
    chat_id: &str,
    text: &str,
) -> Result<()> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", token);
    let body = serde_json::json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "HTML",
        "disable_web_page_preview": true,
    });
    let resp = client.post(&url).json(&body).send().await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!("Telegram sendMessage failed: {} — {}", status, body);
        anyhow::bail!("Telegram sendMessage failed: {} — {}", status, body);
    }
    Ok(())
}
