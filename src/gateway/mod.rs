//! Client for the external agent gateway.
//!
//! The gateway queues work into long-running agent sessions over an
//! OpenAI-style chat endpoint. Every call here is fire-and-forget at
//! the protocol level: bearer auth, a fixed timeout, and no retry;
//! a timeout or non-2xx is terminal for that call. Dispatches carry a
//! session-routing header pinning the message to the main agent
//! channel.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::{json, Value};

use crate::SecretString;

/// Logical channel all dashboard traffic is routed to.
pub const MAIN_SESSION_KEY: &str = "agent:main:main";

const SESSION_KEY_HEADER: &str = "x-agent-session-key";
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(25);

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL, e.g. `http://localhost:18789`.
    pub base_url: String,
    /// Bearer secret sent on every call.
    pub token: SecretString,
}

#[derive(Debug)]
pub enum GatewayError {
    /// The gateway answered with a non-2xx status; the raw body is
    /// kept verbatim; there is no structured error taxonomy.
    Http { status: u16, body: String },
    Transport(String),
}

impl std::error::Error for GatewayError {}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            GatewayError::Transport(msg) => write!(f, "gateway unreachable: {msg}"),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

/// Result of the liveness probe. Never an error: an unreachable
/// gateway is `ok: false`.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayStatus {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.token.expose_secret())
    }

    /// Probes the gateway. It serves a page on every path, so a 200 on
    /// `/` means alive.
    pub async fn status(&self) -> GatewayStatus {
        let result = self
            .http
            .get(self.url("/"))
            .header(AUTHORIZATION, self.bearer())
            .timeout(STATUS_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(res) => GatewayStatus {
                ok: res.status().is_success(),
                last_check: Some(Utc::now()),
            },
            Err(e) => {
                log::warn!(target: "anteroom::gateway", "msg=\"status probe failed\" error=\"{e}\"");
                GatewayStatus {
                    ok: false,
                    last_check: None,
                }
            }
        }
    }

    /// Sends a raw instruction into the main agent session.
    pub async fn send_to_main_session(&self, message: &str) -> Result<(), GatewayError> {
        self.dispatch(MAIN_SESSION_KEY, message).await
    }

    /// Queues a dashboard task into the main agent session. The
    /// message tells the agent how to report completion back through
    /// the tasks API; nothing here waits for that to happen.
    pub async fn queue_task(
        &self,
        task_id: &str,
        title: &str,
        prompt: &str,
    ) -> Result<(), GatewayError> {
        self.dispatch(MAIN_SESSION_KEY, &task_message(task_id, title, prompt))
            .await
    }

    async fn dispatch(&self, session_key: &str, message: &str) -> Result<(), GatewayError> {
        let res = self
            .http
            .post(self.url("/v1/chat/completions"))
            .header(AUTHORIZATION, self.bearer())
            .header(SESSION_KEY_HEADER, session_key)
            .timeout(DISPATCH_TIMEOUT)
            .json(&json!({
                "messages": [{ "role": "user", "content": message }],
            }))
            .send()
            .await?;

        check(res).await.map(|_| ())
    }

    /// Lists configured cron jobs; any failure collapses to an empty
    /// list.
    pub async fn list_cron_jobs(&self) -> Vec<Value> {
        let result: Result<Value, GatewayError> = async {
            let res = self
                .http
                .get(self.url("/cron/list"))
                .header(AUTHORIZATION, self.bearer())
                .send()
                .await?;
            check(res).await?.json::<Value>().await.map_err(Into::into)
        }
        .await;

        match result {
            Ok(Value::Object(mut data)) => match data.remove("result") {
                Some(Value::Array(jobs)) => jobs,
                _ => Vec::new(),
            },
            Ok(_) => Vec::new(),
            Err(e) => {
                log::warn!(target: "anteroom::gateway", "msg=\"cron list failed\" error=\"{e}\"");
                Vec::new()
            }
        }
    }

    pub async fn add_cron_job(&self, job: &Value) -> Result<Value, GatewayError> {
        let res = self
            .http
            .post(self.url("/cron/add"))
            .header(AUTHORIZATION, self.bearer())
            .json(job)
            .send()
            .await?;

        check(res).await?.json().await.map_err(Into::into)
    }

    pub async fn delete_cron_job(&self, job_id: &str) -> Result<(), GatewayError> {
        let res = self
            .http
            .delete(self.url(&format!("/cron/{job_id}")))
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;

        check(res).await.map(|_| ())
    }

    /// Fires an immediate wake, optionally targeted at one agent.
    pub async fn trigger_wake(&self, target: Option<&str>) -> Result<Value, GatewayError> {
        let mut body = json!({ "mode": "now" });
        if let Some(target) = target {
            body["target"] = Value::String(target.to_owned());
        }

        let res = self
            .http
            .post(self.url("/cron/wake"))
            .header(AUTHORIZATION, self.bearer())
            .json(&body)
            .send()
            .await?;

        check(res).await?.json().await.map_err(Into::into)
    }

    /// Session status for one channel, or the gateway-wide status.
    /// Failures collapse to `None`.
    pub async fn session_status(&self, session_key: Option<&str>) -> Option<Value> {
        let path = match session_key {
            Some(key) => format!("/session/{key}/status"),
            None => "/status".to_owned(),
        };

        let res = self
            .http
            .get(self.url(&path))
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await
            .ok()?;

        if !res.status().is_success() {
            return None;
        }
        res.json().await.ok()
    }

    pub async fn restart(&self) -> Result<(), GatewayError> {
        let res = self
            .http
            .post(self.url("/gateway/restart"))
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;

        check(res).await.map(|_| ())
    }
}

fn task_message(task_id: &str, title: &str, prompt: &str) -> String {
    format!(
        "[DASHBOARD TASK {task_id}] {title}\n\n{prompt}\n\nWhen complete, update task {task_id} via PUT /api/tasks/ with status and response."
    )
}

async fn check(res: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    Err(GatewayError::Http { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> GatewayClient {
        GatewayClient::new(GatewayConfig {
            base_url: base_url.to_owned(),
            token: SecretString::new("gateway-token"),
        })
    }

    #[test]
    fn url_joining_tolerates_trailing_slash() {
        assert_eq!(
            client("http://localhost:18789").url("/cron/list"),
            "http://localhost:18789/cron/list"
        );
        assert_eq!(
            client("http://localhost:18789/").url("/cron/list"),
            "http://localhost:18789/cron/list"
        );
    }

    #[test]
    fn http_error_embeds_status_and_body() {
        let err = GatewayError::Http {
            status: 503,
            body: "overloaded".to_owned(),
        };
        assert_eq!(err.to_string(), "HTTP 503: overloaded");
    }

    #[test]
    fn task_message_names_the_callback_path() {
        let message = task_message("t-1", "Summarize leads", "Go through the inbox");
        assert!(message.starts_with("[DASHBOARD TASK t-1] Summarize leads"));
        assert!(message.contains("Go through the inbox"));
        assert!(message.contains("PUT /api/tasks/"));
    }

    #[tokio::test]
    async fn unreachable_gateway_probes_not_ok() {
        // Nothing listens on this port.
        let status = client("http://127.0.0.1:1").status().await;
        assert!(!status.ok);
        assert!(status.last_check.is_none());
    }

    #[tokio::test]
    async fn unreachable_gateway_lists_no_cron_jobs() {
        assert!(client("http://127.0.0.1:1").list_cron_jobs().await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_gateway_has_no_session_status() {
        assert!(client("http://127.0.0.1:1")
            .session_status(None)
            .await
            .is_none());
    }
}
