//! Stub tool handlers.
//!
//! Each handler validates its params into a typed struct, logs the call,
//! and returns a small acknowledgement. Replace the bodies with real
//! integrations (Slack API, Gmail, GitHub, a database, a chart renderer);
//! the surrounding dispatch and policy plumbing stays as is.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use toolgate_core::{Error, ToolHandler};

/// All stub handlers, ready to register on a dispatcher.
#[must_use]
pub fn all_handlers() -> Vec<Arc<dyn ToolHandler>> {
    vec![
        Arc::new(SlackPost),
        Arc::new(MailDraft),
        Arc::new(MailSend),
        Arc::new(GhaRun),
        Arc::new(GhaStatus),
        Arc::new(SqlQuery),
        Arc::new(ChartBar),
    ]
}

/// Deserialize params into the handler's typed struct. Null params are
/// treated as an empty object; unknown or missing fields become an
/// invalid-params error.
fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T, Error> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|err| Error::invalid_params(tool, err.to_string()))
}

/// `slack.post` — post a message to a Slack channel.
pub struct SlackPost;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SlackPostParams {
    channel: String,
    text: String,
    #[serde(default)]
    thread_ts: Option<String>,
}

#[async_trait]
impl ToolHandler for SlackPost {
    fn name(&self) -> &str {
        "slack.post"
    }

    async fn call(&self, params: Value) -> Result<Value, Error> {
        let p: SlackPostParams = parse_params(self.name(), params)?;
        tracing::info!(
            channel = %p.channel,
            text = %p.text,
            thread_ts = ?p.thread_ts,
            "[slack.post] stub invoked"
        );
        Ok(json!({
            "status": "ok",
            "channel": p.channel,
            "message": p.text,
            "thread_ts": p.thread_ts,
        }))
    }
}

/// `mail.draft` — create an email draft.
pub struct MailDraft;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MailDraftParams {
    to: String,
    subject: String,
    body_md: String,
}

#[async_trait]
impl ToolHandler for MailDraft {
    fn name(&self) -> &str {
        "mail.draft"
    }

    async fn call(&self, params: Value) -> Result<Value, Error> {
        let p: MailDraftParams = parse_params(self.name(), params)?;
        tracing::info!(
            to = %p.to,
            subject = %p.subject,
            body_bytes = p.body_md.len(),
            "[mail.draft] stub invoked"
        );
        let draft_id = format!("draft_{}", Uuid::new_v4().simple());
        Ok(json!({
            "draft_id": draft_id,
            "to": p.to,
            "subject": p.subject,
        }))
    }
}

/// `mail.send` — send a previously created draft. `dry_run` previews the
/// payload instead of acknowledging a send.
pub struct MailSend;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MailSendParams {
    draft_id: String,
    #[serde(default)]
    dry_run: bool,
}

#[async_trait]
impl ToolHandler for MailSend {
    fn name(&self) -> &str {
        "mail.send"
    }

    async fn call(&self, params: Value) -> Result<Value, Error> {
        let p: MailSendParams = parse_params(self.name(), params)?;
        tracing::info!(draft_id = %p.draft_id, dry_run = p.dry_run, "[mail.send] stub invoked");
        if p.dry_run {
            return Ok(json!({ "dry_run": true, "draft_id": p.draft_id }));
        }
        Ok(json!({ "status": "sent", "draft_id": p.draft_id }))
    }
}

/// `gha.run` — trigger a GitHub Actions workflow.
pub struct GhaRun;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GhaRunParams {
    owner: String,
    repo: String,
    workflow_id: String,
    r#ref: String,
    #[serde(default)]
    inputs: Option<Value>,
    #[serde(default)]
    dry_run: bool,
}

#[async_trait]
impl ToolHandler for GhaRun {
    fn name(&self) -> &str {
        "gha.run"
    }

    async fn call(&self, params: Value) -> Result<Value, Error> {
        let p: GhaRunParams = parse_params(self.name(), params)?;
        tracing::info!(
            owner = %p.owner,
            repo = %p.repo,
            workflow_id = %p.workflow_id,
            git_ref = %p.r#ref,
            dry_run = p.dry_run,
            "[gha.run] stub invoked"
        );
        let inputs = p.inputs.unwrap_or_else(|| json!({}));
        if p.dry_run {
            return Ok(json!({
                "dry_run": true,
                "workflow_id": p.workflow_id,
                "ref": p.r#ref,
                "inputs": inputs,
            }));
        }
        Ok(json!({ "status": "queued", "workflow_id": p.workflow_id }))
    }
}

/// `gha.status` — look up the status of a GitHub Actions run.
pub struct GhaStatus;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GhaStatusParams {
    run_id: String,
}

#[async_trait]
impl ToolHandler for GhaStatus {
    fn name(&self) -> &str {
        "gha.status"
    }

    async fn call(&self, params: Value) -> Result<Value, Error> {
        let p: GhaStatusParams = parse_params(self.name(), params)?;
        tracing::info!(run_id = %p.run_id, "[gha.status] stub invoked");
        Ok(json!({ "run_id": p.run_id, "status": "unknown" }))
    }
}

/// `sql.query` — run a read-only SQL query.
pub struct SqlQuery;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SqlQueryParams {
    name: String,
    text_sql: String,
    #[serde(default)]
    params: Option<Vec<Value>>,
}

#[async_trait]
impl ToolHandler for SqlQuery {
    fn name(&self) -> &str {
        "sql.query"
    }

    async fn call(&self, params: Value) -> Result<Value, Error> {
        let p: SqlQueryParams = parse_params(self.name(), params)?;
        tracing::info!(
            name = %p.name,
            sql = %p.text_sql,
            params = ?p.params,
            "[sql.query] stub invoked"
        );
        Ok(json!({ "name": p.name, "rows": [], "columns": [] }))
    }
}

/// `chart.bar` — render a bar chart from JSON data.
pub struct ChartBar;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartBarParams {
    json_data: Value,
}

#[async_trait]
impl ToolHandler for ChartBar {
    fn name(&self) -> &str {
        "chart.bar"
    }

    async fn call(&self, params: Value) -> Result<Value, Error> {
        let p: ChartBarParams = parse_params(self.name(), params)?;
        tracing::info!(data = %p.json_data, "[chart.bar] stub invoked");
        Ok(json!({ "url": "https://example.com/chart.png" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slack_post_acknowledges() {
        let result = SlackPost
            .call(json!({ "channel": "#general", "text": "hello" }))
            .await
            .unwrap();
        assert_eq!(result["status"], "ok");
        assert_eq!(result["channel"], "#general");
        assert_eq!(result["message"], "hello");
        assert!(result["thread_ts"].is_null());
    }

    #[tokio::test]
    async fn slack_post_missing_channel_is_invalid_params() {
        let err = SlackPost.call(json!({ "text": "hello" })).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams { tool, .. } if tool == "slack.post"));
    }

    #[tokio::test]
    async fn slack_post_unknown_field_is_invalid_params() {
        let err = SlackPost
            .call(json!({ "channel": "#general", "text": "hi", "emoji": true }))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
    }

    #[tokio::test]
    async fn mail_draft_generates_distinct_ids() {
        let params = json!({ "to": "a@example.com", "subject": "s", "body_md": "b" });
        let first = MailDraft.call(params.clone()).await.unwrap();
        let second = MailDraft.call(params).await.unwrap();

        let first_id = first["draft_id"].as_str().unwrap();
        let second_id = second["draft_id"].as_str().unwrap();
        assert!(first_id.starts_with("draft_"));
        assert_ne!(first_id, second_id);
    }

    #[tokio::test]
    async fn mail_send_dry_run_previews() {
        let result = MailSend
            .call(json!({ "draft_id": "draft_1", "dry_run": true }))
            .await
            .unwrap();
        assert_eq!(result["dry_run"], true);
        assert_eq!(result["draft_id"], "draft_1");
        assert!(result.get("status").is_none());
    }

    #[tokio::test]
    async fn mail_send_defaults_to_real_send() {
        let result = MailSend.call(json!({ "draft_id": "draft_1" })).await.unwrap();
        assert_eq!(result["status"], "sent");
    }

    #[tokio::test]
    async fn gha_run_dry_run_echoes_inputs() {
        let result = GhaRun
            .call(json!({
                "owner": "octo",
                "repo": "hello",
                "workflow_id": "ci.yml",
                "ref": "main",
                "inputs": { "env": "staging" },
                "dry_run": true
            }))
            .await
            .unwrap();
        assert_eq!(result["dry_run"], true);
        assert_eq!(result["ref"], "main");
        assert_eq!(result["inputs"]["env"], "staging");
    }

    #[tokio::test]
    async fn gha_run_queues_without_dry_run() {
        let result = GhaRun
            .call(json!({
                "owner": "octo",
                "repo": "hello",
                "workflow_id": "ci.yml",
                "ref": "main"
            }))
            .await
            .unwrap();
        assert_eq!(result["status"], "queued");
        assert_eq!(result["workflow_id"], "ci.yml");
    }

    #[tokio::test]
    async fn sql_query_returns_empty_result_set() {
        let result = SqlQuery
            .call(json!({ "name": "daily", "text_sql": "SELECT 1", "params": [1, "x"] }))
            .await
            .unwrap();
        assert_eq!(result["name"], "daily");
        assert_eq!(result["rows"], json!([]));
        assert_eq!(result["columns"], json!([]));
    }

    #[tokio::test]
    async fn chart_bar_returns_placeholder_url() {
        let result = ChartBar
            .call(json!({ "json_data": { "a": 1, "b": 2 } }))
            .await
            .unwrap();
        assert!(result["url"].as_str().unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn null_params_fail_when_fields_required() {
        let err = GhaStatus.call(Value::Null).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams { tool, .. } if tool == "gha.status"));
    }

    #[test]
    fn handler_names_are_unique() {
        let handlers = all_handlers();
        let mut names: Vec<&str> = handlers.iter().map(|h| h.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 7);
    }
}
