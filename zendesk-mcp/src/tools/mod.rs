//! Tool registry: every Zendesk operation exposed to the protocol host
//! is a [`Tool`] with a JSON-schema argument description and an async
//! handler that calls into the shared [`ZendeskClient`].

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::warn;

use crate::client::{Params, ZendeskClient, ZendeskError};

mod crud;

pub mod automations;
pub mod brands;
pub mod custom_fields;
pub mod groups;
pub mod macros;
pub mod organizations;
pub mod satisfaction;
pub mod search;
pub mod sla;
pub mod suspended_tickets;
pub mod tags;
pub mod tickets;
pub mod triggers;
pub mod users;
pub mod views;

pub(crate) use crud::{CrudResource, crud_tools};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Zendesk(#[from] ZendeskError),
}

type Handler = Box<dyn Fn(Value) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    handler: Handler,
}

impl Tool {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        handler: F,
    ) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler: Box::new(move |args| Box::pin(handler(args))),
        }
    }

    pub async fn call(&self, args: Value) -> Result<Value, ToolError> {
        (self.handler)(args).await
    }
}

pub struct ToolRegistry {
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(client: Arc<ZendeskClient>) -> Self {
        let mut registry = Self::empty();
        for tool in all_tools(&client) {
            registry.register(tool);
        }
        registry
    }

    /// A registry with nothing registered yet.
    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. The first registration of a name wins; later
    /// ones are dropped with a warning instead of silently replacing
    /// the handler.
    pub fn register(&mut self, tool: Tool) {
        if self.index.contains_key(&tool.name) {
            warn!(name = %tool.name, "duplicate tool registration ignored");
            return;
        }
        self.index.insert(tool.name.clone(), self.tools.len());
        self.tools.push(tool);
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call and wrap the outcome in the protocol result
    /// envelope. Returns `None` for an unknown tool name (the host maps
    /// that to a method-not-found error); handler failures become an
    /// error-flagged result here, exactly once.
    pub async fn call(&self, name: &str, args: Value) -> Option<Value> {
        let tool = self.get(name)?;
        let result = match tool.call(args).await {
            Ok(value) => text_result(&value),
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                error_result(&err.to_string())
            }
        };
        Some(result)
    }
}

fn text_result(value: &Value) -> Value {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    json!({"content": [{"type": "text", "text": text}]})
}

fn error_result(message: &str) -> Value {
    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "isError": true,
    })
}

fn all_tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = Vec::new();
    tools.extend(tickets::tools(client));
    tools.extend(users::tools(client));
    tools.extend(organizations::tools(client));
    tools.extend(groups::tools(client));
    tools.extend(views::tools(client));
    tools.extend(macros::tools(client));
    tools.extend(triggers::tools(client));
    tools.extend(automations::tools(client));
    tools.extend(sla::tools(client));
    tools.extend(brands::tools(client));
    tools.extend(search::tools(client));
    tools.extend(satisfaction::tools(client));
    tools.extend(suspended_tickets::tools(client));
    tools.extend(tags::tools(client));
    tools.extend(custom_fields::tools(client));
    tools
}

// ---- argument helpers shared by the tool modules ----

pub(crate) fn require_u64(args: &Value, key: &str) -> Result<u64, ToolError> {
    args.get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))
}

pub(crate) fn require_str(args: &Value, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))
}

pub(crate) fn require_value(args: &Value, key: &str) -> Result<Value, ToolError> {
    args.get(key)
        .cloned()
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))
}

/// Copy the listed keys into `target` when the arguments carry them.
pub(crate) fn copy_present(target: &mut Map<String, Value>, args: &Value, keys: &[&str]) {
    for key in keys {
        if let Some(value) = args.get(*key) {
            target.insert((*key).to_string(), value.clone());
        }
    }
}

/// Assemble a `{all, any}` conditions object from `all_conditions` /
/// `any_conditions` arguments, if either is present.
pub(crate) fn conditions_from(args: &Value) -> Option<Value> {
    let all = args.get("all_conditions");
    let any = args.get("any_conditions");
    if all.is_none() && any.is_none() {
        return None;
    }
    let mut conditions = Map::new();
    if let Some(all) = all {
        conditions.insert("all".into(), all.clone());
    }
    if let Some(any) = any {
        conditions.insert("any".into(), any.clone());
    }
    Some(Value::Object(conditions))
}

/// The whole argument bag as query parameters; list tools forward
/// their arguments straight to the endpoint.
pub(crate) fn params_from(args: &Value) -> Params {
    args.as_object().cloned().unwrap_or_default()
}

/// Argument bag minus the given keys (everything except the path
/// parameters).
pub(crate) fn args_without(args: &Value, keys: &[&str]) -> Map<String, Value> {
    let mut object = args.as_object().cloned().unwrap_or_default();
    for key in keys {
        object.shift_remove(*key);
    }
    object
}

/// Build a `{key: items, count: n}` list payload.
pub(crate) fn list_payload(key: &str, items: Vec<Value>) -> Value {
    let count = items.len();
    let mut payload = Map::new();
    payload.insert(key.to_string(), Value::Array(items));
    payload.insert("count".into(), json!(count));
    Value::Object(payload)
}

/// Extract the single-resource envelope field from a response.
pub(crate) fn envelope(response: &Value, key: &str) -> Value {
    response.get(key).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_tool(name: &str) -> Tool {
        Tool::new(
            name,
            "Echo the arguments back",
            json!({"type": "object", "properties": {}}),
            |args| async move { Ok(args) },
        )
    }

    fn failing_tool(name: &str) -> Tool {
        Tool::new(
            name,
            "Always fails",
            json!({"type": "object", "properties": {}}),
            |_args| async move {
                Err(ToolError::InvalidArguments("Missing 'id' argument".into()))
            },
        )
    }

    #[tokio::test]
    async fn test_call_wraps_result_in_text_envelope() {
        let mut registry = ToolRegistry::empty();
        registry.register(echo_tool("echo"));

        let result = registry
            .call("echo", json!({"a": 1}))
            .await
            .expect("tool exists");

        let content = &result["content"][0];
        assert_eq!(content["type"], "text");
        let parsed: Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();
        assert_eq!(parsed, json!({"a": 1}));
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn test_handler_error_becomes_flagged_result() {
        let mut registry = ToolRegistry::empty();
        registry.register(failing_tool("boom"));

        let result = registry.call("boom", json!({})).await.expect("tool exists");
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["content"][0]["text"],
            json!("Error: Invalid arguments: Missing 'id' argument")
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_none() {
        let registry = ToolRegistry::empty();
        assert!(registry.call("nope", json!({})).await.is_none());
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = ToolRegistry::empty();
        registry.register(echo_tool("dup"));
        registry.register(failing_tool("dup"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("dup").unwrap().description,
            "Echo the arguments back"
        );
    }

    #[test]
    fn test_full_registry_surface() {
        let client = Arc::new(ZendeskClient::new(&crate::config::Config {
            subdomain: "testco".into(),
            credentials: crate::config::Credentials::Bearer {
                token: "token".into(),
            },
        }));
        let registry = ToolRegistry::new(client);

        // 92 definitions across the modules; three carry names already
        // taken (typed searches, the rating lookup) and are dropped.
        assert_eq!(registry.len(), 89);

        for name in [
            "zendesk_list_tickets",
            "zendesk_create_ticket",
            "zendesk_merge_tickets",
            "zendesk_search",
            "zendesk_execute_view",
            "zendesk_apply_macro",
            "zendesk_reorder_triggers",
            "zendesk_list_sla_policies",
            "zendesk_recover_suspended_ticket",
            "zendesk_autocomplete_tags",
            "zendesk_get_organization_field",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }

        // First registration wins: the users-module search keeps the
        // name over the scoped search variant.
        assert_eq!(
            registry.get("zendesk_search_users").unwrap().description,
            "Search users by query"
        );
    }

    #[test]
    fn test_args_without_strips_path_keys() {
        let args = json!({"ticket_id": 1, "status": "open"});
        let rest = args_without(&args, &["ticket_id"]);
        assert_eq!(Value::Object(rest), json!({"status": "open"}));
    }

    #[test]
    fn test_list_payload_shape() {
        let payload = list_payload("tickets", vec![json!({"id": 1})]);
        assert_eq!(payload["count"], json!(1));
        assert_eq!(payload["tickets"][0]["id"], json!(1));
    }
}
