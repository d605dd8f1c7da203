//! Zendesk REST API client: authenticated transport, rate-limit
//! deferral, and cursor/link/legacy pagination.
//!
//! The rate-limit counters live in a single mutex-guarded cell owned by
//! the client. The pre-flight check and the send are not atomic across
//! concurrent callers: two tasks can both read a stale `remaining` and
//! proceed without waiting. The expected usage is one interactive tool
//! call at a time, so this is a documented non-guarantee rather than a
//! synchronization bug.

use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_stream::stream;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::{Stream, StreamExt};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, Credentials};

/// Query parameters. Insertion order is preserved, so repeated-key
/// expansion and array-key detection are deterministic.
pub type Params = Map<String, Value>;

const DEFAULT_PAGE_SIZE: u64 = 100;
const RATE_LIMIT_FLOOR: i64 = 10;
const INITIAL_RATE_LIMIT_REMAINING: i64 = 700;

#[derive(Debug, Error)]
pub enum ZendeskError {
    /// Non-2xx response. The message is the server's `error: description`
    /// envelope when parseable, else `"{status} {reason}"`.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rate-limit counters as last reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitState {
    pub remaining: i64,
    /// Epoch milliseconds at which the window resets.
    pub reset_at_ms: u64,
}

/// Error envelope returned by the API on failed calls.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    description: Option<String>,
}

pub struct ZendeskClient {
    http: reqwest::Client,
    base_url: String,
    subdomain: String,
    auth_header: String,
    rate_limit: Mutex<RateLimitState>,
}

impl ZendeskClient {
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            format!("https://{}.zendesk.com/api/v2", config.subdomain),
            config.subdomain.clone(),
            auth_header(&config.credentials),
        )
    }

    fn from_parts(base_url: String, subdomain: String, auth_header: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            subdomain,
            auth_header,
            rate_limit: Mutex::new(RateLimitState {
                remaining: INITIAL_RATE_LIMIT_REMAINING,
                reset_at_ms: now_ms(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    pub fn rate_limit_status(&self) -> RateLimitState {
        *self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue an authenticated request and parse the JSON body.
    ///
    /// Paths with a scheme are used verbatim (pagination follows
    /// absolute continuation URLs); everything else is appended to the
    /// account endpoint. Caller-supplied headers override the defaults
    /// of the same name.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
        headers: Option<&[(String, String)]>,
        body: Option<&Value>,
    ) -> Result<Value, ZendeskError> {
        self.wait_for_rate_limit().await;

        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        };

        let mut merged: Vec<(&str, String)> = vec![
            ("authorization", self.auth_header.clone()),
            ("content-type", "application/json".into()),
            ("accept", "application/json".into()),
        ];
        if let Some(headers) = headers {
            for (name, value) in headers {
                match merged
                    .iter_mut()
                    .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
                {
                    Some(slot) => slot.1 = value.clone(),
                    None => merged.push((name.as_str(), value.clone())),
                }
            }
        }

        let mut request = self.http.request(method.clone(), &url);
        for (name, value) in &merged {
            request = request.header(*name, value.as_str());
        }

        if let Some(params) = params {
            let pairs = encode_query(params);
            if !pairs.is_empty() {
                request = request.query(&pairs);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "zendesk request");
        let response = request.send().await?;

        self.update_rate_limit(response.headers());

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        // Some endpoints send no body at all on 204.
        if status == StatusCode::NO_CONTENT {
            return Ok(json!({}));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get(&self, path: &str, params: Option<&Params>) -> Result<Value, ZendeskError> {
        self.request(Method::GET, path, params, None, None).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, ZendeskError> {
        self.request(Method::POST, path, None, None, body).await
    }

    pub async fn put(&self, path: &str, body: Option<&Value>) -> Result<Value, ZendeskError> {
        self.request(Method::PUT, path, None, None, body).await
    }

    pub async fn patch(&self, path: &str, body: Option<&Value>) -> Result<Value, ZendeskError> {
        self.request(Method::PATCH, path, None, None, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ZendeskError> {
        self.request(Method::DELETE, path, None, None, None).await
    }

    /// Lazily iterate a list endpoint, following whichever pagination
    /// style each response advertises: cursor (`meta.has_more` +
    /// `meta.after_cursor`), link (`links.next`), or the deprecated
    /// `meta.after_url`. The stream is forward-only and consumable once;
    /// call again for a fresh cursor.
    ///
    /// `resource_key` names the array field in the response. Without it,
    /// the first key holding an array is used; if none is found, or the
    /// array is empty, the stream ends.
    pub fn paginate<'a>(
        &'a self,
        path: &str,
        params: Option<&Params>,
        resource_key: Option<&str>,
    ) -> Pin<Box<dyn Stream<Item = Result<Value, ZendeskError>> + Send + 'a>> {
        let mut base_params = params.cloned().unwrap_or_default();
        if !base_params.contains_key("page_size") {
            base_params.insert("page_size".into(), json!(DEFAULT_PAGE_SIZE));
        }
        let start_path = path.to_string();
        let resource_key = resource_key.map(str::to_string);

        Box::pin(stream! {
            let mut current_path = start_path;
            let mut current_params = base_params.clone();

            loop {
                let response = match self.get(&current_path, Some(&current_params)).await {
                    Ok(response) => response,
                    Err(err) => {
                        yield Err(err);
                        return;
                    }
                };

                let key = match &resource_key {
                    Some(key) => Some(key.clone()),
                    None => response.as_object().and_then(|object| {
                        object
                            .iter()
                            .find(|(_, value)| value.is_array())
                            .map(|(key, _)| key.clone())
                    }),
                };
                let Some(key) = key else { return };
                let Some(items) = response.get(&key).and_then(Value::as_array) else {
                    return;
                };
                if items.is_empty() {
                    return;
                }

                for item in items {
                    yield Ok(item.clone());
                }

                let meta = response.get("meta");
                let has_more = meta
                    .and_then(|meta| meta.get("has_more"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let after_cursor = meta
                    .and_then(|meta| meta.get("after_cursor"))
                    .and_then(Value::as_str);
                let next_link = response
                    .get("links")
                    .and_then(|links| links.get("next"))
                    .and_then(Value::as_str);
                let after_url = meta
                    .and_then(|meta| meta.get("after_url"))
                    .and_then(Value::as_str);

                // The cursor is the sole source of forward progress in
                // cursor mode; each page restarts from the caller's
                // params so stale cursors never leak into the next
                // request.
                let next_cursor = if has_more { after_cursor } else { None };

                if let Some(cursor) = next_cursor {
                    let mut next_params = base_params.clone();
                    next_params.insert("cursor".into(), Value::String(cursor.to_string()));
                    current_params = next_params;
                } else if let Some(next) = next_link {
                    current_path = next.to_string();
                    current_params = Params::new();
                } else if let Some(next) = after_url {
                    current_path = next.to_string();
                    current_params = Params::new();
                } else {
                    if has_more {
                        // Compatibility: the server claims more data but
                        // offered no continuation. Stop, loudly.
                        warn!(
                            path = %current_path,
                            "has_more set without after_cursor or next link; results may be truncated"
                        );
                    }
                    return;
                }
            }
        })
    }

    /// Drain [`ZendeskClient::paginate`] into a single ordered Vec.
    pub async fn paginate_all(
        &self,
        path: &str,
        params: Option<&Params>,
        resource_key: Option<&str>,
    ) -> Result<Vec<Value>, ZendeskError> {
        let mut stream = self.paginate(path, params, resource_key);
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    async fn wait_for_rate_limit(&self) {
        let wait_ms = {
            let state = self
                .rate_limit
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let now = now_ms();
            if state.remaining < RATE_LIMIT_FLOOR && now < state.reset_at_ms {
                Some(state.reset_at_ms - now)
            } else {
                None
            }
        };

        if let Some(wait_ms) = wait_ms {
            warn!(wait_ms, "rate limit nearly exhausted, deferring request");
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        }
    }

    fn update_rate_limit(&self, headers: &HeaderMap) {
        let remaining = headers
            .get("X-Rate-Limit-Remaining")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok());
        let reset_secs = headers
            .get("X-Rate-Limit-Reset")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        if remaining.is_none() && reset_secs.is_none() {
            return;
        }

        let mut state = self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(remaining) = remaining {
            state.remaining = remaining;
        }
        if let Some(reset_secs) = reset_secs {
            state.reset_at_ms = reset_secs * 1000;
        }
    }
}

fn auth_header(credentials: &Credentials) -> String {
    match credentials {
        Credentials::Basic { email, token } => {
            format!("Basic {}", BASE64.encode(format!("{email}/token:{token}")))
        }
        Credentials::Bearer { token } => format!("Bearer {token}"),
    }
}

fn api_error(status: StatusCode, body: &str) -> ZendeskError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(envelope) if !envelope.error.is_empty() => {
            format!(
                "{}: {}",
                envelope.error,
                envelope.description.unwrap_or_default()
            )
        }
        _ => format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
    };
    ZendeskError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Expand a parameter map into query pairs: arrays become repeated
/// keys, nulls are omitted, scalars use their display form.
fn encode_query(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_string(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_string(other))),
        }
    }
    pairs
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use rstest::rstest;

    fn test_client(server: &Server) -> ZendeskClient {
        ZendeskClient::from_parts(
            server.url(),
            "testco".into(),
            auth_header(&Credentials::Basic {
                email: "agent@testco.com".into(),
                token: "secret".into(),
            }),
        )
    }

    #[test]
    fn test_basic_auth_header() {
        let header = auth_header(&Credentials::Basic {
            email: "agent@testco.com".into(),
            token: "secret".into(),
        });
        let expected = format!("Basic {}", BASE64.encode("agent@testco.com/token:secret"));
        assert_eq!(header, expected);
    }

    #[test]
    fn test_bearer_auth_header() {
        let header = auth_header(&Credentials::Bearer {
            token: "oauth123".into(),
        });
        assert_eq!(header, "Bearer oauth123");
    }

    #[rstest]
    #[case(json!({"a": 1}), "a=1")]
    #[case(json!({"a": 1, "b": ["x", "y"], "c": null}), "a=1&b=x&b=y")]
    #[case(json!({"active": true}), "active=true")]
    #[case(json!({"c": null}), "")]
    fn test_encode_query(#[case] params: Value, #[case] expected: &str) {
        let params = params.as_object().cloned().unwrap_or_default();
        let pairs = encode_query(&params);
        let joined = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        assert_eq!(joined, expected);
    }

    #[tokio::test]
    async fn test_get_sends_auth_and_query() {
        let mut server = Server::new_async().await;
        let expected_auth = format!("Basic {}", BASE64.encode("agent@testco.com/token:secret"));
        let mock = server
            .mock("GET", "/tickets.json")
            .match_header("authorization", expected_auth.as_str())
            .match_query(Matcher::UrlEncoded("sort_by".into(), "created_at".into()))
            .with_status(200)
            .with_body(r#"{"tickets": []}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let mut params = Params::new();
        params.insert("sort_by".into(), json!("created_at"));
        let response = client.get("/tickets.json", Some(&params)).await.unwrap();

        assert_eq!(response, json!({"tickets": []}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_caller_headers_override_defaults() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/exports.json")
            .match_header("accept", "text/csv")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server);
        let headers = vec![("Accept".to_string(), "text/csv".to_string())];
        client
            .request(Method::GET, "/exports.json", None, Some(&headers), None)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_repeated_and_null_query_keys() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tickets.json")
            .match_query(Matcher::Regex("^a=1&b=x&b=y$".into()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server);
        let mut params = Params::new();
        params.insert("a".into(), json!(1));
        params.insert("b".into(), json!(["x", "y"]));
        params.insert("c".into(), Value::Null);
        client.get("/tickets.json", Some(&params)).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_204_returns_empty_object() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/tickets/1.json")
            .with_status(204)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client.delete("/tickets/1.json").await.unwrap();
        assert_eq!(response, json!({}));
    }

    #[tokio::test]
    async fn test_error_envelope_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets/1.json")
            .with_status(403)
            .with_body(r#"{"error":"Forbidden","description":"no access"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get("/tickets/1.json", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: no access");
        assert!(matches!(err, ZendeskError::Api { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_unparsable_error_body_still_fails() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets/1.json")
            .with_status(500)
            .with_body("<html>boom</html>")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get("/tickets/1.json", None).await.unwrap_err();
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_rate_limit_headers_update_state() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets.json")
            .with_status(200)
            .with_header("X-Rate-Limit-Remaining", "42")
            .with_header("X-Rate-Limit-Reset", "1700000000")
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server);
        client.get("/tickets.json", None).await.unwrap();

        let state = client.rate_limit_status();
        assert_eq!(state.remaining, 42);
        assert_eq!(state.reset_at_ms, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_missing_headers_leave_state_untouched() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets.json")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server);
        let before = client.rate_limit_status();
        client.get("/tickets.json", None).await.unwrap();
        assert_eq!(client.rate_limit_status(), before);
    }

    #[tokio::test]
    async fn test_low_remaining_defers_next_call() {
        let mut server = Server::new_async().await;
        let reset_secs = now_ms() / 1000 + 2;
        server
            .mock("GET", "/tickets.json")
            .with_status(200)
            .with_header("X-Rate-Limit-Remaining", "5")
            .with_header("X-Rate-Limit-Reset", &reset_secs.to_string())
            .with_body("{}")
            .expect(2)
            .create_async()
            .await;

        let client = test_client(&server);
        client.get("/tickets.json", None).await.unwrap();

        // Second call must not be issued before the advertised reset.
        client.get("/tickets.json", None).await.unwrap();
        assert!(now_ms() >= reset_secs * 1000);
    }

    #[tokio::test]
    async fn test_cursor_pagination_rebuilds_params_per_page() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::Regex("^page_size=100$".into()))
            .with_body(r#"{"items":[1,2],"meta":{"has_more":true,"after_cursor":"abc"}}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page_size".into(), "100".into()),
                Matcher::UrlEncoded("cursor".into(), "abc".into()),
            ]))
            .with_body(r#"{"items":[3],"meta":{"has_more":true,"after_cursor":"def"}}"#)
            .create_async()
            .await;
        // The third request must carry the latest cursor only, never a
        // stale one.
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page_size".into(), "100".into()),
                Matcher::UrlEncoded("cursor".into(), "def".into()),
            ]))
            .with_body(r#"{"items":[4],"meta":{"has_more":false}}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client
            .paginate_all("/items.json", None, Some("items"))
            .await
            .unwrap();
        assert_eq!(items, vec![json!(1), json!(2), json!(3), json!(4)]);
    }

    #[tokio::test]
    async fn test_caller_page_size_wins() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/items.json")
            .match_query(Matcher::Regex("^page_size=25$".into()))
            .with_body(r#"{"items":[1]}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let mut params = Params::new();
        params.insert("page_size".into(), json!(25));
        client
            .paginate_all("/items.json", Some(&params), Some("items"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_link_pagination_uses_url_verbatim() {
        let mut server = Server::new_async().await;
        let next = format!("{}/items.json?page=2", server.url());
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::Regex("^page_size=100$".into()))
            .with_body(&format!(r#"{{"items":[1],"links":{{"next":"{next}"}}}}"#))
            .create_async()
            .await;
        // No params beyond what the link itself carries.
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::Regex("^page=2$".into()))
            .with_body(r#"{"items":[2]}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client
            .paginate_all("/items.json", None, Some("items"))
            .await
            .unwrap();
        assert_eq!(items, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn test_legacy_after_url_pagination() {
        let mut server = Server::new_async().await;
        let next = format!("{}/items.json?page=2", server.url());
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::Regex("^page_size=100$".into()))
            .with_body(&format!(r#"{{"items":[1],"meta":{{"after_url":"{next}"}}}}"#))
            .create_async()
            .await;
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::Regex("^page=2$".into()))
            .with_body(r#"{"items":[2]}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client
            .paginate_all("/items.json", None, Some("items"))
            .await
            .unwrap();
        assert_eq!(items, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn test_pagination_stops_without_continuation() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/items.json")
            .match_query(Matcher::Any)
            .with_body(r#"{"items":[1,2]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client
            .paginate_all("/items.json", None, Some("items"))
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_has_more_without_cursor_stops_quietly() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/items.json")
            .match_query(Matcher::Any)
            .with_body(r#"{"items":[1],"meta":{"has_more":true}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client
            .paginate_all("/items.json", None, Some("items"))
            .await
            .unwrap();
        assert_eq!(items, vec![json!(1)]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_page_ends_stream() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::Any)
            .with_body(r#"{"items":[],"meta":{"has_more":true,"after_cursor":"abc"}}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client
            .paginate_all("/items.json", None, Some("items"))
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_first_array_key_fallback() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/search.json")
            .match_query(Matcher::Any)
            .with_body(r#"{"count":2,"results":[{"id":1},{"id":2}]}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client.paginate_all("/search.json", None, None).await.unwrap();
        assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[tokio::test]
    async fn test_pagination_propagates_api_errors() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/items.json")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error":"Forbidden","description":"no access"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client
            .paginate_all("/items.json", None, Some("items"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: no access");
    }
}
