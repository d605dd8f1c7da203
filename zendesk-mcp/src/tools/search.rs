use std::sync::Arc;

use serde_json::json;

use super::{Tool, list_payload, params_from, require_str};
use crate::client::{Params, ZendeskClient};

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    vec![
        universal_search(client),
        typed_search(client, "zendesk_search_tickets", "Search specifically for tickets", "ticket", "tickets"),
        typed_search(client, "zendesk_search_users", "Search specifically for users", "user", "users"),
        typed_search(client, "zendesk_search_organizations", "Search specifically for organizations", "organization", "organizations"),
    ]
}

fn universal_search(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_search",
        "Universal search across tickets, users, and organizations",
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query (supports Zendesk search syntax)"},
                "sort_by": {"type": "string", "description": "Field to sort by"},
                "sort_order": {"type": "string", "enum": ["asc", "desc"], "description": "Sort order"},
            },
            "required": ["query"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                require_str(&args, "query")?;
                let results = client
                    .paginate_all("/search.json", Some(&params_from(&args)), Some("results"))
                    .await?;
                Ok(list_payload("results", results))
            }
        },
    )
}

/// The search endpoint is shared; scoped variants prepend a
/// `type:<kind>` filter to the caller's query.
fn typed_search(
    client: &Arc<ZendeskClient>,
    name: &'static str,
    description: &'static str,
    kind: &'static str,
    result_key: &'static str,
) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        name,
        description,
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query"},
            },
            "required": ["query"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let query = require_str(&args, "query")?;
                let mut params = Params::new();
                params.insert("query".into(), json!(format!("type:{kind} {query}")));
                let results = client
                    .paginate_all("/search.json", Some(&params), Some("results"))
                    .await?;
                Ok(list_payload(result_key, results))
            }
        },
    )
}
