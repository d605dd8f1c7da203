use std::sync::Arc;

use serde_json::json;

use super::{Tool, list_payload, require_str};
use crate::client::{Params, ZendeskClient};

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    vec![list_tags(client), autocomplete_tags(client)]
}

fn list_tags(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_list_tags",
        "List all tags in use across the account",
        json!({
            "type": "object",
            "properties": {},
        }),
        move |_args| {
            let client = Arc::clone(&client);
            async move {
                let tags = client.paginate_all("/tags.json", None, Some("tags")).await?;
                Ok(list_payload("tags", tags))
            }
        },
    )
}

fn autocomplete_tags(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_autocomplete_tags",
        "Autocomplete tags based on a query",
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Tag prefix to autocomplete"},
            },
            "required": ["name"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let name = require_str(&args, "name")?;
                let mut params = Params::new();
                params.insert("name".into(), json!(name));
                client
                    .get("/autocomplete/tags.json", Some(&params))
                    .await
                    .map_err(Into::into)
            }
        },
    )
}
