use std::sync::Arc;

use serde_json::json;

use super::{CrudResource, Tool, crud_tools, require_u64};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "suspended_ticket",
            plural: "suspended_tickets",
            base_path: "/suspended_tickets",
            id_arg: "suspended_ticket_id",
            list_schema: json!({
                "type": "object",
                "properties": {},
            }),
            create_schema: None,
            update_schema: None,
            deletable: true,
        },
    );

    tools.push(recover(client));
    tools
}

fn recover(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_recover_suspended_ticket",
        "Recover a suspended ticket into a regular ticket",
        json!({
            "type": "object",
            "properties": {
                "suspended_ticket_id": {"type": "number", "description": "Suspended ticket ID"},
            },
            "required": ["suspended_ticket_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let id = require_u64(&args, "suspended_ticket_id")?;
                client
                    .put(
                        &format!("/suspended_tickets/{id}/recover.json"),
                        Some(&json!({})),
                    )
                    .await
                    .map_err(Into::into)
            }
        },
    )
}
