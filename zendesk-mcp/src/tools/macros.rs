use std::sync::Arc;

use serde_json::json;

use super::{CrudResource, Tool, crud_tools, envelope, require_u64};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "macro",
            plural: "macros",
            base_path: "/macros",
            id_arg: "macro_id",
            list_schema: json!({
                "type": "object",
                "properties": {
                    "active": {"type": "boolean", "description": "Filter by active status"},
                    "category": {"type": "number", "description": "Filter by category ID"},
                },
            }),
            create_schema: Some(json!({
                "type": "object",
                "properties": {
                    "title": {"type": "string", "description": "Macro title"},
                    "actions": {"type": "array", "description": "Macro actions (field/value pairs)"},
                    "description": {"type": "string", "description": "Macro description"},
                    "active": {"type": "boolean", "description": "Active status", "default": true},
                    "restriction": {"type": "object", "description": "Restriction (type: Group/User, id: number)"},
                },
                "required": ["title", "actions"],
            })),
            update_schema: Some(json!({
                "type": "object",
                "properties": {
                    "macro_id": {"type": "number", "description": "Macro ID"},
                    "title": {"type": "string", "description": "Macro title"},
                    "actions": {"type": "array", "description": "Macro actions"},
                    "description": {"type": "string", "description": "Macro description"},
                    "active": {"type": "boolean", "description": "Active status"},
                },
                "required": ["macro_id"],
            })),
            deletable: true,
        },
    );

    tools.push(apply_macro(client));
    tools
}

fn apply_macro(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_apply_macro",
        "Apply a macro to a ticket (returns preview without saving)",
        json!({
            "type": "object",
            "properties": {
                "macro_id": {"type": "number", "description": "Macro ID"},
                "ticket_id": {"type": "number", "description": "Ticket ID"},
            },
            "required": ["macro_id", "ticket_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let macro_id = require_u64(&args, "macro_id")?;
                let ticket_id = require_u64(&args, "ticket_id")?;
                let response = client
                    .get(
                        &format!("/tickets/{ticket_id}/macros/{macro_id}/apply.json"),
                        None,
                    )
                    .await?;
                Ok(envelope(&response, "result"))
            }
        },
    )
}
