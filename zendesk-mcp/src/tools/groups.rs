use std::sync::Arc;

use serde_json::json;

use super::{CrudResource, Tool, crud_tools, list_payload, require_u64};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "group",
            plural: "groups",
            base_path: "/groups",
            id_arg: "group_id",
            list_schema: json!({
                "type": "object",
                "properties": {},
            }),
            create_schema: Some(json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Group name"},
                    "description": {"type": "string", "description": "Group description"},
                    "default": {"type": "boolean", "description": "Whether this is the default group"},
                },
                "required": ["name"],
            })),
            update_schema: Some(json!({
                "type": "object",
                "properties": {
                    "group_id": {"type": "number", "description": "Group ID"},
                    "name": {"type": "string", "description": "Group name"},
                    "description": {"type": "string", "description": "Group description"},
                },
                "required": ["group_id"],
            })),
            deletable: true,
        },
    );

    tools.push(list_memberships(client));
    tools
}

fn list_memberships(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_list_group_memberships",
        "List memberships for a group",
        json!({
            "type": "object",
            "properties": {
                "group_id": {"type": "number", "description": "Group ID"},
            },
            "required": ["group_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let group_id = require_u64(&args, "group_id")?;
                let memberships = client
                    .paginate_all(
                        &format!("/groups/{group_id}/memberships.json"),
                        None,
                        Some("group_memberships"),
                    )
                    .await?;
                Ok(list_payload("group_memberships", memberships))
            }
        },
    )
}
