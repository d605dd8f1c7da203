use std::sync::Arc;

use serde_json::json;

use super::{CrudResource, Tool, crud_tools, envelope, list_payload, require_u64};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "ticket_field",
            plural: "ticket_fields",
            base_path: "/ticket_fields",
            id_arg: "field_id",
            list_schema: json!({
                "type": "object",
                "properties": {},
            }),
            create_schema: Some(json!({
                "type": "object",
                "properties": {
                    "type": {"type": "string", "enum": ["text", "textarea", "checkbox", "date", "integer", "decimal", "regexp", "multiselect", "tagger", "lookup"], "description": "Field type"},
                    "title": {"type": "string", "description": "Field title"},
                    "description": {"type": "string", "description": "Field description"},
                    "required": {"type": "boolean", "description": "Required for agents to solve"},
                    "tag": {"type": "string", "description": "Tag applied for checkbox fields"},
                    "custom_field_options": {"type": "array", "description": "Options for dropdown/multiselect fields"},
                    "regexp_for_validation": {"type": "string", "description": "Validation regexp"},
                },
                "required": ["type", "title"],
            })),
            update_schema: Some(json!({
                "type": "object",
                "properties": {
                    "field_id": {"type": "number", "description": "Ticket field ID"},
                    "title": {"type": "string", "description": "Field title"},
                    "description": {"type": "string", "description": "Field description"},
                    "required": {"type": "boolean", "description": "Required for agents to solve"},
                    "active": {"type": "boolean", "description": "Active status"},
                    "custom_field_options": {"type": "array", "description": "Options for dropdown/multiselect fields"},
                },
                "required": ["field_id"],
            })),
            deletable: true,
        },
    );

    tools.push(field_list_tool(
        client,
        "zendesk_list_user_fields",
        "List all user fields",
        "/user_fields.json",
        "user_fields",
    ));
    tools.push(field_get_tool(
        client,
        "zendesk_get_user_field",
        "Get a single user field by ID",
        "/user_fields",
        "user_field",
    ));
    tools.push(field_list_tool(
        client,
        "zendesk_list_organization_fields",
        "List all organization fields",
        "/organization_fields.json",
        "organization_fields",
    ));
    tools.push(field_get_tool(
        client,
        "zendesk_get_organization_field",
        "Get a single organization field by ID",
        "/organization_fields",
        "organization_field",
    ));
    tools
}

fn field_list_tool(
    client: &Arc<ZendeskClient>,
    name: &'static str,
    description: &'static str,
    path: &'static str,
    key: &'static str,
) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        name,
        description,
        json!({
            "type": "object",
            "properties": {},
        }),
        move |_args| {
            let client = Arc::clone(&client);
            async move {
                let fields = client.paginate_all(path, None, Some(key)).await?;
                Ok(list_payload(key, fields))
            }
        },
    )
}

fn field_get_tool(
    client: &Arc<ZendeskClient>,
    name: &'static str,
    description: &'static str,
    base_path: &'static str,
    key: &'static str,
) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        name,
        description,
        json!({
            "type": "object",
            "properties": {
                "field_id": {"type": "number", "description": "Field ID"},
            },
            "required": ["field_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let field_id = require_u64(&args, "field_id")?;
                let response = client
                    .get(&format!("{base_path}/{field_id}.json"), None)
                    .await?;
                Ok(envelope(&response, key))
            }
        },
    )
}
