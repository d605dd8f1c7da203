use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::{
    CrudResource, Tool, args_without, conditions_from, copy_present, crud_tools, envelope,
    list_payload, require_str, require_u64, require_value,
};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "view",
            plural: "views",
            base_path: "/views",
            id_arg: "view_id",
            list_schema: json!({
                "type": "object",
                "properties": {
                    "active": {"type": "boolean", "description": "Filter by active status"},
                },
            }),
            create_schema: None,
            update_schema: None,
            deletable: true,
        },
    );

    tools.push(execute_view(client));
    tools.push(count_view(client));
    tools.push(create_view(client));
    tools.push(update_view(client));
    tools
}

fn execute_view(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_execute_view",
        "Execute a view and get the tickets that match",
        json!({
            "type": "object",
            "properties": {
                "view_id": {"type": "number", "description": "View ID"},
                "sort_by": {"type": "string", "description": "Field to sort by"},
                "sort_order": {"type": "string", "enum": ["asc", "desc"], "description": "Sort order"},
            },
            "required": ["view_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let view_id = require_u64(&args, "view_id")?;
                let params = args_without(&args, &["view_id"]);
                let tickets = client
                    .paginate_all(
                        &format!("/views/{view_id}/tickets.json"),
                        Some(&params),
                        Some("tickets"),
                    )
                    .await?;
                Ok(list_payload("tickets", tickets))
            }
        },
    )
}

fn count_view(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_count_view",
        "Get the count of tickets in a view",
        json!({
            "type": "object",
            "properties": {
                "view_id": {"type": "number", "description": "View ID"},
            },
            "required": ["view_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let view_id = require_u64(&args, "view_id")?;
                let response = client
                    .get(&format!("/views/{view_id}/count.json"), None)
                    .await?;
                Ok(envelope(&response, "view_count"))
            }
        },
    )
}

fn create_view(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_create_view",
        "Create a new view",
        json!({
            "type": "object",
            "properties": {
                "title": {"type": "string", "description": "View title"},
                "all_conditions": {"type": "array", "description": "All conditions (must all match)"},
                "any_conditions": {"type": "array", "description": "Any conditions (at least one must match)"},
                "output_columns": {"type": "array", "items": {"type": "string"}, "description": "Columns to display"},
                "restriction": {"type": "object", "description": "Restriction (type: Group/User, id: number)"},
            },
            "required": ["title", "all_conditions"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let title = require_str(&args, "title")?;
                require_value(&args, "all_conditions")?;

                let mut view = Map::new();
                view.insert("title".into(), json!(title));
                if let Some(conditions) = conditions_from(&args) {
                    view.insert("conditions".into(), conditions);
                }
                let mut execution = Map::new();
                if let Some(columns) = args.get("output_columns") {
                    execution.insert("columns".into(), columns.clone());
                }
                view.insert("execution".into(), Value::Object(execution));
                copy_present(&mut view, &args, &["restriction"]);

                let response = client
                    .post("/views.json", Some(&json!({"view": view})))
                    .await?;
                Ok(envelope(&response, "view"))
            }
        },
    )
}

fn update_view(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_update_view",
        "Update an existing view",
        json!({
            "type": "object",
            "properties": {
                "view_id": {"type": "number", "description": "View ID"},
                "title": {"type": "string", "description": "View title"},
                "active": {"type": "boolean", "description": "Active status"},
                "all_conditions": {"type": "array", "description": "All conditions"},
                "any_conditions": {"type": "array", "description": "Any conditions"},
                "output_columns": {"type": "array", "items": {"type": "string"}, "description": "Columns to display"},
            },
            "required": ["view_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let view_id = require_u64(&args, "view_id")?;
                let mut view = Map::new();
                copy_present(&mut view, &args, &["title", "active"]);
                if let Some(conditions) = conditions_from(&args) {
                    view.insert("conditions".into(), conditions);
                }
                if let Some(columns) = args.get("output_columns") {
                    view.insert("execution".into(), json!({"columns": columns}));
                }
                let response = client
                    .put(&format!("/views/{view_id}.json"), Some(&json!({"view": view})))
                    .await?;
                Ok(envelope(&response, "view"))
            }
        },
    )
}
