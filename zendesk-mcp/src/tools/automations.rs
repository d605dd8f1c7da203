use std::sync::Arc;

use serde_json::{Map, json};

use super::{
    CrudResource, Tool, conditions_from, copy_present, crud_tools, envelope, require_str,
    require_u64, require_value,
};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "automation",
            plural: "automations",
            base_path: "/automations",
            id_arg: "automation_id",
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

    tools.push(create_automation(client));
    tools.push(update_automation(client));
    tools
}

fn create_automation(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_create_automation",
        "Create a new automation",
        json!({
            "type": "object",
            "properties": {
                "title": {"type": "string", "description": "Automation title"},
                "all_conditions": {"type": "array", "description": "All conditions (must all match)"},
                "any_conditions": {"type": "array", "description": "Any conditions (at least one must match)"},
                "actions": {"type": "array", "description": "Automation actions"},
                "active": {"type": "boolean", "description": "Active status", "default": true},
            },
            "required": ["title", "all_conditions", "actions"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let title = require_str(&args, "title")?;
                require_value(&args, "all_conditions")?;

                let mut automation = Map::new();
                automation.insert("title".into(), json!(title));
                if let Some(conditions) = conditions_from(&args) {
                    automation.insert("conditions".into(), conditions);
                }
                automation.insert("actions".into(), require_value(&args, "actions")?);
                copy_present(&mut automation, &args, &["active"]);

                let response = client
                    .post("/automations.json", Some(&json!({"automation": automation})))
                    .await?;
                Ok(envelope(&response, "automation"))
            }
        },
    )
}

fn update_automation(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_update_automation",
        "Update an existing automation",
        json!({
            "type": "object",
            "properties": {
                "automation_id": {"type": "number", "description": "Automation ID"},
                "title": {"type": "string", "description": "Automation title"},
                "all_conditions": {"type": "array", "description": "All conditions"},
                "any_conditions": {"type": "array", "description": "Any conditions"},
                "actions": {"type": "array", "description": "Automation actions"},
                "active": {"type": "boolean", "description": "Active status"},
            },
            "required": ["automation_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let automation_id = require_u64(&args, "automation_id")?;
                let mut automation = Map::new();
                copy_present(&mut automation, &args, &["title", "active"]);
                if let Some(conditions) = conditions_from(&args) {
                    automation.insert("conditions".into(), conditions);
                }
                copy_present(&mut automation, &args, &["actions"]);
                let response = client
                    .put(
                        &format!("/automations/{automation_id}.json"),
                        Some(&json!({"automation": automation})),
                    )
                    .await?;
                Ok(envelope(&response, "automation"))
            }
        },
    )
}
