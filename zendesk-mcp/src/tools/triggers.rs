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
            singular: "trigger",
            plural: "triggers",
            base_path: "/triggers",
            id_arg: "trigger_id",
            list_schema: json!({
                "type": "object",
                "properties": {
                    "active": {"type": "boolean", "description": "Filter by active status"},
                    "category_id": {"type": "string", "description": "Filter by category ID"},
                },
            }),
            create_schema: None,
            update_schema: None,
            deletable: true,
        },
    );

    tools.push(create_trigger(client));
    tools.push(update_trigger(client));
    tools.push(reorder_triggers(client));
    tools
}

fn create_trigger(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_create_trigger",
        "Create a new trigger",
        json!({
            "type": "object",
            "properties": {
                "title": {"type": "string", "description": "Trigger title"},
                "all_conditions": {"type": "array", "description": "All conditions (must all match)"},
                "any_conditions": {"type": "array", "description": "Any conditions (at least one must match)"},
                "actions": {"type": "array", "description": "Trigger actions"},
                "description": {"type": "string", "description": "Trigger description"},
                "active": {"type": "boolean", "description": "Active status", "default": true},
                "category_id": {"type": "string", "description": "Category ID"},
            },
            "required": ["title", "all_conditions", "actions"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let title = require_str(&args, "title")?;
                require_value(&args, "all_conditions")?;

                let mut trigger = Map::new();
                trigger.insert("title".into(), json!(title));
                if let Some(conditions) = conditions_from(&args) {
                    trigger.insert("conditions".into(), conditions);
                }
                trigger.insert("actions".into(), require_value(&args, "actions")?);
                copy_present(&mut trigger, &args, &["description", "active", "category_id"]);

                let response = client
                    .post("/triggers.json", Some(&json!({"trigger": trigger})))
                    .await?;
                Ok(envelope(&response, "trigger"))
            }
        },
    )
}

fn update_trigger(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_update_trigger",
        "Update an existing trigger",
        json!({
            "type": "object",
            "properties": {
                "trigger_id": {"type": "number", "description": "Trigger ID"},
                "title": {"type": "string", "description": "Trigger title"},
                "all_conditions": {"type": "array", "description": "All conditions"},
                "any_conditions": {"type": "array", "description": "Any conditions"},
                "actions": {"type": "array", "description": "Trigger actions"},
                "description": {"type": "string", "description": "Trigger description"},
                "active": {"type": "boolean", "description": "Active status"},
            },
            "required": ["trigger_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let trigger_id = require_u64(&args, "trigger_id")?;
                let mut trigger = Map::new();
                copy_present(&mut trigger, &args, &["title", "description", "active"]);
                if let Some(conditions) = conditions_from(&args) {
                    trigger.insert("conditions".into(), conditions);
                }
                copy_present(&mut trigger, &args, &["actions"]);
                let response = client
                    .put(
                        &format!("/triggers/{trigger_id}.json"),
                        Some(&json!({"trigger": trigger})),
                    )
                    .await?;
                Ok(envelope(&response, "trigger"))
            }
        },
    )
}

fn reorder_triggers(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_reorder_triggers",
        "Reorder triggers by providing ordered IDs",
        json!({
            "type": "object",
            "properties": {
                "trigger_ids": {"type": "array", "items": {"type": "number"}, "description": "Ordered array of trigger IDs"},
            },
            "required": ["trigger_ids"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let trigger_ids = require_value(&args, "trigger_ids")?;
                client
                    .put(
                        "/triggers/reorder.json",
                        Some(&json!({"trigger_ids": trigger_ids})),
                    )
                    .await?;
                Ok(json!({"success": true}))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_and_bespoke_tool_names() {
        let client = Arc::new(ZendeskClient::new(&crate::config::Config {
            subdomain: "testco".into(),
            credentials: crate::config::Credentials::Bearer {
                token: "token".into(),
            },
        }));

        let names: Vec<String> = tools(&client).into_iter().map(|tool| tool.name).collect();
        assert_eq!(
            names,
            vec![
                "zendesk_list_triggers",
                "zendesk_get_trigger",
                "zendesk_delete_trigger",
                "zendesk_create_trigger",
                "zendesk_update_trigger",
                "zendesk_reorder_triggers",
            ]
        );
    }
}
