use std::sync::Arc;

use serde_json::{Map, json};

use super::{
    CrudResource, Tool, copy_present, crud_tools, envelope, require_str, require_u64,
    require_value,
};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "sla_policy",
            plural: "sla_policies",
            base_path: "/slas/policies",
            id_arg: "policy_id",
            list_schema: json!({
                "type": "object",
                "properties": {},
            }),
            create_schema: None,
            update_schema: None,
            deletable: true,
        },
    );

    tools.push(create_policy(client));
    tools.push(update_policy(client));
    tools
}

fn create_policy(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_create_sla_policy",
        "Create a new SLA policy",
        json!({
            "type": "object",
            "properties": {
                "title": {"type": "string", "description": "Policy title"},
                "description": {"type": "string", "description": "Policy description"},
                "filter_conditions": {"type": "array", "description": "Filter conditions (all must match)"},
                "policy_metrics": {"type": "array", "description": "Policy metrics with targets"},
            },
            "required": ["title", "policy_metrics"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let title = require_str(&args, "title")?;
                let mut policy = Map::new();
                policy.insert("title".into(), json!(title));
                copy_present(&mut policy, &args, &["description"]);
                let filter_all = args
                    .get("filter_conditions")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                policy.insert("filter".into(), json!({"all": filter_all}));
                policy.insert("policy_metrics".into(), require_value(&args, "policy_metrics")?);

                let response = client
                    .post("/slas/policies.json", Some(&json!({"sla_policy": policy})))
                    .await?;
                Ok(envelope(&response, "sla_policy"))
            }
        },
    )
}

fn update_policy(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_update_sla_policy",
        "Update an existing SLA policy",
        json!({
            "type": "object",
            "properties": {
                "policy_id": {"type": "number", "description": "SLA Policy ID"},
                "title": {"type": "string", "description": "Policy title"},
                "description": {"type": "string", "description": "Policy description"},
                "filter_conditions": {"type": "array", "description": "Filter conditions"},
                "policy_metrics": {"type": "array", "description": "Policy metrics"},
            },
            "required": ["policy_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let policy_id = require_u64(&args, "policy_id")?;
                let mut policy = Map::new();
                copy_present(&mut policy, &args, &["title", "description"]);
                if let Some(filter_all) = args.get("filter_conditions") {
                    policy.insert("filter".into(), json!({"all": filter_all}));
                }
                copy_present(&mut policy, &args, &["policy_metrics"]);
                let response = client
                    .put(
                        &format!("/slas/policies/{policy_id}.json"),
                        Some(&json!({"sla_policy": policy})),
                    )
                    .await?;
                Ok(envelope(&response, "sla_policy"))
            }
        },
    )
}
