use std::sync::Arc;

use serde_json::{Value, json};

use super::{CrudResource, Tool, crud_tools, list_payload, require_str, require_u64};
use crate::client::{Params, ZendeskClient};

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "user",
            plural: "users",
            base_path: "/users",
            id_arg: "user_id",
            list_schema: json!({
                "type": "object",
                "properties": {
                    "role": {"type": "string", "enum": ["end-user", "agent", "admin"], "description": "Filter by role"},
                    "permission_set": {"type": "number", "description": "Filter by permission set ID"},
                },
            }),
            create_schema: Some(json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "User name"},
                    "email": {"type": "string", "description": "User email"},
                    "role": {"type": "string", "enum": ["end-user", "agent", "admin"], "description": "User role", "default": "end-user"},
                    "verified": {"type": "boolean", "description": "Email verified status"},
                    "phone": {"type": "string", "description": "Phone number"},
                    "organization_id": {"type": "number", "description": "Organization ID"},
                    "external_id": {"type": "string", "description": "External ID for tracking"},
                    "time_zone": {"type": "string", "description": "Time zone"},
                    "locale": {"type": "string", "description": "Locale (e.g., en-US)"},
                    "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags"},
                    "user_fields": {"type": "object", "description": "Custom user field values"},
                    "details": {"type": "string", "description": "Details about the user"},
                    "notes": {"type": "string", "description": "Notes about the user"},
                },
                "required": ["name"],
            })),
            update_schema: Some(json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "number", "description": "User ID"},
                    "name": {"type": "string", "description": "User name"},
                    "email": {"type": "string", "description": "User email"},
                    "role": {"type": "string", "enum": ["end-user", "agent", "admin"], "description": "User role"},
                    "verified": {"type": "boolean", "description": "Email verified status"},
                    "phone": {"type": "string", "description": "Phone number"},
                    "organization_id": {"type": "number", "description": "Organization ID"},
                    "external_id": {"type": "string", "description": "External ID"},
                    "time_zone": {"type": "string", "description": "Time zone"},
                    "locale": {"type": "string", "description": "Locale"},
                    "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags"},
                    "user_fields": {"type": "object", "description": "Custom user field values"},
                    "details": {"type": "string", "description": "Details"},
                    "notes": {"type": "string", "description": "Notes"},
                    "suspended": {"type": "boolean", "description": "Suspended status"},
                },
                "required": ["user_id"],
            })),
            deletable: true,
        },
    );

    tools.push(search_users(client));
    tools.push(merge_users(client));
    tools.push(list_identities(client));
    tools.push(set_password(client));
    tools.push(get_related(client));
    tools
}

fn search_users(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_search_users",
        "Search users by query",
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query (name, email, phone, etc.)"},
                "external_id": {"type": "string", "description": "Search by external ID"},
            },
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let mut params = Params::new();
                if let Some(external_id) = args.get("external_id").and_then(Value::as_str) {
                    params.insert("query".into(), json!(format!("external_id:{external_id}")));
                } else if let Some(query) = args.get("query") {
                    params.insert("query".into(), query.clone());
                }
                let users = client
                    .paginate_all("/users/search.json", Some(&params), Some("users"))
                    .await?;
                Ok(list_payload("users", users))
            }
        },
    )
}

fn merge_users(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_merge_users",
        "Merge two users",
        json!({
            "type": "object",
            "properties": {
                "source_user_id": {"type": "number", "description": "Source user ID (will be merged and deleted)"},
                "target_user_id": {"type": "number", "description": "Target user ID (will receive all data)"},
            },
            "required": ["source_user_id", "target_user_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let source = require_u64(&args, "source_user_id")?;
                let target = require_u64(&args, "target_user_id")?;
                client
                    .put(
                        &format!("/users/{target}/merge.json"),
                        Some(&json!({"user": {"id": source}})),
                    )
                    .await
                    .map_err(Into::into)
            }
        },
    )
}

fn list_identities(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_list_user_identities",
        "List identities for a user (email, phone, etc.)",
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "number", "description": "User ID"},
            },
            "required": ["user_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let user_id = require_u64(&args, "user_id")?;
                let identities = client
                    .paginate_all(
                        &format!("/users/{user_id}/identities.json"),
                        None,
                        Some("identities"),
                    )
                    .await?;
                Ok(list_payload("identities", identities))
            }
        },
    )
}

fn set_password(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_set_user_password",
        "Set or change a user password",
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "number", "description": "User ID"},
                "password": {"type": "string", "description": "New password"},
            },
            "required": ["user_id", "password"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let user_id = require_u64(&args, "user_id")?;
                let password = require_str(&args, "password")?;
                client
                    .post(
                        &format!("/users/{user_id}/password.json"),
                        Some(&json!({"password": password})),
                    )
                    .await?;
                Ok(json!({"success": true}))
            }
        },
    )
}

fn get_related(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_get_user_related",
        "Get related information for a user (requested tickets, ccd tickets, assigned tickets, organizations)",
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "number", "description": "User ID"},
            },
            "required": ["user_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let user_id = require_u64(&args, "user_id")?;
                client
                    .get(&format!("/users/{user_id}/related.json"), None)
                    .await
                    .map_err(Into::into)
            }
        },
    )
}
