use std::sync::Arc;

use serde_json::json;

use super::{
    CrudResource, Tool, crud_tools, envelope, list_payload, require_str, require_u64,
};
use crate::client::{Params, ZendeskClient};

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "organization",
            plural: "organizations",
            base_path: "/organizations",
            id_arg: "organization_id",
            list_schema: json!({
                "type": "object",
                "properties": {},
            }),
            create_schema: Some(json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Organization name"},
                    "domain_names": {"type": "array", "items": {"type": "string"}, "description": "Email domains for auto-assignment"},
                    "details": {"type": "string", "description": "Details about the organization"},
                    "notes": {"type": "string", "description": "Notes"},
                    "external_id": {"type": "string", "description": "External ID"},
                    "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags"},
                    "organization_fields": {"type": "object", "description": "Custom organization field values"},
                    "shared_tickets": {"type": "boolean", "description": "Share tickets with all members"},
                    "shared_comments": {"type": "boolean", "description": "Share comments with all members"},
                },
                "required": ["name"],
            })),
            update_schema: Some(json!({
                "type": "object",
                "properties": {
                    "organization_id": {"type": "number", "description": "Organization ID"},
                    "name": {"type": "string", "description": "Organization name"},
                    "domain_names": {"type": "array", "items": {"type": "string"}, "description": "Email domains"},
                    "details": {"type": "string", "description": "Details"},
                    "notes": {"type": "string", "description": "Notes"},
                    "external_id": {"type": "string", "description": "External ID"},
                    "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags"},
                    "organization_fields": {"type": "object", "description": "Custom organization field values"},
                },
                "required": ["organization_id"],
            })),
            deletable: true,
        },
    );

    tools.push(search_organizations(client));
    tools.push(list_memberships(client));
    tools.push(create_membership(client));
    tools
}

fn search_organizations(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_search_organizations",
        "Search organizations by name or domain",
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query"},
            },
            "required": ["query"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let query = require_str(&args, "query")?;
                let mut params = Params::new();
                params.insert("query".into(), json!(query));
                let organizations = client
                    .paginate_all("/organizations/search.json", Some(&params), Some("organizations"))
                    .await?;
                Ok(list_payload("organizations", organizations))
            }
        },
    )
}

fn list_memberships(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_list_organization_memberships",
        "List memberships for an organization",
        json!({
            "type": "object",
            "properties": {
                "organization_id": {"type": "number", "description": "Organization ID"},
            },
            "required": ["organization_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let organization_id = require_u64(&args, "organization_id")?;
                let memberships = client
                    .paginate_all(
                        &format!("/organizations/{organization_id}/organization_memberships.json"),
                        None,
                        Some("organization_memberships"),
                    )
                    .await?;
                Ok(list_payload("organization_memberships", memberships))
            }
        },
    )
}

fn create_membership(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_create_organization_membership",
        "Add a user to an organization",
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "number", "description": "User ID"},
                "organization_id": {"type": "number", "description": "Organization ID"},
            },
            "required": ["user_id", "organization_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let response = client
                    .post(
                        "/organization_memberships.json",
                        Some(&json!({"organization_membership": args})),
                    )
                    .await?;
                Ok(envelope(&response, "organization_membership"))
            }
        },
    )
}
