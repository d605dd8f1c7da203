//! Ticket tools: CRUD plus bulk updates, merging, tagging, comments,
//! ticket forms, and the per-ticket satisfaction rating.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use super::{
    CrudResource, Tool, args_without, crud_tools, envelope, list_payload, require_str,
    require_u64, require_value,
};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    let mut tools = crud_tools(
        client,
        CrudResource {
            singular: "ticket",
            plural: "tickets",
            base_path: "/tickets",
            id_arg: "ticket_id",
            list_schema: json!({
                "type": "object",
                "properties": {
                    "page_size": {"type": "number", "description": "Number of results per page (max 100)", "default": 100},
                    "sort_by": {"type": "string", "enum": ["created_at", "updated_at", "priority", "status", "ticket_type"], "description": "Field to sort by"},
                    "sort_order": {"type": "string", "enum": ["asc", "desc"], "description": "Sort order"},
                },
            }),
            create_schema: None,
            update_schema: Some(json!({
                "type": "object",
                "properties": {
                    "ticket_id": {"type": "number", "description": "Ticket ID"},
                    "subject": {"type": "string", "description": "Ticket subject"},
                    "comment": {
                        "type": "object",
                        "description": "Add a comment",
                        "properties": {
                            "body": {"type": "string", "description": "Comment body"},
                            "public": {"type": "boolean", "description": "Whether comment is public", "default": true},
                        },
                    },
                    "assignee_id": {"type": "number", "description": "Assignee user ID"},
                    "group_id": {"type": "number", "description": "Group ID"},
                    "type": {"type": "string", "enum": ["problem", "incident", "question", "task"], "description": "Ticket type"},
                    "priority": {"type": "string", "enum": ["urgent", "high", "normal", "low"], "description": "Ticket priority"},
                    "status": {"type": "string", "enum": ["new", "open", "pending", "hold", "solved", "closed"], "description": "Ticket status"},
                    "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags (replaces existing)"},
                    "custom_fields": {"type": "array", "description": "Custom field values"},
                    "due_at": {"type": "string", "description": "Due date (ISO 8601)"},
                },
                "required": ["ticket_id"],
            })),
            deletable: true,
        },
    );

    tools.push(create_ticket(client));
    tools.push(bulk_update(client));
    tools.push(merge_tickets(client));
    tools.push(tag_tool(client, "zendesk_add_ticket_tags", "Add tags to a ticket", "additional_tags"));
    tools.push(tag_tool(client, "zendesk_remove_ticket_tags", "Remove tags from a ticket", "remove_tags"));
    tools.push(add_comment(client));
    tools.push(list_comments(client));
    tools.push(list_forms(client));
    tools.push(get_form(client));
    tools.push(ticket_satisfaction(client));
    tools
}

fn create_ticket(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_create_ticket",
        "Create a new ticket",
        json!({
            "type": "object",
            "properties": {
                "subject": {"type": "string", "description": "Ticket subject"},
                "comment": {
                    "type": "object",
                    "description": "Initial comment",
                    "properties": {
                        "body": {"type": "string", "description": "Comment body"},
                        "public": {"type": "boolean", "description": "Whether comment is public", "default": true},
                    },
                    "required": ["body"],
                },
                "requester_id": {"type": "number", "description": "Requester user ID"},
                "requester_email": {"type": "string", "description": "Requester email (alternative to requester_id)"},
                "requester_name": {"type": "string", "description": "Requester name (used with email)"},
                "assignee_id": {"type": "number", "description": "Assignee user ID"},
                "group_id": {"type": "number", "description": "Group ID"},
                "type": {"type": "string", "enum": ["problem", "incident", "question", "task"], "description": "Ticket type"},
                "priority": {"type": "string", "enum": ["urgent", "high", "normal", "low"], "description": "Ticket priority"},
                "status": {"type": "string", "enum": ["new", "open", "pending", "hold", "solved", "closed"], "description": "Ticket status"},
                "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags"},
                "custom_fields": {"type": "array", "description": "Custom field values"},
                "external_id": {"type": "string", "description": "External ID for tracking"},
                "due_at": {"type": "string", "description": "Due date (ISO 8601)"},
                "brand_id": {"type": "number", "description": "Brand ID"},
                "ticket_form_id": {"type": "number", "description": "Ticket form ID"},
            },
            "required": ["comment"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let mut ticket = args.as_object().cloned().unwrap_or_default();

                // An email/name pair stands in for a requester id.
                if ticket.contains_key("requester_email") && !ticket.contains_key("requester_id") {
                    let email = ticket.shift_remove("requester_email").unwrap_or(Value::Null);
                    let name = ticket.shift_remove("requester_name");
                    let mut requester = Map::new();
                    requester.insert("email".into(), email);
                    if let Some(name) = name {
                        requester.insert("name".into(), name);
                    }
                    ticket.insert("requester".into(), Value::Object(requester));
                }

                let response = client
                    .post("/tickets.json", Some(&json!({"ticket": ticket})))
                    .await?;
                Ok(envelope(&response, "ticket"))
            }
        },
    )
}

fn bulk_update(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_bulk_update_tickets",
        "Update multiple tickets at once",
        json!({
            "type": "object",
            "properties": {
                "ticket_ids": {"type": "array", "items": {"type": "number"}, "description": "Array of ticket IDs"},
                "status": {"type": "string", "enum": ["new", "open", "pending", "hold", "solved", "closed"], "description": "Update status"},
                "assignee_id": {"type": "number", "description": "Assignee user ID"},
                "group_id": {"type": "number", "description": "Group ID"},
                "priority": {"type": "string", "enum": ["urgent", "high", "normal", "low"], "description": "Priority"},
                "type": {"type": "string", "enum": ["problem", "incident", "question", "task"], "description": "Ticket type"},
                "add_tags": {"type": "array", "items": {"type": "string"}, "description": "Tags to add"},
                "remove_tags": {"type": "array", "items": {"type": "string"}, "description": "Tags to remove"},
            },
            "required": ["ticket_ids"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let ids = require_value(&args, "ticket_ids")?;
                let mut update = args_without(&args, &["ticket_ids"]);
                update.insert("ids".into(), ids);
                let response = client
                    .put("/tickets/update_many.json", Some(&json!({"ticket": update})))
                    .await?;
                Ok(envelope(&response, "job_status"))
            }
        },
    )
}

fn merge_tickets(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_merge_tickets",
        "Merge one or more tickets into a target ticket",
        json!({
            "type": "object",
            "properties": {
                "target_ticket_id": {"type": "number", "description": "Target ticket ID to merge into"},
                "source_ticket_ids": {"type": "array", "items": {"type": "number"}, "description": "Source ticket IDs to merge"},
                "target_comment": {"type": "string", "description": "Comment to add to target ticket"},
                "source_comment": {"type": "string", "description": "Comment to add to source tickets"},
            },
            "required": ["target_ticket_id", "source_ticket_ids"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let target = require_u64(&args, "target_ticket_id")?;
                let mut body = Map::new();
                body.insert("ids".into(), require_value(&args, "source_ticket_ids")?);
                super::copy_present(&mut body, &args, &["target_comment", "source_comment"]);
                client
                    .post(
                        &format!("/tickets/{target}/merge.json"),
                        Some(&Value::Object(body)),
                    )
                    .await
                    .map_err(Into::into)
            }
        },
    )
}

fn tag_tool(
    client: &Arc<ZendeskClient>,
    name: &'static str,
    description: &'static str,
    field: &'static str,
) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        name,
        description,
        json!({
            "type": "object",
            "properties": {
                "ticket_id": {"type": "number", "description": "Ticket ID"},
                "tags": {"type": "array", "items": {"type": "string"}, "description": "Tags"},
            },
            "required": ["ticket_id", "tags"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let ticket_id = require_u64(&args, "ticket_id")?;
                let tags = require_value(&args, "tags")?;
                let response = client
                    .put(
                        &format!("/tickets/{ticket_id}.json"),
                        Some(&json!({"ticket": {field: tags}})),
                    )
                    .await?;
                Ok(envelope(&response, "ticket"))
            }
        },
    )
}

fn add_comment(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_add_ticket_comment",
        "Add a comment to a ticket",
        json!({
            "type": "object",
            "properties": {
                "ticket_id": {"type": "number", "description": "Ticket ID"},
                "body": {"type": "string", "description": "Comment body"},
                "public": {"type": "boolean", "description": "Whether comment is public", "default": true},
                "author_id": {"type": "number", "description": "Author user ID (if different from authenticated user)"},
            },
            "required": ["ticket_id", "body"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let ticket_id = require_u64(&args, "ticket_id")?;
                let body = require_str(&args, "body")?;
                let mut comment = Map::new();
                comment.insert("body".into(), json!(body));
                comment.insert(
                    "public".into(),
                    args.get("public").cloned().unwrap_or(json!(true)),
                );
                super::copy_present(&mut comment, &args, &["author_id"]);
                let response = client
                    .put(
                        &format!("/tickets/{ticket_id}.json"),
                        Some(&json!({"ticket": {"comment": comment}})),
                    )
                    .await?;
                Ok(envelope(&response, "ticket"))
            }
        },
    )
}

fn list_comments(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_list_ticket_comments",
        "List all comments for a ticket",
        json!({
            "type": "object",
            "properties": {
                "ticket_id": {"type": "number", "description": "Ticket ID"},
                "sort_order": {"type": "string", "enum": ["asc", "desc"], "description": "Sort order (asc = oldest first, desc = newest first)"},
            },
            "required": ["ticket_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let ticket_id = require_u64(&args, "ticket_id")?;
                let params = args_without(&args, &["ticket_id"]);
                let comments = client
                    .paginate_all(
                        &format!("/tickets/{ticket_id}/comments.json"),
                        Some(&params),
                        Some("comments"),
                    )
                    .await?;
                Ok(list_payload("comments", comments))
            }
        },
    )
}

fn list_forms(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_list_ticket_forms",
        "List all ticket forms",
        json!({
            "type": "object",
            "properties": {
                "active": {"type": "boolean", "description": "Filter by active status"},
            },
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let forms = client
                    .paginate_all(
                        "/ticket_forms.json",
                        Some(&super::params_from(&args)),
                        Some("ticket_forms"),
                    )
                    .await?;
                Ok(list_payload("ticket_forms", forms))
            }
        },
    )
}

fn get_form(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_get_ticket_form",
        "Get a single ticket form by ID",
        json!({
            "type": "object",
            "properties": {
                "form_id": {"type": "number", "description": "Ticket form ID"},
            },
            "required": ["form_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let form_id = require_u64(&args, "form_id")?;
                let response = client
                    .get(&format!("/ticket_forms/{form_id}.json"), None)
                    .await?;
                Ok(envelope(&response, "ticket_form"))
            }
        },
    )
}

fn ticket_satisfaction(client: &Arc<ZendeskClient>) -> Tool {
    let client = Arc::clone(client);
    Tool::new(
        "zendesk_get_satisfaction_rating",
        "Get the satisfaction rating for a ticket",
        json!({
            "type": "object",
            "properties": {
                "ticket_id": {"type": "number", "description": "Ticket ID"},
            },
            "required": ["ticket_id"],
        }),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let ticket_id = require_u64(&args, "ticket_id")?;
                let response = client
                    .get(&format!("/tickets/{ticket_id}.json"), None)
                    .await?;
                let rating = response
                    .pointer("/ticket/satisfaction_rating")
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(json!({"satisfaction_rating": rating}))
            }
        },
    )
}
