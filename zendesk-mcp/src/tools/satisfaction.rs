use std::sync::Arc;

use serde_json::json;

use super::{CrudResource, Tool, crud_tools};
use crate::client::ZendeskClient;

/// The per-ticket rating lookup lives with the ticket tools; this
/// module covers the account-wide rating feed.
pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    crud_tools(
        client,
        CrudResource {
            singular: "satisfaction_rating",
            plural: "satisfaction_ratings",
            base_path: "/satisfaction_ratings",
            id_arg: "rating_id",
            list_schema: json!({
                "type": "object",
                "properties": {
                    "score": {"type": "string", "enum": ["offered", "unoffered", "good", "bad"], "description": "Filter by score"},
                    "start_time": {"type": "string", "description": "Start time (ISO 8601)"},
                    "end_time": {"type": "string", "description": "End time (ISO 8601)"},
                    "sort_by": {"type": "string", "enum": ["created_at", "updated_at"], "description": "Sort by field"},
                    "sort_order": {"type": "string", "enum": ["asc", "desc"], "description": "Sort order"},
                },
            }),
            create_schema: None,
            update_schema: None,
            deletable: false,
        },
    )
}
