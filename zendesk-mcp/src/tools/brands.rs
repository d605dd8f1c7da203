use std::sync::Arc;

use serde_json::json;

use super::{CrudResource, Tool, crud_tools};
use crate::client::ZendeskClient;

pub fn tools(client: &Arc<ZendeskClient>) -> Vec<Tool> {
    crud_tools(
        client,
        CrudResource {
            singular: "brand",
            plural: "brands",
            base_path: "/brands",
            id_arg: "brand_id",
            list_schema: json!({
                "type": "object",
                "properties": {},
            }),
            create_schema: Some(json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Brand name"},
                    "subdomain": {"type": "string", "description": "Brand subdomain"},
                    "host_mapping": {"type": "string", "description": "Custom host mapping"},
                    "brand_url": {"type": "string", "description": "Brand URL"},
                    "active": {"type": "boolean", "description": "Active status"},
                    "default": {"type": "boolean", "description": "Whether this is the default brand"},
                    "signature_template": {"type": "string", "description": "Agent signature template"},
                },
                "required": ["name", "subdomain"],
            })),
            update_schema: Some(json!({
                "type": "object",
                "properties": {
                    "brand_id": {"type": "number", "description": "Brand ID"},
                    "name": {"type": "string", "description": "Brand name"},
                    "host_mapping": {"type": "string", "description": "Custom host mapping"},
                    "brand_url": {"type": "string", "description": "Brand URL"},
                    "active": {"type": "boolean", "description": "Active status"},
                    "default": {"type": "boolean", "description": "Whether this is the default brand"},
                    "signature_template": {"type": "string", "description": "Agent signature template"},
                },
                "required": ["brand_id"],
            })),
            deletable: false,
        },
    )
}
