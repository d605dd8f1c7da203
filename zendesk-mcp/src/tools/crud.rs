//! Declarative generation of the standard list/get/create/update/delete
//! tools. Each resource supplies its names, paths, and schemas; the
//! fetch/reshape logic lives here exactly once.

use std::sync::Arc;

use serde_json::{Value, json};

use super::{Tool, envelope, list_payload, params_from, require_u64};
use crate::client::ZendeskClient;

pub(crate) struct CrudResource {
    /// Singular envelope key, also the tool-name segment ("ticket").
    pub(crate) singular: &'static str,
    /// Plural envelope key for list responses ("tickets").
    pub(crate) plural: &'static str,
    /// Collection path without the `.json` suffix ("/tickets").
    pub(crate) base_path: &'static str,
    /// Argument carrying the resource id ("ticket_id").
    pub(crate) id_arg: &'static str,
    pub(crate) list_schema: Value,
    /// Present when the resource has a plain `{singular: args}` create.
    pub(crate) create_schema: Option<Value>,
    /// Present when the resource has a plain `{singular: rest}` update.
    pub(crate) update_schema: Option<Value>,
    pub(crate) deletable: bool,
}

impl CrudResource {
    fn noun(&self) -> String {
        self.singular.replace('_', " ")
    }

    fn plural_noun(&self) -> String {
        self.plural.replace('_', " ")
    }
}

fn id_schema(id_arg: &str, noun: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            id_arg: {"type": "number", "description": format!("{noun} ID")},
        },
        "required": [id_arg],
    })
}

pub(crate) fn crud_tools(client: &Arc<ZendeskClient>, resource: CrudResource) -> Vec<Tool> {
    let mut tools = vec![list_tool(client, &resource), get_tool(client, &resource)];
    if resource.create_schema.is_some() {
        tools.push(create_tool(client, &resource));
    }
    if resource.update_schema.is_some() {
        tools.push(update_tool(client, &resource));
    }
    if resource.deletable {
        tools.push(delete_tool(client, &resource));
    }
    tools
}

fn list_tool(client: &Arc<ZendeskClient>, resource: &CrudResource) -> Tool {
    let client = Arc::clone(client);
    let plural = resource.plural;
    let path = format!("{}.json", resource.base_path);
    Tool::new(
        format!("zendesk_list_{plural}"),
        format!("List {}", resource.plural_noun()),
        resource.list_schema.clone(),
        move |args| {
            let client = Arc::clone(&client);
            let path = path.clone();
            async move {
                let items = client
                    .paginate_all(&path, Some(&params_from(&args)), Some(plural))
                    .await?;
                Ok(list_payload(plural, items))
            }
        },
    )
}

fn get_tool(client: &Arc<ZendeskClient>, resource: &CrudResource) -> Tool {
    let client = Arc::clone(client);
    let singular = resource.singular;
    let id_arg = resource.id_arg;
    let base_path = resource.base_path;
    Tool::new(
        format!("zendesk_get_{singular}"),
        format!("Get a single {} by ID", resource.noun()),
        id_schema(id_arg, &resource.noun()),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let id = require_u64(&args, id_arg)?;
                let response = client.get(&format!("{base_path}/{id}.json"), None).await?;
                Ok(envelope(&response, singular))
            }
        },
    )
}

fn create_tool(client: &Arc<ZendeskClient>, resource: &CrudResource) -> Tool {
    let client = Arc::clone(client);
    let singular = resource.singular;
    let path = format!("{}.json", resource.base_path);
    let schema = resource.create_schema.clone().unwrap_or_else(|| json!({}));
    Tool::new(
        format!("zendesk_create_{singular}"),
        format!("Create a new {}", resource.noun()),
        schema,
        move |args| {
            let client = Arc::clone(&client);
            let path = path.clone();
            async move {
                let response = client.post(&path, Some(&json!({singular: args}))).await?;
                Ok(envelope(&response, singular))
            }
        },
    )
}

fn update_tool(client: &Arc<ZendeskClient>, resource: &CrudResource) -> Tool {
    let client = Arc::clone(client);
    let singular = resource.singular;
    let id_arg = resource.id_arg;
    let base_path = resource.base_path;
    let schema = resource.update_schema.clone().unwrap_or_else(|| json!({}));
    Tool::new(
        format!("zendesk_update_{singular}"),
        format!("Update an existing {}", resource.noun()),
        schema,
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let id = require_u64(&args, id_arg)?;
                let update = super::args_without(&args, &[id_arg]);
                let response = client
                    .put(
                        &format!("{base_path}/{id}.json"),
                        Some(&json!({singular: update})),
                    )
                    .await?;
                Ok(envelope(&response, singular))
            }
        },
    )
}

fn delete_tool(client: &Arc<ZendeskClient>, resource: &CrudResource) -> Tool {
    let client = Arc::clone(client);
    let id_arg = resource.id_arg;
    let base_path = resource.base_path;
    Tool::new(
        format!("zendesk_delete_{}", resource.singular),
        format!("Delete a {}", resource.noun()),
        id_schema(id_arg, &resource.noun()),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let id = require_u64(&args, id_arg)?;
                client.delete(&format!("{base_path}/{id}.json")).await?;
                Ok(json!({"success": true, id_arg: id}))
            }
        },
    )
}
