//! The lookup tools the guide offers its responder.

use async_trait::async_trait;
use serde_json::json;

use byteguide_directory::StoreSearch;

use crate::chat::ToolDefinition;
use crate::error::ToolError;

/// Tool name for the relevance search.
pub const GET_STORES: &str = "GetStores";
/// Tool name for the hours lookup.
pub const GET_HOURS: &str = "GetHours";
/// Rendered when an hours lookup matches no store.
pub const STORE_NOT_FOUND: &str = "Store not found";

/// The set of lookup tools a responder may invoke.
///
/// Text in, text out: `arguments` is the raw JSON argument payload from the
/// model, and the result goes back as display text. Tool failures are values,
/// not panics, so the responder can relay them to the model.
#[async_trait]
pub trait Toolbox: Send + Sync {
    /// Definitions to advertise in the chat request.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Runs the named tool against its raw argument payload.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for a name not in
    /// [`definitions`](Self::definitions).
    async fn invoke(&self, name: &str, arguments: &str) -> Result<String, ToolError>;
}

/// [`Toolbox`] over the mall directory.
pub struct DirectoryToolbox {
    search: StoreSearch,
}

impl DirectoryToolbox {
    #[must_use]
    pub fn new(search: StoreSearch) -> Self {
        Self { search }
    }

    /// Pretty-printed JSON array of the top-scoring stores. `[]` when the
    /// query matches nothing.
    async fn get_stores(&self, query: &str) -> String {
        let results = self.search.search(query).await;
        serde_json::to_string_pretty(&results).unwrap_or_else(|_| "[]".to_owned())
    }

    /// Pretty-printed hours object, or the not-found sentinel.
    async fn get_hours(&self, store_name: &str) -> String {
        match self.search.hours_for(store_name).await {
            Some(hours) => {
                serde_json::to_string_pretty(&hours).unwrap_or_else(|_| "{}".to_owned())
            }
            None => STORE_NOT_FOUND.to_owned(),
        }
    }
}

#[async_trait]
impl Toolbox for DirectoryToolbox {
    fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: GET_STORES.to_owned(),
                description: "Gets store information based on the query".to_owned(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Free-text description of what the visitor is looking for"
                        }
                    },
                    "required": ["query"]
                }),
            },
            ToolDefinition {
                name: GET_HOURS.to_owned(),
                description: "Gets current store hours".to_owned(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "store_name": {
                            "type": "string",
                            "description": "Exact store name, case-insensitive"
                        }
                    },
                    "required": ["store_name"]
                }),
            },
        ]
    }

    async fn invoke(&self, name: &str, arguments: &str) -> Result<String, ToolError> {
        match name {
            GET_STORES => Ok(self.get_stores(&text_argument(arguments, "query")).await),
            GET_HOURS => Ok(self.get_hours(&text_argument(arguments, "store_name")).await),
            other => Err(ToolError::UnknownTool(other.to_owned())),
        }
    }
}

/// Pulls the named key out of an OpenAI-style JSON argument object.
///
/// Models occasionally send a bare JSON string or plain text instead of the
/// object; both are accepted as the value itself.
fn text_argument(arguments: &str, key: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(arguments) {
        Ok(serde_json::Value::Object(map)) => map
            .get(key)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        Ok(serde_json::Value::String(s)) => s,
        _ => arguments.trim().to_owned(),
    }
}
