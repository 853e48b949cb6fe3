//! The `ExecutableNode` trait — the contract every node must fulfil.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::http::HttpTransport;
use crate::NodeError;

/// Shared context passed to a node for one execution batch.
///
/// Built by the engine before dispatch: it carries the input items, the
/// per-item node parameters the host has already resolved, the decrypted
/// credentials this node may read, and the HTTP request capability.
#[derive(Clone)]
pub struct ExecutionContext {
    /// ID of the parent workflow.
    pub workflow_id: uuid::Uuid,
    /// ID of the current execution run.
    pub execution_id: uuid::Uuid,
    items: Vec<Value>,
    /// Index-aligned with `items`.
    parameters: Vec<Map<String, Value>>,
    credentials: HashMap<String, Map<String, Value>>,
    http: Arc<dyn HttpTransport>,
}

impl ExecutionContext {
    pub fn new(
        workflow_id: uuid::Uuid,
        execution_id: uuid::Uuid,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            workflow_id,
            execution_id,
            items: Vec::new(),
            parameters: Vec::new(),
            credentials: HashMap::new(),
            http,
        }
    }

    /// Attach the input items flowing into this step, in order.
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    /// Attach per-item parameter maps (index-aligned with the items).
    pub fn with_parameters(mut self, parameters: Vec<Map<String, Value>>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attach decrypted credential fields for one credential type.
    pub fn with_credentials(
        mut self,
        type_name: impl Into<String>,
        fields: Map<String, Value>,
    ) -> Self {
        self.credentials.insert(type_name.into(), fields);
        self
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn http(&self) -> &dyn HttpTransport {
        self.http.as_ref()
    }

    /// Decrypted credential fields for `type_name`.
    ///
    /// # Errors
    /// Fails if the workflow has no credentials of that type configured.
    pub fn credentials(&self, type_name: &str) -> Result<&Map<String, Value>, NodeError> {
        self.credentials.get(type_name).ok_or_else(|| {
            NodeError::Application(format!("Missing credentials of type '{type_name}'"))
        })
    }

    /// String form of parameter `name` for item `item_index`.
    ///
    /// Numbers and booleans coerce to their display form (UI number fields
    /// reach nodes as JSON numbers); a missing or null parameter yields
    /// `default`.
    pub fn string_parameter(&self, name: &str, item_index: usize, default: &str) -> String {
        match self.parameters.get(item_index).and_then(|m| m.get(name)) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_owned(),
        }
    }

    /// Object form of parameter `name` for item `item_index`; anything that
    /// is not a JSON object yields an empty map.
    pub fn object_parameter(&self, name: &str, item_index: usize) -> Map<String, Value> {
        match self.parameters.get(item_index).and_then(|m| m.get(name)) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }
}

/// The core node trait.
///
/// All built-in integrations must implement this.
#[async_trait]
pub trait ExecutableNode: Send + Sync {
    /// Execute the node over every input item in `ctx`, returning one output
    /// value per input item, in input order.
    ///
    /// A failure on any item aborts the batch; no partial output is
    /// returned.
    async fn execute(&self, ctx: &ExecutionContext) -> Result<Vec<Value>, NodeError>;
}
