//! The Hotjar node: per-batch authentication, per-item request dispatch,
//! and response normalization.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use host::http::{HttpMethod, HttpRequest, RequestBody, ResponseBody};
use host::traits::{ExecutableNode, ExecutionContext};
use host::NodeError;

use crate::auth::fetch_access_token;
use crate::operations::{self, Identifiers, Operation, Resource};
use crate::{API_BASE_URL, CREDENTIAL_TYPE};

/// The Hotjar integration node.
pub struct HotjarNode {
    base_url: String,
}

impl Default for HotjarNode {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
        }
    }
}

impl HotjarNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the node at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build, issue, and normalize the request for one input item.
    async fn run_item(
        &self,
        ctx: &ExecutionContext,
        index: usize,
        access_token: &str,
    ) -> Result<Value, NodeError> {
        let resource = Resource::parse(&ctx.string_parameter("resource", index, ""))?;
        let operation = Operation::parse(&ctx.string_parameter("operation", index, ""))?;
        let ids = Identifiers {
            site_id: ctx.string_parameter("siteId", index, ""),
            survey_id: ctx.string_parameter("surveyId", index, ""),
            organization_id: ctx.string_parameter("organizationId", index, ""),
        };
        let query_parameters = ctx.object_parameter("queryParameters", index);
        let request_body = ctx.string_parameter("requestBody", index, "");

        // Identifiers are validated before any URL is assembled.
        let path = operations::endpoint_path(resource, operation, &ids)?;
        let query = operations::build_query_string(&query_parameters);
        let url = format!("{}{}{}", self.base_url, path, query);

        let method = operation.http_method();

        let body = if matches!(
            method,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch
        ) && !operation.is_delete()
        {
            let parsed: Value = serde_json::from_str(&request_body).map_err(|e| {
                NodeError::Application(format!("Request body is not valid JSON: {e}"))
            })?;
            Some(RequestBody::Json(parsed))
        } else {
            None
        };

        let request = HttpRequest {
            method,
            url: url.clone(),
            headers: vec![
                ("Content-Type".into(), "application/json".into()),
                ("Accept".into(), "application/json".into()),
                ("Authorization".into(), format!("Bearer {access_token}")),
            ],
            body,
        };

        debug!(%method, %url, item = index, "dispatching Hotjar request");

        let response = ctx.http().request(request).await?;
        Ok(normalize_response(response.body))
    }
}

#[async_trait]
impl ExecutableNode for HotjarNode {
    async fn execute(&self, ctx: &ExecutionContext) -> Result<Vec<Value>, NodeError> {
        let credentials = ctx.credentials(CREDENTIAL_TYPE)?;
        let client_id = credentials
            .get("clientId")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let client_secret = credentials
            .get("clientSecret")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if client_id.is_empty() || client_secret.is_empty() {
            return Err(NodeError::Application(
                "Missing Client ID or Client Secret.".into(),
            ));
        }

        // One exchange per batch, before the item loop; never cached across
        // batches.
        let access_token =
            fetch_access_token(ctx.http(), &self.base_url, client_id, client_secret).await?;

        let mut output = Vec::with_capacity(ctx.items().len());
        for index in 0..ctx.items().len() {
            match self.run_item(ctx, index, &access_token).await {
                Ok(item) => output.push(item),
                // Fail-fast: one bad item aborts the batch, remaining items
                // are not processed and no partial output is returned.
                Err(err) => return Err(api_error(err)),
            }
        }

        Ok(output)
    }
}

/// Shape an upstream response body into a single output item.
pub(crate) fn normalize_response(body: ResponseBody) -> Value {
    match body {
        ResponseBody::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                json!({ "Status Code": "204 No Content" })
            } else {
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(parsed) => json!({ "json": parsed }),
                    Err(_) => json!({ "text": trimmed }),
                }
            }
        }
        ResponseBody::Json(Value::Null) | ResponseBody::Empty => {
            json!({ "Status Code": "204 No Content" })
        }
        ResponseBody::Json(value) => value,
    }
}

/// Wrap any per-item failure into the uniform provider-API error.
fn api_error(err: NodeError) -> NodeError {
    let description = match &err {
        NodeError::Transport(detail) => detail.clone(),
        other => other.to_string(),
    };
    NodeError::Api {
        message: format!("Error calling Hotjar API: {err}"),
        description,
    }
}
