//! OAuth2 client-credentials exchange against the Hotjar token endpoint.

use serde_json::Value;

use host::http::{HttpMethod, HttpRequest, HttpTransport, RequestBody, ResponseBody};
use host::NodeError;

/// Token endpoint path, relative to the API base.
pub const TOKEN_PATH: &str = "/v1/oauth/token";

pub const GRANT_TYPE: &str = "client_credentials";

/// Build the form-urlencoded token request.
pub fn token_request(base_url: &str, client_id: &str, client_secret: &str) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Post,
        url: format!("{base_url}{TOKEN_PATH}"),
        headers: vec![(
            "Content-Type".into(),
            "application/x-www-form-urlencoded".into(),
        )],
        body: Some(RequestBody::Form(vec![
            ("client_id".into(), client_id.into()),
            ("client_secret".into(), client_secret.into()),
            ("grant_type".into(), GRANT_TYPE.into()),
        ])),
    }
}

/// Trade a client ID/secret pair for a bearer access token.
///
/// Called once per execution batch, before the item loop; the token is never
/// cached across batches.
///
/// # Errors
/// Transport failures propagate as-is; a response without a string
/// `access_token` field fails with
/// `Application("Failed to retrieve access token.")`.
pub async fn fetch_access_token(
    transport: &dyn HttpTransport,
    base_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String, NodeError> {
    let response = transport
        .request(token_request(base_url, client_id, client_secret))
        .await?;

    let token = match &response.body {
        ResponseBody::Json(value) => value
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_owned),
        // Token endpoints occasionally serve JSON under a non-JSON content
        // type; give the text a chance to parse before giving up.
        ResponseBody::Text(text) => serde_json::from_str::<Value>(text)
            .ok()
            .as_ref()
            .and_then(|v| v.get("access_token"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        ResponseBody::Empty => None,
    };

    token.ok_or_else(|| NodeError::Application("Failed to retrieve access token.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use host::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn token_request_is_a_form_post_against_the_token_endpoint() {
        let request = token_request("https://api.hotjar.io", "id-1", "secret-1");

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.hotjar.io/v1/oauth/token");
        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.body,
            Some(RequestBody::Form(vec![
                ("client_id".into(), "id-1".into()),
                ("client_secret".into(), "secret-1".into()),
                ("grant_type".into(), "client_credentials".into()),
            ]))
        );
    }

    #[tokio::test]
    async fn access_token_is_extracted_from_the_response() {
        let transport = MockTransport::new()
            .respond_json(json!({ "access_token": "tok-1", "token_type": "bearer" }));

        let token = fetch_access_token(&transport, "https://api.hotjar.io", "id", "secret")
            .await
            .unwrap();
        assert_eq!(token, "tok-1");
    }

    #[tokio::test]
    async fn response_without_a_token_is_an_application_error() {
        let transport = MockTransport::new().respond_json(json!({ "error": "invalid_client" }));

        let err = fetch_access_token(&transport, "https://api.hotjar.io", "id", "secret")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to retrieve access token.");
    }

    #[tokio::test]
    async fn textual_json_bodies_still_yield_a_token() {
        let transport = MockTransport::new().respond_text(r#"{"access_token":"tok-2"}"#);

        let token = fetch_access_token(&transport, "https://api.hotjar.io", "id", "secret")
            .await
            .unwrap();
        assert_eq!(token, "tok-2");
    }
}
