//! Hotjar API credential type: a client ID/secret pair exchanged for a
//! bearer token via the OAuth2 client-credentials flow.

use serde_json::{Map, Value};

use host::credential::{
    AuthenticateMetadata, CredentialProperty, CredentialTestRequest, CredentialType,
};
use host::http::HttpMethod;

use crate::auth::{GRANT_TYPE, TOKEN_PATH};
use crate::{API_BASE_URL, CREDENTIAL_TYPE};

/// The `hotjarApi` credential definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct HotjarApi;

impl CredentialType for HotjarApi {
    fn name(&self) -> &'static str {
        CREDENTIAL_TYPE
    }

    fn display_name(&self) -> &'static str {
        "Hotjar API"
    }

    fn documentation_url(&self) -> &'static str {
        "https://help.hotjar.com/hc/en-us/articles/36820005914001-Hotjar-API-Reference"
    }

    fn properties(&self) -> Vec<CredentialProperty> {
        vec![
            CredentialProperty {
                display_name: "Client ID",
                name: "clientId",
                required: true,
                password: true,
                description: "Client ID for the Hotjar API",
            },
            CredentialProperty {
                display_name: "Client Secret",
                name: "clientSecret",
                required: true,
                password: true,
                description: "Client Secret for the Hotjar API",
            },
        ]
    }

    // Consumed by the host's generic-auth wrapper; the node itself
    // authenticates explicitly with a bearer token.
    fn authenticate(&self) -> AuthenticateMetadata {
        AuthenticateMetadata {
            headers: vec![("Content-Type", "application/x-www-form-urlencoded")],
        }
    }

    fn test_request(&self, fields: &Map<String, Value>) -> CredentialTestRequest {
        let field = |name: &str| {
            fields
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };

        CredentialTestRequest {
            method: HttpMethod::Post,
            url: format!("{API_BASE_URL}{TOKEN_PATH}"),
            headers: vec![(
                "Content-Type".into(),
                "application/x-www-form-urlencoded".into(),
            )],
            form: vec![
                ("client_id".into(), field("clientId")),
                ("client_secret".into(), field("clientSecret")),
                ("grant_type".into(), GRANT_TYPE.into()),
            ],
        }
    }
}
