//! Credential definition contract.
//!
//! Credential types are almost entirely declarative: the host renders the
//! input fields from [`CredentialProperty`] metadata, stores the values
//! encrypted, and runs the [`CredentialTestRequest`] to verify connectivity.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::HttpMethod;

/// A single credential input field.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialProperty {
    pub display_name: &'static str,
    /// Key under which the value is stored and later read back by nodes.
    pub name: &'static str,
    pub required: bool,
    /// Masked in the host UI.
    pub password: bool,
    pub description: &'static str,
}

/// Static headers the host's generic-auth wrapper attaches to requests made
/// on behalf of this credential. Nodes that authenticate explicitly ignore
/// this.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateMetadata {
    pub headers: Vec<(&'static str, &'static str)>,
}

/// Declarative request the host issues to validate stored credentials.
/// Success is host-defined: a non-error status with a JSON body.
#[derive(Debug, Clone)]
pub struct CredentialTestRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form-urlencoded body, with credential field values already
    /// substituted in.
    pub form: Vec<(String, String)>,
}

/// Contract every credential type must fulfil.
pub trait CredentialType: Send + Sync {
    /// Type name referenced by nodes (e.g. in `ExecutionContext::credentials`).
    fn name(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    fn documentation_url(&self) -> &'static str {
        ""
    }

    /// Input fields the host should render and store.
    fn properties(&self) -> Vec<CredentialProperty>;

    /// Generic-auth metadata; defaults to none.
    fn authenticate(&self) -> AuthenticateMetadata {
        AuthenticateMetadata::default()
    }

    /// Connectivity test request, built from the stored field values.
    fn test_request(&self, fields: &Map<String, Value>) -> CredentialTestRequest;
}
