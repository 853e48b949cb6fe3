//! Resource/operation model: what the node can be asked to do and how each
//! (resource, operation) pair maps onto a Hotjar endpoint.
//!
//! The dispatch is a flat table keyed by the pair, not a hierarchy: each row
//! names the identifiers it requires and the path template they fill.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use url::form_urlencoded;

use host::http::HttpMethod;
use host::NodeError;

/// Top-level entity category the node operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    SurveyResponse,
    UserLookup,
}

impl Resource {
    /// Parse the wire identifier used in node parameters.
    pub fn parse(s: &str) -> Result<Self, NodeError> {
        match s {
            "surveyResponse" => Ok(Resource::SurveyResponse),
            "userLookup" => Ok(Resource::UserLookup),
            other => Err(NodeError::Operation(format!("Unknown resource:{other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::SurveyResponse => "surveyResponse",
            Resource::UserLookup => "userLookup",
        }
    }
}

/// Specific action within a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SurveyResponseSurveyGet,
    SurveyResponseList,
    SurveyResponseSurveyList,
    UserLookupPerformPost,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::SurveyResponseSurveyGet,
        Operation::SurveyResponseList,
        Operation::SurveyResponseSurveyList,
        Operation::UserLookupPerformPost,
    ];

    /// Parse the wire identifier used in node parameters.
    pub fn parse(s: &str) -> Result<Self, NodeError> {
        match s {
            "surveyResponseSurveyGet" => Ok(Operation::SurveyResponseSurveyGet),
            "surveyResponseList" => Ok(Operation::SurveyResponseList),
            "surveyResponseSurveyList" => Ok(Operation::SurveyResponseSurveyList),
            "userLookupPerformPost" => Ok(Operation::UserLookupPerformPost),
            other => Err(NodeError::Operation(format!("Unknown operation:{other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SurveyResponseSurveyGet => "surveyResponseSurveyGet",
            Operation::SurveyResponseList => "surveyResponseList",
            Operation::SurveyResponseSurveyList => "surveyResponseSurveyList",
            Operation::UserLookupPerformPost => "userLookupPerformPost",
        }
    }

    /// HTTP method, derived from the identifier's suffix.
    pub fn http_method(&self) -> HttpMethod {
        http_method_for(self.as_str())
    }

    /// Whether the identifier denotes a delete. Delete operations never
    /// carry a request body even when the method would otherwise allow one.
    pub fn is_delete(&self) -> bool {
        self.as_str().contains("Delete")
    }
}

/// Derive the HTTP verb from an operation identifier's suffix.
///
/// The suffix convention is part of the node's compatibility surface: keep
/// the exact rules (`...Delete`, `...Patch`, `...Put`, `...Post`, else GET)
/// even though they are stringly-typed.
pub fn http_method_for(operation_id: &str) -> HttpMethod {
    if operation_id.ends_with("Delete") {
        HttpMethod::Delete
    } else if operation_id.ends_with("Patch") {
        HttpMethod::Patch
    } else if operation_id.ends_with("Put") {
        HttpMethod::Put
    } else if operation_id.ends_with("Post") {
        HttpMethod::Post
    } else {
        HttpMethod::Get
    }
}

/// An identifier an endpoint path interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierField {
    SiteId,
    SurveyId,
    OrganizationId,
}

impl IdentifierField {
    /// User-facing name used in validation error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            IdentifierField::SiteId => "Site ID",
            IdentifierField::SurveyId => "Survey ID",
            IdentifierField::OrganizationId => "Organization ID",
        }
    }

    /// Parameter name in the item's parameter map (and in path templates).
    pub fn parameter_name(&self) -> &'static str {
        match self {
            IdentifierField::SiteId => "siteId",
            IdentifierField::SurveyId => "surveyId",
            IdentifierField::OrganizationId => "organizationId",
        }
    }
}

/// Identifier values read from one item's parameters. Empty string means
/// the user left the field blank.
#[derive(Debug, Clone, Default)]
pub struct Identifiers {
    pub site_id: String,
    pub survey_id: String,
    pub organization_id: String,
}

impl Identifiers {
    fn get(&self, field: IdentifierField) -> &str {
        match field {
            IdentifierField::SiteId => &self.site_id,
            IdentifierField::SurveyId => &self.survey_id,
            IdentifierField::OrganizationId => &self.organization_id,
        }
    }
}

/// Resolve the endpoint path for a (resource, operation) pair, validating
/// required identifiers before any concatenation.
///
/// # Errors
/// - [`NodeError::Application`] `"<Field> is required"` for a blank
///   identifier the endpoint needs.
/// - [`NodeError::Operation`] for a pair the table does not define.
pub fn endpoint_path(
    resource: Resource,
    operation: Operation,
    ids: &Identifiers,
) -> Result<String, NodeError> {
    use IdentifierField::{OrganizationId, SiteId, SurveyId};

    let (required, template): (&[IdentifierField], &str) = match (resource, operation) {
        (Resource::SurveyResponse, Operation::SurveyResponseSurveyGet) => (
            &[SiteId, SurveyId],
            "/v1/sites/{siteId}/surveys/{surveyId}",
        ),
        (Resource::SurveyResponse, Operation::SurveyResponseList) => (
            &[SiteId, SurveyId],
            "/v1/sites/{siteId}/surveys/{surveyId}/responses",
        ),
        (Resource::SurveyResponse, Operation::SurveyResponseSurveyList) => {
            (&[SiteId], "/v1/sites/{siteId}/surveys")
        }
        (Resource::UserLookup, Operation::UserLookupPerformPost) => (
            &[OrganizationId],
            "/v1/organizations/{organizationId}/user-lookup",
        ),
        (resource, operation) => {
            return Err(NodeError::Operation(format!(
                "Resource '{}' does not support operation '{}'",
                resource.as_str(),
                operation.as_str()
            )));
        }
    };

    for field in required {
        if ids.get(*field).is_empty() {
            return Err(NodeError::Application(format!(
                "{} is required",
                field.display_name()
            )));
        }
    }

    let mut path = template.to_owned();
    for field in required {
        path = path.replace(
            &format!("{{{}}}", field.parameter_name()),
            ids.get(*field),
        );
    }
    Ok(path)
}

/// Build a `?`-prefixed query string from the node's query-parameter map.
///
/// Keys are percent-decoded before re-encoding (users sometimes paste
/// pre-encoded keys into the UI); empty-string and null values are dropped
/// rather than sent as bare `key=`; insertion order is preserved. Returns
/// the empty string when no pairs remain.
pub fn build_query_string(parameters: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut appended = false;

    for (key, value) in parameters {
        let value = match value {
            Value::String(s) if s.is_empty() => continue,
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        };
        let key = percent_decode_str(key).decode_utf8_lossy();
        serializer.append_pair(&key, &value);
        appended = true;
    }

    if appended {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(site: &str, survey: &str, org: &str) -> Identifiers {
        Identifiers {
            site_id: site.into(),
            survey_id: survey.into(),
            organization_id: org.into(),
        }
    }

    #[test]
    fn every_table_row_builds_its_documented_path() {
        let all = ids("11", "22", "33");

        let cases = [
            (
                Resource::SurveyResponse,
                Operation::SurveyResponseSurveyGet,
                "/v1/sites/11/surveys/22",
            ),
            (
                Resource::SurveyResponse,
                Operation::SurveyResponseList,
                "/v1/sites/11/surveys/22/responses",
            ),
            (
                Resource::SurveyResponse,
                Operation::SurveyResponseSurveyList,
                "/v1/sites/11/surveys",
            ),
            (
                Resource::UserLookup,
                Operation::UserLookupPerformPost,
                "/v1/organizations/33/user-lookup",
            ),
        ];

        for (resource, operation, expected) in cases {
            assert_eq!(endpoint_path(resource, operation, &all).unwrap(), expected);
        }
    }

    #[test]
    fn missing_site_id_is_rejected_before_building_a_url() {
        let err = endpoint_path(
            Resource::SurveyResponse,
            Operation::SurveyResponseSurveyGet,
            &ids("", "22", ""),
        )
        .unwrap_err();

        match err {
            NodeError::Application(msg) => assert_eq!(msg, "Site ID is required"),
            other => panic!("expected Application error, got {other:?}"),
        }
    }

    #[test]
    fn missing_survey_id_is_rejected() {
        let err = endpoint_path(
            Resource::SurveyResponse,
            Operation::SurveyResponseList,
            &ids("11", "", ""),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Survey ID is required");
    }

    #[test]
    fn missing_organization_id_is_rejected() {
        let err = endpoint_path(
            Resource::UserLookup,
            Operation::UserLookupPerformPost,
            &ids("", "", ""),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Organization ID is required");
    }

    #[test]
    fn pair_outside_the_table_is_an_operation_error() {
        let err = endpoint_path(
            Resource::UserLookup,
            Operation::SurveyResponseList,
            &ids("11", "22", "33"),
        )
        .unwrap_err();
        assert!(matches!(err, NodeError::Operation(_)));
    }

    #[test]
    fn unknown_resource_names_the_offender() {
        let err = Resource::parse("pageView").unwrap_err();
        assert_eq!(err.to_string(), "operation error: Unknown resource:pageView");
    }

    #[test]
    fn unknown_operation_names_the_offender() {
        assert!(Operation::parse("surveyResponseDeleteAll").is_err());
    }

    #[test]
    fn method_is_a_pure_function_of_the_identifier_suffix() {
        assert_eq!(http_method_for("fooPost"), HttpMethod::Post);
        assert_eq!(http_method_for("fooPut"), HttpMethod::Put);
        assert_eq!(http_method_for("fooPatch"), HttpMethod::Patch);
        assert_eq!(http_method_for("fooDelete"), HttpMethod::Delete);
        assert_eq!(http_method_for("fooList"), HttpMethod::Get);
        assert_eq!(http_method_for(""), HttpMethod::Get);
    }

    #[test]
    fn every_known_operation_maps_to_its_expected_method() {
        let expected = [
            (Operation::SurveyResponseSurveyGet, HttpMethod::Get),
            (Operation::SurveyResponseList, HttpMethod::Get),
            (Operation::SurveyResponseSurveyList, HttpMethod::Get),
            (Operation::UserLookupPerformPost, HttpMethod::Post),
        ];
        for (operation, method) in expected {
            assert_eq!(operation.http_method(), method);
            assert!(!operation.is_delete());
        }
        assert_eq!(Operation::ALL.len(), expected.len());
    }

    #[test]
    fn query_string_preserves_insertion_order_and_drops_empty_values() {
        let params = json!({
            "cursor": "abc",
            "skipped": "",
            "limit": 50,
            "with_questions": true,
            "ignored": null
        });

        let qs = build_query_string(params.as_object().unwrap());
        assert_eq!(qs, "?cursor=abc&limit=50&with_questions=true");
    }

    #[test]
    fn query_string_is_empty_when_nothing_remains() {
        assert_eq!(build_query_string(&Map::new()), "");

        let params = json!({ "a": "", "b": null });
        assert_eq!(build_query_string(params.as_object().unwrap()), "");
    }

    #[test]
    fn query_values_are_url_encoded_and_keys_are_decoded_first() {
        let params = json!({ "with%20space": "a b&c" });
        let qs = build_query_string(params.as_object().unwrap());
        assert_eq!(qs, "?with+space=a+b%26c");
    }
}
