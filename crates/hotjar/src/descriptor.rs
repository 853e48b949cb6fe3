//! Declarative descriptor the host UI renders for this node.
//!
//! Pure metadata: the resource and operation option lists, plus which
//! credential type the node needs. The full per-field UI schema (display
//! conditions, numeric bounds) stays with the host.

use serde::Serialize;

/// One selectable option in the host UI.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOption {
    pub name: &'static str,
    /// Wire identifier, as dispatched on by the node.
    pub value: &'static str,
    pub description: &'static str,
}

/// The operations one resource offers.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceOptions {
    pub name: &'static str,
    pub value: &'static str,
    pub description: &'static str,
    pub operations: Vec<OperationOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub credential_type: &'static str,
    pub resources: Vec<ResourceOptions>,
}

pub fn descriptor() -> NodeDescriptor {
    NodeDescriptor {
        name: "hotjar",
        display_name: "Hotjar",
        description: "Use the Hotjar API",
        credential_type: crate::CREDENTIAL_TYPE,
        resources: vec![
            ResourceOptions {
                name: "Survey Response",
                value: "surveyResponse",
                description: "Manage survey responses",
                operations: vec![
                    OperationOption {
                        name: "Get Survey",
                        value: "surveyResponseSurveyGet",
                        description: "Gets survey",
                    },
                    OperationOption {
                        name: "List Survey Responses",
                        value: "surveyResponseList",
                        description: "Lists survey responses",
                    },
                    OperationOption {
                        name: "List Surveys",
                        value: "surveyResponseSurveyList",
                        description: "Lists surveys",
                    },
                ],
            },
            ResourceOptions {
                name: "User Lookup",
                value: "userLookup",
                description: "Manage user lookup",
                operations: vec![OperationOption {
                    name: "Perform User Lookup",
                    value: "userLookupPerformPost",
                    description: "Performs user lookup",
                }],
            },
        ],
    }
}
