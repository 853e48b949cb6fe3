//! `hotjar` crate — the Hotjar integration node and its credential type.
//!
//! Exposes Hotjar's survey, survey-response, and user-lookup REST endpoints
//! as a configurable workflow step. The node authenticates per execution
//! batch via an OAuth2 client-credentials exchange, dispatches each input
//! item on its (resource, operation) pair, and normalizes every upstream
//! response into one output item.

pub mod auth;
pub mod credentials;
pub mod descriptor;
pub mod node;
pub mod operations;

pub use credentials::HotjarApi;
pub use node::HotjarNode;
pub use operations::{Operation, Resource};

/// Production API host.
pub const API_BASE_URL: &str = "https://api.hotjar.io";

/// Credential type name the node reads from the execution context.
pub const CREDENTIAL_TYPE: &str = "hotjarApi";
