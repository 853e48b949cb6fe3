//! `host` crate — the contracts an integration node is written against.
//!
//! The workflow engine owns scheduling, credential storage, and item flow;
//! a node only sees what this crate defines: an [`ExecutionContext`] with
//! per-item parameter accessors, an [`HttpTransport`] to issue requests
//! through, and a [`CredentialType`] contract for declaring credentials.

pub mod credential;
pub mod error;
pub mod http;
pub mod mock;
pub mod traits;

pub use credential::CredentialType;
pub use error::NodeError;
pub use http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use traits::{ExecutableNode, ExecutionContext};
