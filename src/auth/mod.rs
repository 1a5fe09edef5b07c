//! OAuth 2.0 / OpenID Connect authorization-code flow
//!
//! Two halves:
//! - **Client**: the outbound side. URL building plus the token and
//!   userinfo calls against the identity provider.
//! - **Flow**: the inbound side. The login, callback, status, and logout
//!   handlers wired over the session store.

pub mod client;
pub mod flow;

pub use client::{OidcClient, TokenSet};
pub use flow::{FlowState, create_flow_routes};
