//! UserHub SDK
//!
//! A typed GraphQL client binding for the UserHub platform API. The crate
//! exposes a fixed set of operations (`loginUser`, `getUser`, `searchUsers`)
//! through a request-wrapping SDK:
//!
//! - Pre-parsed operation documents, printed to wire text at most once per
//!   process.
//! - A [`Transport`] boundary: anything that can execute a printed document
//!   with variables and headers.
//! - A single-slot [`SdkFunctionWrapper`] hook for cross-cutting concerns
//!   (auth-header injection, tracing, metrics).
//! - A result envelope per call: `data`, `errors`, `extensions`, `headers`,
//!   `status`.
//!
//! # Example
//!
//! ```ignore
//! use userhub_sdk::{HttpTransport, LoginUserVariables, Sdk};
//!
//! let sdk = Sdk::new(HttpTransport::new("http://localhost:4000/graphql"));
//! let envelope = sdk
//!     .login_user(
//!         LoginUserVariables {
//!             email: "a@b.com".into(),
//!             password: "secret".into(),
//!         },
//!         None,
//!     )
//!     .await?;
//! if let Some(payload) = envelope.data.and_then(|d| d.usersvc_login_command) {
//!     println!("token: {}", payload.token);
//! }
//! ```
//!
//! # Wrapper injection
//!
//! ```ignore
//! use std::sync::Arc;
//! use userhub_sdk::{Sdk, SdkFunctionWrapper, WrapperAction};
//!
//! let wrapper: SdkFunctionWrapper = Arc::new(|action: WrapperAction, name, kind| {
//!     tracing::info!("{} {}", kind.as_str(), name);
//!     action(None)
//! });
//! let sdk = Sdk::with_wrapper(transport, wrapper);
//! ```

pub mod document;
pub mod error;
pub mod http;
pub mod operations;
pub mod schema;
pub mod sdk;
pub mod transport;

// Re-exports for convenience
pub use document::{Field, OperationDocument, OperationKind, VariableDefinition};
pub use error::{ErrorCode, SdkError, SdkResult};
pub use http::{HttpTransport, HttpTransportConfig};
pub use operations::{
    AuthPayload, GetUser, GetUserData, GetUserVariables, LoginUser, LoginUserData,
    LoginUserVariables, Operation, SearchUserList, SearchUsers, SearchUsersData,
    SearchUsersVariables, GET_USER_DOCUMENT, LOGIN_USER_DOCUMENT, SEARCH_USERS_DOCUMENT,
};
pub use schema::{SearchUser, User};
pub use sdk::{identity_wrapper, Sdk, SdkFunctionWrapper, WrapperAction};
pub use transport::{BoxFuture, Envelope, GraphQLError, Headers, RawEnvelope, Transport};
