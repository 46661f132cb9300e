//! The typed operation dispatch layer.
//!
//! [`Sdk`] binds a [`Transport`] and an optional [`SdkFunctionWrapper`] to
//! the fixed operation set, exposing one strongly-typed method per
//! operation. Each call:
//!
//! - looks up the operation's memoized printed document,
//! - invokes the wrapper exactly once with the operation name and kind,
//! - invokes the transport exactly once with the printed document, the
//!   serialized variables, and the call headers extended by any headers the
//!   wrapper supplied (wrapper wins on collision),
//! - returns the typed result envelope.
//!
//! The factory performs no retries, no error translation, and no logging;
//! transport failures and GraphQL-level errors surface unchanged.

use std::sync::Arc;

use crate::document::OperationKind;
use crate::error::{SdkError, SdkResult};
use crate::operations::{
    GetUser, GetUserData, GetUserVariables, LoginUser, LoginUserData, LoginUserVariables,
    Operation, SearchUsers, SearchUsersData, SearchUsersVariables,
};
use crate::transport::{BoxFuture, Envelope, Headers, RawEnvelope, Transport};

/// The deferred transport call handed to the wrapper.
///
/// Invoking it with `Some(headers)` merges those headers over the call-time
/// request headers before the transport fires.
pub type WrapperAction =
    Box<dyn FnOnce(Option<Headers>) -> BoxFuture<'static, SdkResult<RawEnvelope>> + Send>;

/// Cross-cutting wrapper interposed between each SDK method and the
/// transport call (auth-header injection, tracing, metrics).
///
/// A single-slot hook by contract: callers wanting several concerns compose
/// them inside one wrapper rather than registering a chain.
pub type SdkFunctionWrapper = Arc<
    dyn Fn(WrapperAction, &'static str, OperationKind) -> BoxFuture<'static, SdkResult<RawEnvelope>>
        + Send
        + Sync,
>;

/// The default wrapper: invokes the action with no extra headers and
/// returns its future unchanged.
pub fn identity_wrapper() -> SdkFunctionWrapper {
    Arc::new(|action: WrapperAction, _operation_name, _operation_kind| action(None))
}

/// A call-site-typed client over the registered operations.
///
/// Holds only the transport and wrapper captured at construction, both
/// read-only afterwards; concurrent calls share no mutable state beyond the
/// memoized document prints.
pub struct Sdk<C> {
    client: Arc<C>,
    wrapper: SdkFunctionWrapper,
}

impl<C> Clone for Sdk<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            wrapper: Arc::clone(&self.wrapper),
        }
    }
}

impl<C: Transport + 'static> Sdk<C> {
    /// Binds a transport with the identity wrapper.
    pub fn new(client: C) -> Self {
        Self::with_wrapper(client, identity_wrapper())
    }

    /// Binds a transport and a cross-cutting wrapper.
    pub fn with_wrapper(client: C, wrapper: SdkFunctionWrapper) -> Self {
        Self {
            client: Arc::new(client),
            wrapper,
        }
    }

    /// Executes any registered operation.
    pub async fn execute<Op: Operation>(
        &self,
        variables: Op::Variables,
        request_headers: Option<Headers>,
    ) -> SdkResult<Envelope<Op::Data>> {
        let document = Op::document();
        let query = document.to_document_string();
        let variables = serde_json::to_value(&variables)
            .map_err(|e| SdkError::serialize(format!("Failed to serialize variables: {}", e)))?;

        let client = Arc::clone(&self.client);
        let request_headers = request_headers.unwrap_or_default();
        let action: WrapperAction = Box::new(move |wrapper_headers| {
            let mut headers = request_headers;
            if let Some(extra) = wrapper_headers {
                headers.extend(extra);
            }
            Box::pin(async move { client.raw_request(query, variables, headers).await })
        });

        let raw = (self.wrapper)(action, document.name(), document.kind()).await?;
        raw.into_typed()
    }

    /// `loginUser` mutation: exchanges credentials for a session token.
    pub async fn login_user(
        &self,
        variables: LoginUserVariables,
        request_headers: Option<Headers>,
    ) -> SdkResult<Envelope<LoginUserData>> {
        self.execute::<LoginUser>(variables, request_headers).await
    }

    /// `getUser` query: fetches one user by id.
    pub async fn get_user(
        &self,
        variables: GetUserVariables,
        request_headers: Option<Headers>,
    ) -> SdkResult<Envelope<GetUserData>> {
        self.execute::<GetUser>(variables, request_headers).await
    }

    /// `searchUsers` query: finds users by email.
    pub async fn search_users(
        &self,
        variables: SearchUsersVariables,
        request_headers: Option<Headers>,
    ) -> SdkResult<Envelope<SearchUsersData>> {
        self.execute::<SearchUsers>(variables, request_headers)
            .await
    }
}
