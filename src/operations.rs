//! The operation registry: one pre-parsed document per exposed operation,
//! paired with its variable and result types.
//!
//! Documents are built once in statics and never mutated; their printed
//! wire text is memoized inside each document (see [`crate::document`]).

use serde::{Deserialize, Serialize};

use crate::document::{Field, OperationDocument, OperationKind, VariableDefinition};
use crate::schema::{SearchUser, User};

/// A registered operation: variables in, typed data out, one document.
pub trait Operation {
    /// Variables type, shape fixed per operation.
    type Variables: Serialize + Send;
    /// Typed payload under the envelope's `data` key.
    type Data: for<'de> Deserialize<'de>;

    /// The operation's pre-parsed document.
    fn document() -> &'static OperationDocument;
}

// ============================================================================
// loginUser (mutation)
// ============================================================================

pub static LOGIN_USER_DOCUMENT: OperationDocument = OperationDocument::new(
    OperationKind::Mutation,
    "loginUser",
    &[
        VariableDefinition {
            name: "email",
            ty: "String!",
        },
        VariableDefinition {
            name: "password",
            ty: "String!",
        },
    ],
    &[Field::new(
        "usersvc_LoginCommand",
        &[("email", "email"), ("password", "password")],
        &[Field::leaf("token")],
    )],
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserVariables {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUserData {
    #[serde(rename = "usersvc_LoginCommand")]
    pub usersvc_login_command: Option<AuthPayload>,
}

pub struct LoginUser;

impl Operation for LoginUser {
    type Variables = LoginUserVariables;
    type Data = LoginUserData;

    fn document() -> &'static OperationDocument {
        &LOGIN_USER_DOCUMENT
    }
}

// ============================================================================
// getUser (query)
// ============================================================================

pub static GET_USER_DOCUMENT: OperationDocument = OperationDocument::new(
    OperationKind::Query,
    "getUser",
    &[
        VariableDefinition {
            name: "id",
            ty: "String!",
        },
        VariableDefinition {
            name: "token",
            ty: "String!",
        },
    ],
    &[Field::new(
        "usersvc_GetUser",
        &[("id", "id"), ("token", "token")],
        &[
            Field::leaf("id"),
            Field::leaf("email"),
            Field::leaf("firstName"),
            Field::leaf("lastName"),
        ],
    )],
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUserVariables {
    pub id: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserData {
    #[serde(rename = "usersvc_GetUser")]
    pub usersvc_get_user: Option<User>,
}

pub struct GetUser;

impl Operation for GetUser {
    type Variables = GetUserVariables;
    type Data = GetUserData;

    fn document() -> &'static OperationDocument {
        &GET_USER_DOCUMENT
    }
}

// ============================================================================
// searchUsers (query)
// ============================================================================

pub static SEARCH_USERS_DOCUMENT: OperationDocument = OperationDocument::new(
    OperationKind::Query,
    "searchUsers",
    &[VariableDefinition {
        name: "email",
        ty: "String!",
    }],
    &[Field::new(
        "searchsvc_GetUsers",
        &[("email", "email")],
        &[Field::new(
            "users",
            &[],
            &[
                Field::leaf("id"),
                Field::leaf("email"),
                Field::leaf("displayName"),
            ],
        )],
    )],
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchUsersVariables {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUserList {
    pub users: Option<Vec<SearchUser>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUsersData {
    #[serde(rename = "searchsvc_GetUsers")]
    pub searchsvc_get_users: Option<SearchUserList>,
}

pub struct SearchUsers;

impl Operation for SearchUsers {
    type Variables = SearchUsersVariables;
    type Data = SearchUsersData;

    fn document() -> &'static OperationDocument {
        &SEARCH_USERS_DOCUMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_user_document() {
        assert_eq!(LOGIN_USER_DOCUMENT.name(), "loginUser");
        assert_eq!(LOGIN_USER_DOCUMENT.kind(), OperationKind::Mutation);
        assert_eq!(
            LOGIN_USER_DOCUMENT.to_document_string(),
            "mutation loginUser($email: String!, $password: String!) {\n\
             \x20 usersvc_LoginCommand(email: $email, password: $password) {\n\
             \x20   token\n\
             \x20 }\n\
             }"
        );
    }

    #[test]
    fn test_get_user_document() {
        assert_eq!(GET_USER_DOCUMENT.name(), "getUser");
        assert_eq!(GET_USER_DOCUMENT.kind(), OperationKind::Query);
        assert_eq!(
            GET_USER_DOCUMENT.to_document_string(),
            "query getUser($id: String!, $token: String!) {\n\
             \x20 usersvc_GetUser(id: $id, token: $token) {\n\
             \x20   id\n\
             \x20   email\n\
             \x20   firstName\n\
             \x20   lastName\n\
             \x20 }\n\
             }"
        );
    }

    #[test]
    fn test_search_users_document() {
        assert_eq!(SEARCH_USERS_DOCUMENT.name(), "searchUsers");
        assert_eq!(SEARCH_USERS_DOCUMENT.kind(), OperationKind::Query);
        assert_eq!(
            SEARCH_USERS_DOCUMENT.to_document_string(),
            "query searchUsers($email: String!) {\n\
             \x20 searchsvc_GetUsers(email: $email) {\n\
             \x20   users {\n\
             \x20     id\n\
             \x20     email\n\
             \x20     displayName\n\
             \x20   }\n\
             \x20 }\n\
             }"
        );
    }

    #[test]
    fn test_data_shape_uses_server_field_names() {
        let data: LoginUserData = serde_json::from_value(serde_json::json!({
            "usersvc_LoginCommand": { "token": "T" }
        }))
        .unwrap();
        assert_eq!(
            data.usersvc_login_command,
            Some(AuthPayload {
                token: "T".to_string()
            })
        );

        let data: SearchUsersData = serde_json::from_value(serde_json::json!({
            "searchsvc_GetUsers": { "users": null }
        }))
        .unwrap();
        assert_eq!(
            data.searchsvc_get_users,
            Some(SearchUserList { users: None })
        );
    }
}
