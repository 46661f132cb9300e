//! Entity types mirrored from the UserHub server schema.
//!
//! Only the subset reachable from the exposed operations is declared here.
//! Server-side nullability maps to `Option<T>`; camelCase wire names map to
//! snake_case fields via serde renames.

use serde::{Deserialize, Serialize};

/// A user record as returned by `usersvc_GetUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

/// A search hit as returned by `searchsvc_GetUsers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUser {
    pub id: String,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_names() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "a@b.com",
            "firstName": "Ada",
            "lastName": null,
        }))
        .unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name, None);
    }
}
