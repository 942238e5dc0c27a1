//! Request/response payloads for the authentication endpoints

use serde::{Deserialize, Serialize};

use rehome_core::session::Role;

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/auth/signup`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub role: Role,
    pub username: String,
    pub password: String,
}

/// Successful login response.
///
/// The role arrives as a free-form string and is normalized into [`Role`]
/// when the session is built; an unknown spelling fails authentication.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginReply {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_wire_shape() {
        let signup = Signup {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            role: Role::Donor,
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_value(&signup).unwrap();
        assert_eq!(json["phoneNumber"], "555-0100");
        assert_eq!(json["role"], "DONOR");
    }

    #[test]
    fn test_login_reply_tolerates_missing_email() {
        let reply: LoginReply = serde_json::from_str(
            r#"{"id":1,"name":"Alice","role":"DONOR","token":"t","username":"alice"}"#,
        )
        .unwrap();
        assert!(reply.email.is_none());
        assert_eq!(reply.role, "DONOR");
    }
}
