use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Role, User};

/// Request body for login. Missing fields deserialize to empty strings so the
/// handler answers 400 with the documented message instead of a decode error.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for admin-driven registration. `role` defaults to `user`.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public part of a user returned to clients; never carries the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub email: String,
    pub role: Role,
    pub id: Uuid,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
            id: user.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn public_user_never_exposes_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "staff@office.edu".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            role: Role::User,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicUser::from(&user)).expect("serialize");
        assert!(json.contains("staff@office.edu"));
        assert!(json.contains(r#""role":"user""#));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn login_request_defaults_missing_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).expect("decode");
        assert_eq!(req.email, "a@b.c");
        assert!(req.password.is_empty());
    }
}
