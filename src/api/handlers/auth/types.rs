//! Request/response types for the auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub app_id: i32,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub user_id: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct IsAdminRequest {
    #[serde(default)]
    pub user_id: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_missing_app_id_defaults_to_zero() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw123"}"#).expect("decode");
        assert_eq!(request.app_id, 0);
    }

    #[test]
    fn test_register_response_shape() {
        let value = serde_json::to_value(RegisterResponse { user_id: 7 }).expect("encode");
        assert_eq!(value["user_id"], 7);
    }
}
