//! Explicit per-operation request validation.
//!
//! Each operation enumerates its required fields and rejects the first
//! missing or zero-valued one with a message naming the field. Validation is
//! structural only: no email-format or password-strength checks happen here.

use super::types::{IsAdminRequest, LoginRequest, RegisterRequest};

/// # Errors
///
/// Returns `"<field> is required"` for the first empty/zero field.
pub fn validate_login(request: &LoginRequest) -> Result<(), String> {
    if request.email.is_empty() {
        return Err("email is required".to_string());
    }
    if request.password.is_empty() {
        return Err("password is required".to_string());
    }
    if request.app_id == 0 {
        return Err("app_id is required".to_string());
    }
    Ok(())
}

/// # Errors
///
/// Returns `"<field> is required"` for the first empty field.
pub fn validate_register(request: &RegisterRequest) -> Result<(), String> {
    if request.email.is_empty() {
        return Err("email is required".to_string());
    }
    if request.password.is_empty() {
        return Err("password is required".to_string());
    }
    Ok(())
}

/// # Errors
///
/// Returns an error when `user_id` is zero.
pub fn validate_is_admin(request: &IsAdminRequest) -> Result<(), String> {
    if request.user_id == 0 {
        return Err("user_id is required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str, app_id: i32) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            app_id,
        }
    }

    #[test]
    fn test_validate_login_names_the_offending_field() {
        assert_eq!(
            validate_login(&login("", "pw123", 1)),
            Err("email is required".to_string())
        );
        assert_eq!(
            validate_login(&login("a@x.com", "", 1)),
            Err("password is required".to_string())
        );
        assert_eq!(
            validate_login(&login("a@x.com", "pw123", 0)),
            Err("app_id is required".to_string())
        );
        assert_eq!(validate_login(&login("a@x.com", "pw123", 1)), Ok(()));
    }

    #[test]
    fn test_validate_login_reports_first_missing_field() {
        assert_eq!(
            validate_login(&login("", "", 0)),
            Err("email is required".to_string())
        );
    }

    #[test]
    fn test_validate_register() {
        assert_eq!(
            validate_register(&RegisterRequest {
                email: String::new(),
                password: "pw123".to_string(),
            }),
            Err("email is required".to_string())
        );
        assert_eq!(
            validate_register(&RegisterRequest {
                email: "a@x.com".to_string(),
                password: String::new(),
            }),
            Err("password is required".to_string())
        );
        assert_eq!(
            validate_register(&RegisterRequest {
                email: "a@x.com".to_string(),
                password: "pw123".to_string(),
            }),
            Ok(())
        );
    }

    #[test]
    fn test_validate_is_admin() {
        assert_eq!(
            validate_is_admin(&IsAdminRequest { user_id: 0 }),
            Err("user_id is required".to_string())
        );
        assert_eq!(validate_is_admin(&IsAdminRequest { user_id: 1 }), Ok(()));
    }

    #[test]
    fn test_no_semantic_checks() {
        // Structural validation only: a syntactically odd email still passes.
        assert_eq!(validate_login(&login("not-an-email", "x", 1)), Ok(()));
    }
}
