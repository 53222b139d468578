use crate::api::handlers::{auth, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::login,
        auth::register,
        auth::is_admin,
    ),
    components(schemas(
        health::Health,
        auth::types::LoginRequest,
        auth::types::LoginResponse,
        auth::types::RegisterRequest,
        auth::types::RegisterResponse,
        auth::types::IsAdminRequest,
        auth::types::IsAdminResponse,
    )),
    tags(
        (name = "auth", description = "Credential authentication API"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_operations() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/v1/auth/login"));
        assert!(paths.contains_key("/v1/auth/register"));
        assert!(paths.contains_key("/v1/auth/is-admin"));
    }
}
