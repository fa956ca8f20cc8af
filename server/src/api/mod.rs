pub mod auth;
pub mod recipes;

use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Outcome envelope shared by every mutating endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Query-string side of the `action` selector; the form body may carry it too
#[derive(Debug, Deserialize, IntoParams)]
pub struct ActionQuery {
    pub action: Option<String>,
}

/// The form body takes precedence when both it and the query string carry
/// an action.
pub(crate) fn resolve_action<'a>(body: Option<&'a str>, query: Option<&'a str>) -> &'a str {
    body.or(query).unwrap_or("")
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ApiMessage)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    // The session rides in a cookie, not an Authorization header
    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                crate::auth::SESSION_COOKIE,
            ))),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![auth::ApiDoc::openapi(), recipes::ApiDoc::openapi()];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_action_wins_over_query() {
        assert_eq!(resolve_action(Some("update"), Some("create")), "update");
    }

    #[test]
    fn query_action_is_the_fallback() {
        assert_eq!(resolve_action(None, Some("create")), "create");
        assert_eq!(resolve_action(None, None), "");
    }

    #[test]
    fn openapi_spec_includes_both_endpoints() {
        let spec = openapi();
        assert!(spec.paths.paths.contains_key("/auth"));
        assert!(spec.paths.paths.contains_key("/recipes"));
    }
}
