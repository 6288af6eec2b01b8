//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the registry API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Registry API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for managing user accounts"
    ),
    nest(
        (path = "/", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Users", description = "Account registry endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
