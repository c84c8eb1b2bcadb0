use utoipa::OpenApi;

use crate::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Repositórios API",
        version = "0.1.0",
        description = "HTTP API whose failures are all reported through a uniform JSON error envelope."
    ),
    paths(crate::api::handlers::health),
    components(schemas(ErrorResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
