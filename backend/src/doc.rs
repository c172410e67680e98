//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the coffee resource and health probe handlers along
//! with their request and response schemas. The document is served by Swagger
//! UI in debug builds and printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::coffees::{
    CoffeeResponse, CreateCoffeeRequest, DeleteCoffeeResponse, PriceField, UpdateCoffeeRequest,
};
use crate::inbound::http::error::ErrorBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coffee catalogue API",
        description = "CRUD access to the coffee catalogue and health probes. \
            Coffee routes are also served under the `/api` prefix."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::coffees::list_coffees,
        crate::inbound::http::coffees::create_coffee,
        crate::inbound::http::coffees::get_coffee,
        crate::inbound::http::coffees::update_coffee,
        crate::inbound::http::coffees::delete_coffee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CoffeeResponse,
        CreateCoffeeRequest,
        UpdateCoffeeRequest,
        DeleteCoffeeResponse,
        PriceField,
        ErrorBody
    )),
    tags(
        (name = "coffee", description = "Coffee catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
