//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{Listen, ServerConfig, ServerSettings};
pub use state_builders::{build_coffee_repository, build_http_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::coffees;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;

/// Shared state handed to every worker's `App`.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// Coffee catalogue port.
    pub http_state: web::Data<HttpState>,
    /// Request body limit in bytes.
    pub max_upload_bytes: usize,
}

/// Assemble the application: coffee routes at `/` and `/api`, health
/// probes, request tracing, and Swagger UI in debug builds.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        max_upload_bytes,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::PayloadConfig::new(max_upload_bytes))
        .wrap(Trace)
        .configure(coffees::configure)
        .service(web::scope("/api").configure(coffees::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is marked once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        listen,
        max_upload_bytes,
        repository,
        images,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: build_http_state(repository, images),
        max_upload_bytes,
    };

    let server = HttpServer::new(move || build_app(deps.clone()));
    let server = match listen {
        Listen::Addr(addr) => server.bind(addr)?,
        Listen::Listener(listener) => server.listen(listener)?,
    };

    health_state.mark_ready();
    Ok(server.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    use crate::domain::TRACE_ID_HEADER;
    use crate::domain::ports::UnconfiguredImageStore;
    use crate::outbound::persistence::InMemoryCoffeeRepository;

    fn deps(max_upload_bytes: usize) -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(
                Arc::new(InMemoryCoffeeRepository::new()),
                Arc::new(UnconfiguredImageStore),
            ),
            max_upload_bytes,
        }
    }

    #[rstest]
    #[case("/coffee")]
    #[case("/api/coffee")]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[actix_web::test]
    async fn routes_are_mounted_and_traced(#[case] uri: &str) {
        let app = test::init_service(build_app(deps(1024))).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[case(test::TestRequest::post().uri("/coffee"), "Error creating coffee")]
    #[case(test::TestRequest::put().uri("/api/coffee/1"), "Error updating coffee")]
    #[actix_web::test]
    async fn oversized_bodies_are_operation_failures(
        #[case] request: test::TestRequest,
        #[case] message: &str,
    ) {
        let app = test::init_service(build_app(deps(16))).await;
        let body = format!(r#"{{"name":"{}","price":1,"image":"x"}}"#, "a".repeat(64));

        let res = test::call_service(
            &app,
            request
                .insert_header(("content-type", "application/json"))
                .set_payload(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "error": message }));
    }
}
