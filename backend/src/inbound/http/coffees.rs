//! Coffee resource endpoints.
//!
//! ```text
//! GET    /coffee
//! POST   /coffee
//! GET    /coffee/{id}
//! PUT    /coffee/{id}
//! DELETE /coffee/{id}
//! ```
//!
//! The same handlers are mounted at the root and under `/api`.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{CoffeeUpdateSubmission, ImageInput, NewCoffeeSubmission, PriceInput};
use crate::domain::{Coffee, CoffeeId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::multipart::{is_multipart, read_coffee_form};
use crate::inbound::http::state::HttpState;

const CREATE_FAILED: &str = "Error creating coffee";
const UPDATE_FAILED: &str = "Error updating coffee";
const DELETE_FAILED: &str = "Error deleting coffee";
const NOT_FOUND: &str = "Coffee not found";
const DELETED: &str = "Coffee deleted with success";

/// Coffee representation returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i32,
    /// Unique display name.
    #[schema(example = "Espresso")]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Unit price.
    #[schema(example = 1.5)]
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Coffee> for CoffeeResponse {
    fn from(coffee: Coffee) -> Self {
        Self {
            id: coffee.id.get(),
            name: coffee.name.as_str().to_owned(),
            description: coffee.description,
            price: coffee.price.get(),
            image: coffee.image.as_str().to_owned(),
            created_at: coffee.created_at,
            updated_at: coffee.updated_at,
        }
    }
}

/// Price accepted as a JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceField {
    /// Numeric price.
    Number(f64),
    /// Price as text, e.g. `"2.50"`.
    Text(String),
}

impl From<PriceField> for PriceInput {
    fn from(value: PriceField) -> Self {
        match value {
            PriceField::Number(number) => Self::Number(number),
            PriceField::Text(text) => Self::Text(text),
        }
    }
}

/// JSON body for `POST /coffee`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateCoffeeRequest {
    /// Required unique name.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Required price.
    pub price: Option<PriceField>,
    /// Required image URL.
    pub image: Option<String>,
}

impl From<CreateCoffeeRequest> for NewCoffeeSubmission {
    fn from(body: CreateCoffeeRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price.map(PriceInput::from),
            image: body.image.map(ImageInput::Url),
        }
    }
}

/// JSON body for `PUT /coffee/{id}`. Absent or null fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCoffeeRequest {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement price.
    pub price: Option<PriceField>,
    /// Replacement image URL.
    pub image: Option<String>,
}

impl From<UpdateCoffeeRequest> for CoffeeUpdateSubmission {
    fn from(body: UpdateCoffeeRequest) -> Self {
        Self {
            name: body.name,
            price: body.price.map(PriceInput::from),
            image: body.image,
        }
    }
}

/// Body returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteCoffeeResponse {
    /// Confirmation message.
    #[schema(example = "Coffee deleted with success")]
    pub message: String,
}

fn parse_id(raw: &str, failure: impl FnOnce() -> Error) -> Result<CoffeeId, Error> {
    raw.parse().map_err(|err| {
        debug!(raw_id = raw, error = %err, "rejecting coffee id");
        failure()
    })
}

/// Unwrap the buffered body; oversized or broken payloads fail the operation.
fn read_body(
    body: Result<web::Bytes, actix_web::Error>,
    failure: &'static str,
) -> Result<web::Bytes, Error> {
    body.map_err(|err| {
        debug!(error = %err, "request body rejected");
        Error::operation_failed(failure)
    })
}

async fn read_submission(req: &HttpRequest, body: web::Bytes) -> ApiResult<NewCoffeeSubmission> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if is_multipart(content_type) {
        return read_coffee_form(content_type, body).await.map_err(|err| {
            debug!(error = %err, "multipart body rejected");
            Error::operation_failed(CREATE_FAILED)
        });
    }
    serde_json::from_slice::<CreateCoffeeRequest>(&body)
        .map(NewCoffeeSubmission::from)
        .map_err(|err| {
            debug!(error = %err, "json body rejected");
            Error::operation_failed(CREATE_FAILED)
        })
}

/// List every coffee.
#[utoipa::path(
    get,
    path = "/coffee",
    responses(
        (status = 200, description = "All coffees", body = [CoffeeResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["coffee"],
    operation_id = "listCoffees"
)]
#[get("/coffee")]
pub async fn list_coffees(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CoffeeResponse>>> {
    let coffees = state.catalogue.list_coffees().await?;
    Ok(web::Json(
        coffees.into_iter().map(CoffeeResponse::from).collect(),
    ))
}

/// Create a coffee from a JSON or multipart body.
#[utoipa::path(
    post,
    path = "/coffee",
    description = "Accepts `application/json` or `multipart/form-data`. In a form, `image` may be a file part, which is uploaded to object storage.",
    request_body = CreateCoffeeRequest,
    responses(
        (status = 201, description = "Coffee created", body = CoffeeResponse),
        (status = 400, description = "Missing fields or creation failure", body = ErrorBody)
    ),
    tags = ["coffee"],
    operation_id = "createCoffee"
)]
#[post("/coffee")]
pub async fn create_coffee(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let bytes = read_body(body, CREATE_FAILED)?;
    let submission = read_submission(&req, bytes).await?;
    let coffee = state.catalogue.create_coffee(submission).await?;
    Ok(HttpResponse::Created().json(CoffeeResponse::from(coffee)))
}

/// Fetch one coffee.
#[utoipa::path(
    get,
    path = "/coffee/{id}",
    params(("id" = i32, Path, description = "Coffee identifier")),
    responses(
        (status = 200, description = "Coffee", body = CoffeeResponse),
        (status = 404, description = "Coffee not found", body = ErrorBody)
    ),
    tags = ["coffee"],
    operation_id = "getCoffee"
)]
#[get("/coffee/{id}")]
pub async fn get_coffee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CoffeeResponse>> {
    let id = parse_id(&path, || Error::not_found(NOT_FOUND))?;
    let coffee = state.catalogue.get_coffee(id).await?;
    Ok(web::Json(CoffeeResponse::from(coffee)))
}

/// Partially update a coffee.
#[utoipa::path(
    put,
    path = "/coffee/{id}",
    params(("id" = i32, Path, description = "Coffee identifier")),
    request_body = UpdateCoffeeRequest,
    responses(
        (status = 200, description = "Updated coffee", body = CoffeeResponse),
        (status = 400, description = "Update failure", body = ErrorBody)
    ),
    tags = ["coffee"],
    operation_id = "updateCoffee"
)]
#[put("/coffee/{id}")]
pub async fn update_coffee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: Result<web::Bytes, actix_web::Error>,
) -> ApiResult<web::Json<CoffeeResponse>> {
    let id = parse_id(&path, || Error::operation_failed(UPDATE_FAILED))?;
    let bytes = read_body(body, UPDATE_FAILED)?;
    let request: UpdateCoffeeRequest = serde_json::from_slice(&bytes).map_err(|err| {
        debug!(coffee_id = %id, error = %err, "json body rejected");
        Error::operation_failed(UPDATE_FAILED)
    })?;
    let coffee = state.catalogue.update_coffee(id, request.into()).await?;
    Ok(web::Json(CoffeeResponse::from(coffee)))
}

/// Delete a coffee.
#[utoipa::path(
    delete,
    path = "/coffee/{id}",
    params(("id" = i32, Path, description = "Coffee identifier")),
    responses(
        (status = 200, description = "Coffee deleted", body = DeleteCoffeeResponse),
        (status = 400, description = "Delete failure", body = ErrorBody)
    ),
    tags = ["coffee"],
    operation_id = "deleteCoffee"
)]
#[delete("/coffee/{id}")]
pub async fn delete_coffee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteCoffeeResponse>> {
    let id = parse_id(&path, || Error::operation_failed(DELETE_FAILED))?;
    state.catalogue.delete_coffee(id).await?;
    Ok(web::Json(DeleteCoffeeResponse {
        message: DELETED.to_owned(),
    }))
}

/// Register the coffee resource on an app or scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use coffee_backend::inbound::http::coffees;
///
/// let _app = App::new()
///     .configure(coffees::configure)
///     .service(web::scope("/api").configure(coffees::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_coffees)
        .service(create_coffee)
        .service(get_coffee)
        .service(update_coffee)
        .service(delete_coffee);
}

#[cfg(test)]
#[path = "coffees_tests.rs"]
mod tests;
