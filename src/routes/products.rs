use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::forms::products::{AddProductForm, EditProductForm, ProductViolations};
use crate::hooks::ProductPipeline;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::products::{
    ProductServiceError, ProductsQuery, create_product, delete_product, find_product,
    find_products, list_product_reviews, update_product,
};

/// Translate a service failure into a JSON API response.
///
/// Anything that is not the caller's fault is logged and answered with 500.
fn error_response(err: ProductServiceError, action: &str) -> HttpResponse {
    match err {
        ProductServiceError::Service(ServiceError::Unauthorized) => {
            HttpResponse::Unauthorized().finish()
        }
        ProductServiceError::Service(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        ProductServiceError::Validation(violations) => {
            HttpResponse::UnprocessableEntity().json(json!({ "errors": violations }))
        }
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// JSON extractor settings for product payloads.
///
/// Bodies that parse as JSON but carry wrongly typed values are answered like
/// any other rule violation: `422` with an `errors` list.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| match err {
        JsonPayloadError::Deserialize(source) if source.is_data() => {
            let violations = ProductViolations::malformed_body(&source.to_string());
            let response =
                HttpResponse::UnprocessableEntity().json(json!({ "errors": violations }));
            InternalError::from_response(source, response).into()
        }
        err => err.into(),
    })
}

#[get("/v1/products")]
/// Return a JSON list of the hub's products, optionally filtered by category or brand.
///
/// Users without the role stored in `crate::SERVICE_ACCESS_ROLE` receive a `401 Unauthorized` response.
pub async fn api_v1_products(
    params: web::Query<ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    pipeline: web::Data<ProductPipeline>,
) -> impl Responder {
    match find_products(repo.get_ref(), pipeline.get_ref(), &user, params.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err, "list products"),
    }
}

#[post("/v1/products")]
/// Validate and store a new product. Violations are answered with `422`.
pub async fn api_v1_create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    pipeline: web::Data<ProductPipeline>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match create_product(repo.get_ref(), pipeline.get_ref(), &user, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err, "create product"),
    }
}

#[get("/v1/products/{product_id}")]
pub async fn api_v1_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    pipeline: web::Data<ProductPipeline>,
) -> impl Responder {
    let product_id = path.into_inner();

    match find_product(repo.get_ref(), pipeline.get_ref(), &user, product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "load product"),
    }
}

#[patch("/v1/products/{product_id}")]
/// Apply a partial update and return the updated product.
pub async fn api_v1_update_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    pipeline: web::Data<ProductPipeline>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match update_product(
        repo.get_ref(),
        pipeline.get_ref(),
        &user,
        product_id,
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "update product"),
    }
}

#[delete("/v1/products/{product_id}")]
pub async fn api_v1_delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    pipeline: web::Data<ProductPipeline>,
) -> impl Responder {
    let product_id = path.into_inner();

    match delete_product(repo.get_ref(), pipeline.get_ref(), &user, product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete product"),
    }
}

#[get("/v1/products/{product_id}/reviews")]
/// Return the reviews that reference the product.
pub async fn api_v1_product_reviews(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    pipeline: web::Data<ProductPipeline>,
) -> impl Responder {
    let product_id = path.into_inner();

    match list_product_reviews(repo.get_ref(), pipeline.get_ref(), &user, product_id) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response(err, "list product reviews"),
    }
}
