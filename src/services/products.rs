use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Deserialize;
use thiserror::Error;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::product::{Populate, Product, ProductListQuery};
use crate::domain::review::Review;
use crate::forms::products::{AddProductForm, EditProductForm, ProductViolations};
use crate::hooks::{HookError, ProductPipeline};
use crate::repository::catalog::{CatalogError, ProductCatalog};
use crate::repository::{ProductReader, ProductWriter, ReviewReader};
use crate::services::ServiceError;

/// Result type returned by the product services.
pub type ProductServiceResult<T> = Result<T, ProductServiceError>;

/// Errors raised by the product services.
#[derive(Debug, Error)]
pub enum ProductServiceError {
    #[error("{0}")]
    Service(ServiceError),
    #[error(transparent)]
    Validation(#[from] ProductViolations),
    #[error(transparent)]
    Hook(#[from] HookError),
}

impl From<ServiceError> for ProductServiceError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<CatalogError> for ProductServiceError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::Repository(err) => Self::Service(ServiceError::from(err)),
            CatalogError::Hook(err) => Self::Hook(err),
        }
    }
}

/// Query parameters accepted by the products listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Only return products of this main category.
    pub category_id: Option<i32>,
    /// Only return products of this brand.
    pub brand_id: Option<i32>,
}

fn ensure_access(user: &AuthenticatedUser) -> ProductServiceResult<()> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized.into());
    }
    Ok(())
}

/// Validates the form and stores a new product in the user's hub.
///
/// Nothing is written when the form has violations.
pub fn create_product<R>(
    repo: &R,
    pipeline: &ProductPipeline,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ProductServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_access(user)?;

    let new_product = form.into_new_product(user.hub_id)?;

    Ok(ProductCatalog::new(repo, pipeline).create(&new_product)?)
}

/// Fetches a single product of the user's hub.
pub fn find_product<R>(
    repo: &R,
    pipeline: &ProductPipeline,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ProductServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    ensure_access(user)?;

    ProductCatalog::new(repo, pipeline)
        .find_one(product_id, user.hub_id)?
        .ok_or(ServiceError::NotFound.into())
}

/// Lists the products of the user's hub matching `query`.
pub fn find_products<R>(
    repo: &R,
    pipeline: &ProductPipeline,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ProductServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    ensure_access(user)?;

    let ProductsQuery {
        category_id,
        brand_id,
    } = query;

    let mut list_query = ProductListQuery::new(user.hub_id);

    if let Some(category_id) = category_id {
        list_query = list_query.category(category_id);
    }

    if let Some(brand_id) = brand_id {
        list_query = list_query.brand(brand_id);
    }

    Ok(ProductCatalog::new(repo, pipeline).find_many(list_query)?)
}

/// Applies a patch to a stored product and returns the updated record.
///
/// The patch is merged onto the stored values and the merged record is
/// validated with the same rules as a new product.
pub fn update_product<R>(
    repo: &R,
    pipeline: &ProductPipeline,
    user: &AuthenticatedUser,
    product_id: i32,
    form: EditProductForm,
) -> ProductServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    ensure_access(user)?;

    let current = repo
        .get_product_by_id(product_id, user.hub_id, Populate::none())
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form.into_update_product(&current)?;

    Ok(ProductCatalog::new(repo, pipeline).update(product_id, user.hub_id, &updates)?)
}

/// Deletes a product of the user's hub together with its owned rows.
pub fn delete_product<R>(
    repo: &R,
    pipeline: &ProductPipeline,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ProductServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_access(user)?;

    Ok(ProductCatalog::new(repo, pipeline).delete(product_id, user.hub_id)?)
}

/// Lists the reviews left for a product of the user's hub.
pub fn list_product_reviews<R>(
    repo: &R,
    pipeline: &ProductPipeline,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ProductServiceResult<Vec<Review>>
where
    R: ProductReader + ReviewReader + ?Sized,
{
    ensure_access(user)?;

    let product = repo
        .get_product_by_id(product_id, user.hub_id, Populate::none())
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok(ProductCatalog::new(repo, pipeline).reviews(&product)?)
}
