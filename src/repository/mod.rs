use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    brand::{Brand, NewBrand},
    category::{Category, NewCategory},
    product::{NewProduct, Populate, Product, ProductListQuery, UpdateProduct},
    review::{NewReview, Review, ReviewListQuery},
    subcategory::{NewSubCategory, SubCategory},
};

pub mod brand;
pub mod catalog;
pub mod category;
pub mod product;
pub mod review;
pub mod subcategory;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over stored product records.
///
/// Implementations return stored values: bare image filenames, and the
/// category name only when `populate` asks for it. Lifecycle hooks are run
/// by [`catalog::ProductCatalog`], never here.
pub trait ProductReader {
    fn get_product_by_id(
        &self,
        id: i32,
        hub_id: i32,
        populate: Populate,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    /// Persist a validated product. Fails with `NotFound` when a referenced
    /// category, subcategory or brand does not exist in the hub.
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Replace a product and return it, populated according to `populate`.
    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
        populate: Populate,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read access to the review store backing the reverse product relation.
pub trait ReviewReader {
    fn list_reviews(&self, query: &ReviewListQuery) -> RepositoryResult<Vec<Review>>;
}

pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
}

pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
}

pub trait SubCategoryWriter {
    fn create_subcategory(&self, new_subcategory: &NewSubCategory)
    -> RepositoryResult<SubCategory>;
}

pub trait BrandWriter {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
}
